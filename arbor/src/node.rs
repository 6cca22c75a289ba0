use crate::geometry::Point;
use crate::identity::NodeId;

/// Child set of a render node. A node's children are either absent, all
/// visible, or all hidden; never a mix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    Leaf,
    Expanded(Vec<NodeId>),
    Collapsed(Vec<NodeId>),
}

impl Children {
    pub fn state(&self) -> NodeState {
        match self {
            Children::Leaf => NodeState::Leaf,
            Children::Expanded(_) => NodeState::Expanded,
            Children::Collapsed(_) => NodeState::Collapsed,
        }
    }

    /// All children, visible or hidden.
    pub fn ids(&self) -> &[NodeId] {
        match self {
            Children::Leaf => &[],
            Children::Expanded(ids) | Children::Collapsed(ids) => ids,
        }
    }

    /// Children taking part in layout.
    pub fn visible(&self) -> &[NodeId] {
        match self {
            Children::Expanded(ids) => ids,
            _ => &[],
        }
    }
}

/// Interaction state of a render node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeState {
    /// No children, now or ever.
    Leaf,
    Expanded,
    Collapsed,
}

/// Runtime wrapper around one payload node.
#[derive(Debug, Clone)]
pub struct RenderNode {
    pub(crate) id: NodeId,
    pub(crate) label: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: usize,
    pub(crate) children: Children,
    pub(crate) position: Point,
    pub(crate) previous: Point,
}

impl RenderNode {
    pub(crate) fn new(
        id: NodeId,
        label: impl Into<String>,
        parent: Option<NodeId>,
        depth: usize,
        at: Point,
    ) -> Self {
        Self {
            id,
            label: label.into(),
            parent,
            depth,
            children: Children::Leaf,
            position: at,
            previous: at,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn state(&self) -> NodeState {
        self.children.state()
    }

    pub fn has_children(&self) -> bool {
        !matches!(self.children, Children::Leaf)
    }

    pub fn has_hidden_children(&self) -> bool {
        matches!(self.children, Children::Collapsed(_))
    }

    /// Position from the latest layout pass.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Position snapshot taken at the end of the previous pass.
    pub fn previous(&self) -> Point {
        self.previous
    }

    /// Flip between expanded and collapsed. Leaves are left alone.
    /// Returns the new state.
    pub(crate) fn toggle(&mut self) -> NodeState {
        self.children = match std::mem::replace(&mut self.children, Children::Leaf) {
            Children::Leaf => Children::Leaf,
            Children::Expanded(ids) => Children::Collapsed(ids),
            Children::Collapsed(ids) => Children::Expanded(ids),
        };
        self.state()
    }

    pub(crate) fn collapse(&mut self) {
        if let Children::Expanded(ids) = &mut self.children {
            let ids = std::mem::take(ids);
            self.children = Children::Collapsed(ids);
        }
    }
}
