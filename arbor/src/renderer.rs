use std::fmt;

use log::{debug, info};

use crate::animation::{Clock, Tween};
use crate::config::{RendererConfig, Surface};
use crate::data::TreeNode;
use crate::error::Result;
use crate::identity::{IdAllocator, NodeId};
use crate::layout::{LayoutSize, layout};
use crate::node::{NodeState, RenderNode};
use crate::scene::{Frame, HintFrame, PassSummary, Scene, SourceMotion};
use crate::tree::RenderTree;

/// What activating a node did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// A collapsed node now shows its children.
    Expanded(NodeId),
    /// An expanded node now hides its children.
    Collapsed(NodeId),
    /// The root was activated; the back handler ran.
    Back,
    /// Leaf, hidden or unknown node. Nothing changed.
    Ignored,
}

type BackHandler = Box<dyn FnMut()>;

/// Interactive collapsible tree bound to one drawing surface.
///
/// The renderer owns the expand/collapse state and the on-screen glyphs. It
/// does no I/O and never reads the wall clock directly: the UI binding
/// forwards pointer events through [`on_node_activate`],
/// [`on_root_hover_enter`] and [`on_root_hover_leave`], then draws
/// [`frame`] until [`advance`] reports that nothing is moving.
///
/// [`on_node_activate`]: TreeRenderer::on_node_activate
/// [`on_root_hover_enter`]: TreeRenderer::on_root_hover_enter
/// [`on_root_hover_leave`]: TreeRenderer::on_root_hover_leave
/// [`frame`]: TreeRenderer::frame
/// [`advance`]: TreeRenderer::advance
pub struct TreeRenderer {
    surface: Surface,
    config: RendererConfig,
    ids: IdAllocator,
    tree: RenderTree,
    scene: Scene,
    hint: Tween<f64>,
    clock: Box<dyn Clock>,
    on_back: Option<BackHandler>,
    passes: u64,
}

impl fmt::Debug for TreeRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeRenderer")
            .field("surface", &self.surface)
            .field("nodes", &self.tree.len())
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl TreeRenderer {
    /// Mount `data` on `surface`.
    ///
    /// Only the root and its direct children start out visible; every deeper
    /// node is built but collapsed.
    pub fn new(
        data: &TreeNode,
        surface: Surface,
        config: RendererConfig,
        mut ids: IdAllocator,
        clock: impl Clock + 'static,
    ) -> Self {
        let anchor = surface.anchor();
        let mut tree = RenderTree::build(data, &mut ids, anchor);
        tree.collapse_below_root();

        let now = clock.now();
        let mut renderer = Self {
            surface,
            config,
            ids,
            tree,
            scene: Scene::new(),
            hint: Tween::settled(0.0, now),
            clock: Box::new(clock),
            on_back: None,
            passes: 0,
        };
        info!(
            "Mounted tree '{}' ({} nodes) on surface '{}'",
            data.name,
            renderer.tree.len(),
            renderer.surface.id
        );
        if let Some(root) = renderer.tree.root() {
            renderer.render(root);
        }
        renderer
    }

    /// Parse a JSON payload and mount it. Malformed input fails before any
    /// node is built.
    pub fn from_json(
        json: &str,
        surface: Surface,
        config: RendererConfig,
        ids: IdAllocator,
        clock: impl Clock + 'static,
    ) -> Result<Self> {
        let data = TreeNode::from_json(json)?;
        Ok(Self::new(&data, surface, config, ids, clock))
    }

    /// Register the callback run when the root is activated.
    pub fn set_back_handler(&mut self, handler: impl FnMut() + 'static) {
        self.on_back = Some(Box::new(handler));
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.tree.root()
    }

    pub fn node(&self, id: NodeId) -> Option<&RenderNode> {
        self.tree.get(id)
    }

    pub fn state(&self, id: NodeId) -> Option<NodeState> {
        self.tree.state(id)
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    /// Visible nodes in pre-order.
    pub fn visible_ids(&self) -> Vec<NodeId> {
        self.tree.visible()
    }

    /// Find a node by label, searching hidden nodes too. First match in
    /// pre-order wins.
    pub fn find(&self, label: &str) -> Option<NodeId> {
        self.tree
            .all()
            .into_iter()
            .find(|id| self.tree.get(*id).is_some_and(|n| n.label() == label))
    }

    /// Number of render passes run so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Handle a click (or any other activation) on a node.
    pub fn on_node_activate(&mut self, id: NodeId) -> Activation {
        let Some(node) = self.tree.get(id) else {
            debug!("Ignoring activation of unknown {id}");
            return Activation::Ignored;
        };

        if node.is_root() {
            info!("Root {id} activated, navigating back");
            if let Some(handler) = self.on_back.as_mut() {
                handler();
            }
            return Activation::Back;
        }

        if !self.is_visible(id) {
            debug!("Ignoring activation of hidden {id}");
            return Activation::Ignored;
        }

        let activation = match self.tree.toggle(id) {
            Some(NodeState::Expanded) => Activation::Expanded(id),
            Some(NodeState::Collapsed) => Activation::Collapsed(id),
            Some(NodeState::Leaf) | None => return Activation::Ignored,
        };
        debug!("{activation:?}");
        self.render(id);
        activation
    }

    /// Pointer entered the root node: fade the return hint in.
    pub fn on_root_hover_enter(&mut self) {
        if self.tree.root().is_none() {
            return;
        }
        let now = self.clock.now();
        self.hint.retarget(1.0, now, self.config.hint_fade_in());
    }

    /// Pointer left the root node: fade the return hint out.
    pub fn on_root_hover_leave(&mut self) {
        let now = self.clock.now();
        self.hint.retarget(0.0, now, self.config.hint_fade_out());
    }

    /// Replace the payload, keeping identities of nodes that survive.
    /// `None` clears the diagram but keeps the surface.
    pub fn set_data(&mut self, data: Option<&TreeNode>) {
        let anchor = self.surface.anchor();
        self.tree.merge(data, &mut self.ids, anchor);
        match self.tree.root() {
            Some(root) => {
                self.render(root);
            }
            None => {
                let now = self.clock.now();
                self.hint.set(0.0, now);
                self.pass(SourceMotion {
                    from: anchor,
                    to: anchor,
                });
            }
        }
    }

    /// Re-render after the surface changed size.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.surface.width = width;
        self.surface.height = height;
        if let Some(root) = self.tree.root() {
            self.render(root);
        }
    }

    /// Lay out the visible tree and reconcile glyphs, with `source` as the
    /// origin of entering glyphs and the destination of exiting ones.
    pub fn render(&mut self, source: NodeId) -> PassSummary {
        let size = LayoutSize {
            breadth: self.surface.height,
            depth_spacing: self.config.depth_spacing,
        };
        for (id, position) in layout(&self.tree, size) {
            if let Some(node) = self.tree.get_mut(id) {
                node.position = position;
            }
        }

        let anchor = self.surface.anchor();
        let motion = self
            .tree
            .get(source)
            .map(|n| SourceMotion {
                from: n.previous(),
                to: n.position(),
            })
            .unwrap_or(SourceMotion {
                from: anchor,
                to: anchor,
            });
        self.pass(motion)
    }

    fn pass(&mut self, motion: SourceMotion) -> PassSummary {
        let now = self.clock.now();
        let visible = self.tree.visible();
        let summary = self
            .scene
            .reconcile(&self.tree, &visible, motion, &self.config, now);

        for id in &visible {
            if let Some(node) = self.tree.get_mut(*id) {
                node.previous = node.position;
            }
        }

        self.passes += 1;
        debug!(
            "Render pass {}: {} visible, {} entered, {} updated, {} exited",
            self.passes,
            visible.len(),
            summary.entered,
            summary.updated,
            summary.exited
        );
        summary
    }

    /// Drop glyphs whose exit finished. Returns true while anything is
    /// still animating.
    pub fn advance(&mut self) -> bool {
        let now = self.clock.now();
        let moving = self.scene.prune(now);
        moving || !self.hint.is_finished(now)
    }

    /// The diagram as it should be drawn at the current instant.
    pub fn frame(&self) -> Frame {
        let now = self.clock.now();
        let mut frame = self.scene.frame(&self.config, now);
        let opacity = self.hint.value_at(now);
        if opacity > 0.0 {
            frame.hint = Some(HintFrame {
                text: self.config.hint_text.clone(),
                position: self.config.hint_position(),
                opacity,
            });
        }
        frame
    }

    /// Glyphs currently on screen, exiting ones included.
    pub fn rendered_ids(&self) -> Vec<NodeId> {
        self.scene.node_ids()
    }

    fn is_visible(&self, id: NodeId) -> bool {
        let mut current = id;
        while let Some(parent) = self.tree.get(current).and_then(RenderNode::parent) {
            let Some(parent_node) = self.tree.get(parent) else { return false };
            if !parent_node.children().visible().contains(&current) {
                return false;
            }
            current = parent;
        }
        true
    }
}

impl Drop for TreeRenderer {
    fn drop(&mut self) {
        debug!(
            "Unmounting tree from surface '{}' ({} nodes)",
            self.surface.id,
            self.tree.len()
        );
    }
}
