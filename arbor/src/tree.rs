//! Arena of render nodes mirroring the payload tree.

use std::collections::HashMap;

use log::debug;

use crate::data::TreeNode;
use crate::geometry::Point;
use crate::identity::{IdAllocator, NodeId};
use crate::node::{Children, NodeState, RenderNode};

/// Owns every [`RenderNode`] of one render session, visible or hidden.
///
/// Nodes refer to each other by [`NodeId`]; the parent link is only used for
/// navigation.
#[derive(Debug, Default)]
pub struct RenderTree {
    nodes: HashMap<NodeId, RenderNode>,
    root: Option<NodeId>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mirror `data` with every node expanded. All nodes start at `anchor`.
    pub fn build(data: &TreeNode, ids: &mut IdAllocator, anchor: Point) -> Self {
        let mut tree = Self::new();
        let root = tree.insert_subtree(data, None, 0, ids, anchor);
        tree.root = Some(root);
        tree
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&RenderNode> {
        self.nodes.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut RenderNode> {
        self.nodes.get_mut(&id)
    }

    /// Number of retained nodes, hidden ones included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn state(&self, id: NodeId) -> Option<NodeState> {
        self.get(id).map(RenderNode::state)
    }

    /// Collapse every non-leaf node strictly below the root, so only the root
    /// and its direct children stay visible.
    pub fn collapse_below_root(&mut self) {
        let Some(root) = self.root else { return };
        let children = self
            .get(root)
            .map(|n| n.children().ids().to_vec())
            .unwrap_or_default();
        for child in children {
            self.collapse_subtree(child);
        }
    }

    /// Collapse `id` and every node below it.
    pub fn collapse_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get_mut(&current) else { continue };
            stack.extend_from_slice(node.children().ids());
            node.collapse();
        }
    }

    /// Flip a node between expanded and collapsed.
    pub(crate) fn toggle(&mut self, id: NodeId) -> Option<NodeState> {
        self.nodes.get_mut(&id).map(RenderNode::toggle)
    }

    /// Visible nodes in pre-order, root first.
    pub fn visible(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(root) = self.root else { return out };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else { continue };
            out.push(id);
            stack.extend(node.children().visible().iter().rev());
        }
        out
    }

    /// Every retained node in pre-order, hidden ones included.
    pub fn all(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(root) = self.root else { return out };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get(&id) else { continue };
            out.push(id);
            stack.extend(node.children().ids().iter().rev());
        }
        out
    }

    /// Replace the payload while keeping identities.
    ///
    /// A new node reuses the identity and expand state of the first unused
    /// old sibling with the same name; everything else is freshly allocated
    /// and starts collapsed below the root. Old nodes with no counterpart
    /// are dropped. `None` empties the tree.
    pub fn merge(&mut self, data: Option<&TreeNode>, ids: &mut IdAllocator, anchor: Point) {
        let Some(data) = data else {
            debug!("Dropping all {} render nodes", self.nodes.len());
            self.nodes.clear();
            self.root = None;
            return;
        };

        match self.root {
            Some(root) if self.get(root).is_some_and(|n| n.label() == data.name) => {
                self.merge_node(root, data, ids);
            }
            _ => {
                self.nodes.clear();
                let root = self.insert_subtree(data, None, 0, ids, anchor);
                self.root = Some(root);
                self.collapse_below_root();
            }
        }
    }

    fn merge_node(&mut self, id: NodeId, data: &TreeNode, ids: &mut IdAllocator) {
        let Some(node) = self.nodes.get(&id) else { return };
        let depth = node.depth();
        let at = node.previous();
        let old_state = node.state();
        let old_children = node.children().ids().to_vec();

        let mut used = vec![false; old_children.len()];
        let mut new_children = Vec::with_capacity(data.children.len());
        let mut fresh = Vec::new();

        for child in &data.children {
            let matched = old_children.iter().enumerate().position(|(i, old)| {
                !used[i] && self.get(*old).is_some_and(|n| n.label() == child.name)
            });
            match matched {
                Some(i) => {
                    used[i] = true;
                    self.merge_node(old_children[i], child, ids);
                    new_children.push(old_children[i]);
                }
                None => {
                    let new_id = self.insert_subtree(child, Some(id), depth + 1, ids, at);
                    fresh.push(new_id);
                    new_children.push(new_id);
                }
            }
        }

        for (i, old) in old_children.iter().enumerate() {
            if !used[i] {
                self.remove_subtree(*old);
            }
        }

        for new_id in fresh {
            self.collapse_subtree(new_id);
        }

        let children = match (new_children.is_empty(), old_state) {
            (true, _) => Children::Leaf,
            (false, NodeState::Collapsed) => Children::Collapsed(new_children),
            (false, NodeState::Expanded) => Children::Expanded(new_children),
            (false, NodeState::Leaf) if depth == 0 => Children::Expanded(new_children),
            (false, NodeState::Leaf) => Children::Collapsed(new_children),
        };
        if let Some(node) = self.nodes.get_mut(&id) {
            node.label = data.name.clone();
            node.children = children;
        }
    }

    fn insert_subtree(
        &mut self,
        data: &TreeNode,
        parent: Option<NodeId>,
        depth: usize,
        ids: &mut IdAllocator,
        at: Point,
    ) -> NodeId {
        let id = ids.next_id();
        let mut node = RenderNode::new(id, data.name.clone(), parent, depth, at);
        if !data.children.is_empty() {
            let children = data
                .children
                .iter()
                .map(|child| self.insert_subtree(child, Some(id), depth + 1, ids, at))
                .collect();
            node.children = Children::Expanded(children);
        }
        self.nodes.insert(id, node);
        id
    }

    fn remove_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.nodes.remove(&current) {
                stack.extend_from_slice(node.children().ids());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TreeNode {
        TreeNode::with_children(
            "A",
            vec![
                TreeNode::with_children("B", vec![TreeNode::leaf("D")]),
                TreeNode::leaf("C"),
            ],
        )
    }

    fn labels(tree: &RenderTree, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| tree.get(*id))
            .map(|n| n.label().to_string())
            .collect()
    }

    #[test]
    fn test_build_mirrors_payload() {
        let mut ids = IdAllocator::new();
        let tree = RenderTree::build(&sample(), &mut ids, Point::default());
        assert_eq!(tree.len(), 4);
        assert_eq!(labels(&tree, &tree.visible()), ["A", "B", "D", "C"]);
        let d = tree.visible()[2];
        assert_eq!(tree.get(d).map(|n| n.depth()), Some(2));
    }

    #[test]
    fn test_collapse_below_root_keeps_hidden_nodes() {
        let mut ids = IdAllocator::new();
        let mut tree = RenderTree::build(&sample(), &mut ids, Point::default());
        tree.collapse_below_root();
        assert_eq!(labels(&tree, &tree.visible()), ["A", "B", "C"]);
        assert_eq!(labels(&tree, &tree.all()), ["A", "B", "D", "C"]);
    }

    #[test]
    fn test_merge_drops_missing_and_adds_new() {
        let mut ids = IdAllocator::new();
        let mut tree = RenderTree::build(&sample(), &mut ids, Point::default());
        tree.collapse_below_root();
        let before = tree.all();

        let next = TreeNode::with_children(
            "A",
            vec![TreeNode::leaf("C"), TreeNode::leaf("E")],
        );
        tree.merge(Some(&next), &mut ids, Point::default());

        assert_eq!(labels(&tree, &tree.visible()), ["A", "C", "E"]);
        assert_eq!(tree.len(), 3);
        // C kept its identity
        assert!(before.contains(&tree.visible()[1]));
        assert!(!before.contains(&tree.visible()[2]));
    }
}
