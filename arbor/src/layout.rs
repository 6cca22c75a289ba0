//! Tidy tree layout.
//!
//! Walker's algorithm in the linear-time formulation of Buchheim, Jünger and
//! Leipert: a bottom-up walk assigns preliminary breadth coordinates by
//! pushing subtree contours apart, a top-down walk accumulates modifiers into
//! final coordinates. Siblings sit one unit apart, cousins two, and every
//! parent is centered over its children.
//!
//! The unit coordinates are then scaled into `[0, breadth]` leaving half a
//! separation of margin at both extremes, and depth is mapped to a fixed
//! horizontal spacing.

use std::collections::HashMap;

use crate::geometry::Point;
use crate::identity::NodeId;
use crate::tree::RenderTree;

pub type LayoutResult = HashMap<NodeId, Point>;

/// Extent of the layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSize {
    /// Vertical extent the breadth coordinates are scaled into.
    pub breadth: f64,
    /// Horizontal distance between consecutive depths.
    pub depth_spacing: f64,
}

#[derive(Debug)]
struct Slot {
    node: Option<NodeId>,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Position among siblings.
    index: usize,
    depth: usize,
    default_ancestor: Option<usize>,
    ancestor: usize,
    prelim: f64,
    modifier: f64,
    change: f64,
    shift: f64,
    thread: Option<usize>,
    x: f64,
}

impl Slot {
    fn new(node: Option<NodeId>, parent: Option<usize>, index: usize, depth: usize, me: usize) -> Self {
        Self {
            node,
            parent,
            children: Vec::new(),
            index,
            depth,
            default_ancestor: None,
            ancestor: me,
            prelim: 0.0,
            modifier: 0.0,
            change: 0.0,
            shift: 0.0,
            thread: None,
            x: 0.0,
        }
    }
}

/// Lay out the visible part of `tree`.
pub fn layout(tree: &RenderTree, size: LayoutSize) -> LayoutResult {
    let mut result = LayoutResult::new();
    let Some(root) = tree.root() else { return result };

    let mut walker = Walker::new(tree, root);
    walker.run();

    let slots = &walker.slots;
    // Slot 0 is the virtual parent of the root.
    let real = 1..slots.len();
    let (mut left, mut right) = (1, 1);
    for i in real.clone() {
        if slots[i].x < slots[left].x {
            left = i;
        }
        if slots[i].x > slots[right].x {
            right = i;
        }
    }

    let s = if left == right {
        1.0
    } else {
        walker.separation(left, right) / 2.0
    };
    let tx = s - slots[left].x;
    let kx = size.breadth / (slots[right].x + s + tx);

    for i in real {
        let Some(id) = slots[i].node else { continue };
        let breadth = (slots[i].x + tx) * kx;
        let offset = slots[i].depth as f64 * size.depth_spacing;
        result.insert(id, Point::new(offset, breadth));
    }
    result
}

struct Walker {
    slots: Vec<Slot>,
}

impl Walker {
    fn new(tree: &RenderTree, root: NodeId) -> Self {
        let mut slots = vec![Slot::new(None, None, 0, 0, 0)];
        slots.push(Slot::new(Some(root), Some(0), 0, 0, 1));
        slots[0].children.push(1);

        let mut stack = vec![1];
        while let Some(slot) = stack.pop() {
            let Some(id) = slots[slot].node else { continue };
            let Some(node) = tree.get(id) else { continue };
            let depth = slots[slot].depth + 1;
            for (index, child) in node.children().visible().iter().enumerate() {
                let me = slots.len();
                slots.push(Slot::new(Some(*child), Some(slot), index, depth, me));
                slots[slot].children.push(me);
                stack.push(me);
            }
        }
        Self { slots }
    }

    fn run(&mut self) {
        for v in self.post_order() {
            self.first_walk(v);
        }
        self.slots[0].modifier = -self.slots[1].prelim;
        for v in self.pre_order() {
            self.second_walk(v);
        }
    }

    fn pre_order(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.slots.len());
        let mut stack = vec![1];
        while let Some(v) = stack.pop() {
            out.push(v);
            stack.extend(self.slots[v].children.iter().rev());
        }
        out
    }

    fn post_order(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.slots.len());
        let mut stack = vec![1];
        while let Some(v) = stack.pop() {
            out.push(v);
            stack.extend(self.slots[v].children.iter());
        }
        out.reverse();
        out
    }

    fn separation(&self, a: usize, b: usize) -> f64 {
        if self.slots[a].parent == self.slots[b].parent {
            1.0
        } else {
            2.0
        }
    }

    fn parent(&self, v: usize) -> usize {
        self.slots[v].parent.unwrap_or(0)
    }

    fn next_left(&self, v: usize) -> Option<usize> {
        self.slots[v]
            .children
            .first()
            .copied()
            .or(self.slots[v].thread)
    }

    fn next_right(&self, v: usize) -> Option<usize> {
        self.slots[v]
            .children
            .last()
            .copied()
            .or(self.slots[v].thread)
    }

    fn first_walk(&mut self, v: usize) {
        let parent = self.parent(v);
        let index = self.slots[v].index;
        let w = (index > 0).then(|| self.slots[parent].children[index - 1]);

        if let (Some(&first), Some(&last)) =
            (self.slots[v].children.first(), self.slots[v].children.last())
        {
            self.execute_shifts(v);
            let midpoint = (self.slots[first].prelim + self.slots[last].prelim) / 2.0;
            match w {
                Some(w) => {
                    self.slots[v].prelim = self.slots[w].prelim + self.separation(v, w);
                    self.slots[v].modifier = self.slots[v].prelim - midpoint;
                }
                None => self.slots[v].prelim = midpoint,
            }
        } else if let Some(w) = w {
            self.slots[v].prelim = self.slots[w].prelim + self.separation(v, w);
        }

        let ancestor = self.slots[parent]
            .default_ancestor
            .unwrap_or(self.slots[parent].children[0]);
        let ancestor = self.apportion(v, w, ancestor);
        self.slots[parent].default_ancestor = Some(ancestor);
    }

    fn second_walk(&mut self, v: usize) {
        let parent_modifier = self.slots[self.parent(v)].modifier;
        self.slots[v].x = self.slots[v].prelim + parent_modifier;
        self.slots[v].modifier += parent_modifier;
    }

    fn apportion(&mut self, v: usize, w: Option<usize>, mut ancestor: usize) -> usize {
        let Some(w) = w else { return ancestor };

        let mut vip = Some(v);
        let mut vop = v;
        let mut vim = Some(w);
        let mut vom = self.slots[self.parent(v)].children[0];
        let mut sip = self.slots[v].modifier;
        let mut sop = self.slots[v].modifier;
        let mut sim = self.slots[w].modifier;
        let mut som = self.slots[vom].modifier;

        loop {
            vim = vim.and_then(|n| self.next_right(n));
            vip = vip.and_then(|n| self.next_left(n));
            let (Some(im), Some(ip)) = (vim, vip) else { break };

            vom = self.next_left(vom).unwrap_or(vom);
            vop = self.next_right(vop).unwrap_or(vop);
            self.slots[vop].ancestor = v;

            let shift = self.slots[im].prelim + sim - self.slots[ip].prelim - sip
                + self.separation(im, ip);
            if shift > 0.0 {
                let from = self.next_ancestor(im, v, ancestor);
                self.move_subtree(from, v, shift);
                sip += shift;
                sop += shift;
            }

            sim += self.slots[im].modifier;
            sip += self.slots[ip].modifier;
            som += self.slots[vom].modifier;
            sop += self.slots[vop].modifier;
        }

        if let Some(im) = vim {
            if self.next_right(vop).is_none() {
                self.slots[vop].thread = Some(im);
                self.slots[vop].modifier += sim - sop;
            }
        }
        if let Some(ip) = vip {
            if self.next_left(vom).is_none() {
                self.slots[vom].thread = Some(ip);
                self.slots[vom].modifier += sip - som;
                ancestor = v;
            }
        }
        ancestor
    }

    fn next_ancestor(&self, vim: usize, v: usize, ancestor: usize) -> usize {
        let candidate = self.slots[vim].ancestor;
        if self.slots[candidate].parent == self.slots[v].parent {
            candidate
        } else {
            ancestor
        }
    }

    fn move_subtree(&mut self, wm: usize, wp: usize, shift: f64) {
        let span = (self.slots[wp].index - self.slots[wm].index) as f64;
        let change = shift / span;
        self.slots[wp].change -= change;
        self.slots[wp].shift += shift;
        self.slots[wm].change += change;
        self.slots[wp].prelim += shift;
        self.slots[wp].modifier += shift;
    }

    fn execute_shifts(&mut self, v: usize) {
        let mut shift = 0.0;
        let mut change = 0.0;
        let children = self.slots[v].children.clone();
        for w in children.into_iter().rev() {
            self.slots[w].prelim += shift;
            self.slots[w].modifier += shift;
            change += self.slots[w].change;
            shift += self.slots[w].shift + change;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_order_visits_left_subtree_first() {
        use crate::data::TreeNode;
        use crate::identity::IdAllocator;

        let data = TreeNode::with_children(
            "r",
            vec![
                TreeNode::with_children("a", vec![TreeNode::leaf("a1")]),
                TreeNode::leaf("b"),
            ],
        );
        let mut ids = IdAllocator::new();
        let tree = RenderTree::build(&data, &mut ids, Point::default());
        let walker = Walker::new(&tree, tree.root().unwrap());
        let labels: Vec<_> = walker
            .post_order()
            .into_iter()
            .filter_map(|s| walker.slots[s].node)
            .filter_map(|id| tree.get(id))
            .map(|n| n.label().to_string())
            .collect();
        assert_eq!(labels, ["a1", "a", "b", "r"]);
    }
}
