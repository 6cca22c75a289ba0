//! Enter/update/exit reconciliation of drawn glyphs.
//!
//! The scene holds what is currently on screen, which is not the same as
//! what is visible in the tree: glyphs of hidden nodes linger while their
//! exit transition plays. Every pass matches glyphs to visible nodes by
//! [`NodeId`]; links are keyed by their child's id.

use std::collections::{BTreeMap, HashSet};
use std::time::Instant;

use crate::animation::Tween;
use crate::config::RendererConfig;
use crate::geometry::{Diagonal, Point};
use crate::identity::NodeId;
use crate::tree::RenderTree;
use crate::types::Rgb;

/// Motion of the node that triggered a pass.
///
/// Entering glyphs grow out of `from`; exiting glyphs converge on `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceMotion {
    pub from: Point,
    pub to: Point,
}

/// Which side of the node its label is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    /// Text ends left of the node. Used for nodes with children.
    End,
    /// Text starts right of the node. Used for leaves.
    Start,
}

#[derive(Debug, Clone)]
struct NodeGlyph {
    label: String,
    center: Tween<Point>,
    radius: Tween<f64>,
    fill: Tween<Rgb>,
    label_opacity: Tween<f64>,
    anchor: LabelAnchor,
    clickable: bool,
    is_root: bool,
    exiting: bool,
}

impl NodeGlyph {
    fn is_finished(&self, now: Instant) -> bool {
        self.center.is_finished(now)
            && self.radius.is_finished(now)
            && self.fill.is_finished(now)
            && self.label_opacity.is_finished(now)
    }
}

#[derive(Debug, Clone)]
struct LinkGlyph {
    child_end: Tween<Point>,
    parent_end: Tween<Point>,
    exiting: bool,
}

impl LinkGlyph {
    fn is_finished(&self, now: Instant) -> bool {
        self.child_end.is_finished(now) && self.parent_end.is_finished(now)
    }
}

/// A node as it should be drawn right now.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeFrame {
    pub id: NodeId,
    pub label: String,
    pub center: Point,
    pub radius: f64,
    pub fill: Rgb,
    pub anchor: LabelAnchor,
    /// Signed horizontal distance from the center to the label.
    pub label_dx: f64,
    pub label_opacity: f64,
    /// Pointer affordance: activating this node does something.
    pub clickable: bool,
    pub is_root: bool,
    pub exiting: bool,
}

/// A connector as it should be drawn right now.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkFrame {
    /// Id of the child end; links are keyed by it.
    pub child: NodeId,
    pub path: Diagonal,
    pub exiting: bool,
}

/// The fading "return" hint shown while the root is hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct HintFrame {
    pub text: String,
    pub position: Point,
    pub opacity: f64,
}

/// Everything to draw for one instant, links first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub links: Vec<LinkFrame>,
    pub nodes: Vec<NodeFrame>,
    pub hint: Option<HintFrame>,
}

impl Frame {
    pub fn node(&self, id: NodeId) -> Option<&NodeFrame> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// Counts of what a pass did, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassSummary {
    pub entered: usize,
    pub updated: usize,
    pub exited: usize,
}

#[derive(Debug, Default)]
pub struct Scene {
    nodes: BTreeMap<NodeId, NodeGlyph>,
    links: BTreeMap<NodeId, LinkGlyph>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids of every node glyph on screen, exiting ones included.
    pub fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.keys().copied().collect()
    }

    /// Match glyphs against the `visible` nodes of `tree`, whose positions
    /// must already hold the new layout.
    pub fn reconcile(
        &mut self,
        tree: &RenderTree,
        visible: &[NodeId],
        source: SourceMotion,
        config: &RendererConfig,
        now: Instant,
    ) -> PassSummary {
        let transition = config.transition();
        let live: HashSet<NodeId> = visible.iter().copied().collect();
        let mut summary = PassSummary::default();

        for id in visible {
            let Some(node) = tree.get(*id) else { continue };
            let target = node.position();
            let fill = if node.has_hidden_children() {
                config.collapsed_fill
            } else {
                config.expanded_fill
            };
            let anchor = if node.has_children() {
                LabelAnchor::End
            } else {
                LabelAnchor::Start
            };
            let clickable = node.is_root() || node.has_children();

            match self.nodes.get_mut(id) {
                Some(glyph) => {
                    glyph.center.retarget(target, now, transition);
                    glyph.radius.retarget(config.node_radius, now, transition);
                    glyph.fill.set(fill, now);
                    glyph.label_opacity.retarget(1.0, now, transition);
                    glyph.label = node.label().to_string();
                    glyph.anchor = anchor;
                    glyph.clickable = clickable;
                    glyph.is_root = node.is_root();
                    glyph.exiting = false;
                    summary.updated += 1;
                }
                None => {
                    self.nodes.insert(
                        *id,
                        NodeGlyph {
                            label: node.label().to_string(),
                            center: Tween::new(source.from, target, now, transition),
                            radius: Tween::settled(config.node_radius, now),
                            fill: Tween::settled(fill, now),
                            label_opacity: Tween::settled(1.0, now),
                            anchor,
                            clickable,
                            is_root: node.is_root(),
                            exiting: false,
                        },
                    );
                    summary.entered += 1;
                }
            }

            let Some(parent) = node.parent().and_then(|p| tree.get(p)) else { continue };
            let parent_target = parent.position();
            match self.links.get_mut(id) {
                Some(link) => {
                    link.child_end.retarget(target, now, transition);
                    link.parent_end.retarget(parent_target, now, transition);
                    link.exiting = false;
                }
                None => {
                    self.links.insert(
                        *id,
                        LinkGlyph {
                            child_end: Tween::new(source.from, target, now, transition),
                            parent_end: Tween::new(source.from, parent_target, now, transition),
                            exiting: false,
                        },
                    );
                }
            }
        }

        for (id, glyph) in self.nodes.iter_mut().filter(|(id, _)| !live.contains(*id)) {
            glyph.center.retarget(source.to, now, transition);
            glyph.radius.retarget(0.0, now, transition);
            glyph.label_opacity.retarget(0.0, now, transition);
            if !glyph.exiting {
                log::trace!("{id} exiting");
                glyph.exiting = true;
                summary.exited += 1;
            }
        }

        // A link leaves when its child does, or when the child became the root.
        let linked: HashSet<NodeId> = visible
            .iter()
            .filter(|id| tree.get(**id).is_some_and(|n| !n.is_root()))
            .copied()
            .collect();
        for (_, link) in self.links.iter_mut().filter(|(id, _)| !linked.contains(*id)) {
            link.child_end.retarget(source.to, now, transition);
            link.parent_end.retarget(source.to, now, transition);
            link.exiting = true;
        }

        summary
    }

    /// Drop exiting glyphs whose transitions have finished. Returns true
    /// while anything is still moving.
    pub fn prune(&mut self, now: Instant) -> bool {
        self.nodes.retain(|_, g| !(g.exiting && g.is_finished(now)));
        self.links.retain(|_, l| !(l.exiting && l.is_finished(now)));
        self.nodes.values().any(|g| !g.is_finished(now))
            || self.links.values().any(|l| !l.is_finished(now))
    }

    /// Interpolated state at `now`.
    pub fn frame(&self, config: &RendererConfig, now: Instant) -> Frame {
        let links = self
            .links
            .iter()
            .map(|(id, link)| LinkFrame {
                child: *id,
                path: Diagonal::new(link.child_end.value_at(now), link.parent_end.value_at(now)),
                exiting: link.exiting,
            })
            .collect();

        let nodes = self
            .nodes
            .iter()
            .map(|(id, glyph)| NodeFrame {
                id: *id,
                label: glyph.label.clone(),
                center: glyph.center.value_at(now),
                radius: glyph.radius.value_at(now),
                fill: glyph.fill.value_at(now),
                anchor: glyph.anchor,
                label_dx: match glyph.anchor {
                    LabelAnchor::End => -config.label_offset,
                    LabelAnchor::Start => config.label_offset,
                },
                label_opacity: glyph.label_opacity.value_at(now),
                clickable: glyph.clickable && !glyph.exiting,
                is_root: glyph.is_root,
                exiting: glyph.exiting,
            })
            .collect();

        Frame {
            links,
            nodes,
            hint: None,
        }
    }
}
