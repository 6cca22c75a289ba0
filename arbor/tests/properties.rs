use std::collections::BTreeMap;
use std::time::Duration;

use proptest::prelude::*;

use arbor::{
    layout, IdAllocator, LayoutSize, ManualClock, NodeState, Point, RenderTree, RendererConfig,
    Surface, TreeNode, TreeRenderer,
};

fn tree_strategy() -> impl Strategy<Value = TreeNode> {
    let leaf = "[a-e]{1,3}".prop_map(TreeNode::leaf);
    leaf.prop_recursive(4, 40, 4, |inner| {
        ("[a-e]{1,3}", prop::collection::vec(inner, 0..4))
            .prop_map(|(name, children)| TreeNode::with_children(name, children))
    })
}

fn mount(data: &TreeNode) -> (TreeRenderer, ManualClock) {
    let clock = ManualClock::new();
    let renderer = TreeRenderer::new(
        data,
        Surface::new("vis_1", 780.0, 450.0),
        RendererConfig::default(),
        IdAllocator::new(),
        clock.clone(),
    );
    (renderer, clock)
}

fn preorder(node: &TreeNode) -> Vec<&TreeNode> {
    let mut out = vec![node];
    for child in &node.children {
        out.extend(preorder(child));
    }
    out
}

/// Every payload leaf, and only those, renders in the `Leaf` state.
fn assert_leaves_match(renderer: &TreeRenderer, data: &TreeNode) -> Result<(), TestCaseError> {
    let ids = renderer.tree().all();
    let payload = preorder(data);
    prop_assert_eq!(ids.len(), payload.len());
    for (id, node) in ids.into_iter().zip(payload) {
        let is_leaf_state = renderer.state(id) == Some(NodeState::Leaf);
        prop_assert_eq!(is_leaf_state, node.is_leaf(), "{}", node.name);
    }
    Ok(())
}

proptest! {
    #[test]
    fn initial_render_shows_root_and_direct_children(data in tree_strategy()) {
        let (renderer, _) = mount(&data);
        prop_assert_eq!(renderer.visible_ids().len(), 1 + data.children.len());
        prop_assert_eq!(renderer.tree().len(), data.count());
    }

    #[test]
    fn layout_respects_depth_and_order(data in tree_strategy(), breadth in 100.0f64..2000.0) {
        let mut ids = IdAllocator::new();
        let tree = RenderTree::build(&data, &mut ids, Point::default());
        let result = layout(&tree, LayoutSize { breadth, depth_spacing: 180.0 });
        prop_assert_eq!(result.len(), data.count());

        let mut rows: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
        for id in tree.visible() {
            let node = tree.get(id).unwrap();
            let point = result[&id];
            prop_assert_eq!(point.x, node.depth() as f64 * 180.0);
            prop_assert!(point.y >= -1e-9 && point.y <= breadth + 1e-9);
            rows.entry(node.depth()).or_default().push(point.y);
        }
        for ys in rows.values() {
            for pair in ys.windows(2) {
                prop_assert!(pair[1] > pair[0] - 1e-9);
            }
        }
    }

    #[test]
    fn activation_keeps_tree_consistent(
        data in tree_strategy(),
        clicks in prop::collection::vec(0usize..64, 0..20),
    ) {
        let (mut renderer, clock) = mount(&data);
        let total = renderer.tree().len();
        assert_leaves_match(&renderer, &data)?;

        for click in clicks {
            let all = renderer.tree().all();
            let target = all[click % all.len()];
            renderer.on_node_activate(target);
            clock.advance(Duration::from_millis(100));
            renderer.advance();

            prop_assert_eq!(renderer.tree().len(), total);
            for id in renderer.visible_ids() {
                let node = renderer.node(id).unwrap();
                if let Some(parent) = node.parent() {
                    prop_assert_eq!(renderer.state(parent), Some(NodeState::Expanded));
                }
            }
        }

        assert_leaves_match(&renderer, &data)?;

        clock.advance(Duration::from_millis(750));
        prop_assert!(!renderer.advance());
        let mut visible = renderer.visible_ids();
        visible.sort();
        prop_assert_eq!(renderer.rendered_ids(), visible);
    }

    #[test]
    fn toggle_twice_is_identity(data in tree_strategy(), pick in 0usize..64) {
        let (mut renderer, _) = mount(&data);
        let visible = renderer.visible_ids();
        let target = visible[pick % visible.len()];
        prop_assume!(Some(target) != renderer.root_id());

        let before = renderer.visible_ids();
        renderer.on_node_activate(target);
        renderer.on_node_activate(target);
        prop_assert_eq!(renderer.visible_ids(), before);
    }

    #[test]
    fn set_data_with_same_payload_keeps_identity(data in tree_strategy()) {
        let (mut renderer, _) = mount(&data);
        let before = renderer.tree().all();
        renderer.set_data(Some(&data));
        prop_assert_eq!(renderer.tree().all(), before);
    }
}
