use pretty_assertions::assert_eq;

use arbor::{layout, IdAllocator, LayoutSize, Point, RenderTree, TreeNode};

fn positions(data: &TreeNode, breadth: f64) -> Vec<(String, Point)> {
    let mut ids = IdAllocator::new();
    let tree = RenderTree::build(data, &mut ids, Point::default());
    let result = layout(
        &tree,
        LayoutSize {
            breadth,
            depth_spacing: 180.0,
        },
    );
    tree.visible()
        .into_iter()
        .map(|id| {
            let label = tree.get(id).map(|n| n.label().to_string()).unwrap_or_default();
            (label, result[&id])
        })
        .collect()
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

// =============================================================================
// Basic shapes
// =============================================================================

#[test]
fn test_single_node_is_centered() {
    let got = positions(&TreeNode::leaf("root"), 450.0);
    assert_eq!(got, vec![("root".to_string(), p(0.0, 225.0))]);
}

#[test]
fn test_two_leaves_split_the_breadth() {
    let data = TreeNode::with_children("r", vec![TreeNode::leaf("a"), TreeNode::leaf("b")]);
    let got = positions(&data, 450.0);
    assert_eq!(
        got,
        vec![
            ("r".to_string(), p(0.0, 225.0)),
            ("a".to_string(), p(180.0, 112.5)),
            ("b".to_string(), p(180.0, 337.5)),
        ]
    );
}

#[test]
fn test_three_levels() {
    let data = TreeNode::with_children(
        "A",
        vec![
            TreeNode::with_children("B", vec![TreeNode::leaf("D")]),
            TreeNode::leaf("C"),
        ],
    );
    let got = positions(&data, 450.0);
    assert_eq!(
        got,
        vec![
            ("A".to_string(), p(0.0, 225.0)),
            ("B".to_string(), p(180.0, 112.5)),
            ("D".to_string(), p(360.0, 112.5)),
            ("C".to_string(), p(180.0, 337.5)),
        ]
    );
}

// =============================================================================
// Separation
// =============================================================================

#[test]
fn test_cousins_are_twice_as_far_apart_as_siblings() {
    let data = TreeNode::with_children(
        "R",
        vec![
            TreeNode::with_children("X", vec![TreeNode::leaf("x1"), TreeNode::leaf("x2")]),
            TreeNode::with_children("Y", vec![TreeNode::leaf("y1"), TreeNode::leaf("y2")]),
        ],
    );
    let got = positions(&data, 600.0);
    let y = |label: &str| {
        got.iter()
            .find(|(l, _)| l == label)
            .map(|(_, p)| p.y)
            .unwrap()
    };

    assert_eq!(y("x1"), 100.0);
    assert_eq!(y("x2"), 200.0);
    assert_eq!(y("y1"), 400.0);
    assert_eq!(y("y2"), 500.0);
    // parents centered over children, root over parents
    assert_eq!(y("X"), 150.0);
    assert_eq!(y("Y"), 450.0);
    assert_eq!(y("R"), 300.0);
}

#[test]
fn test_depth_maps_to_fixed_spacing() {
    let data = TreeNode::with_children(
        "a",
        vec![TreeNode::with_children(
            "b",
            vec![TreeNode::with_children("c", vec![TreeNode::leaf("d")])],
        )],
    );
    let got = positions(&data, 100.0);
    let xs: Vec<f64> = got.iter().map(|(_, p)| p.x).collect();
    assert_eq!(xs, vec![0.0, 180.0, 360.0, 540.0]);
    // a chain is a straight line
    assert!(got.iter().all(|(_, p)| p.y == 50.0));
}

#[test]
fn test_subtrees_never_overlap() {
    // Deep left subtree next to a wide right one.
    let left = TreeNode::with_children(
        "L",
        vec![TreeNode::with_children(
            "L1",
            vec![
                TreeNode::leaf("L1a"),
                TreeNode::leaf("L1b"),
                TreeNode::leaf("L1c"),
            ],
        )],
    );
    let right = TreeNode::with_children(
        "R",
        vec![TreeNode::with_children(
            "R1",
            vec![TreeNode::leaf("R1a"), TreeNode::leaf("R1b")],
        )],
    );
    let data = TreeNode::with_children("root", vec![left, right]);
    let got = positions(&data, 1000.0);

    let mut by_depth: std::collections::BTreeMap<u64, Vec<f64>> = Default::default();
    for (_, point) in &got {
        by_depth.entry(point.x as u64).or_default().push(point.y);
    }
    for ys in by_depth.values() {
        for pair in ys.windows(2) {
            assert!(pair[1] > pair[0], "nodes at one depth must be ordered: {ys:?}");
        }
    }
}

#[test]
fn test_hidden_children_are_left_out() {
    let data = TreeNode::with_children(
        "A",
        vec![
            TreeNode::with_children("B", vec![TreeNode::leaf("D")]),
            TreeNode::leaf("C"),
        ],
    );
    let mut ids = IdAllocator::new();
    let mut tree = RenderTree::build(&data, &mut ids, Point::default());
    tree.collapse_below_root();
    let result = layout(
        &tree,
        LayoutSize {
            breadth: 450.0,
            depth_spacing: 180.0,
        },
    );
    assert_eq!(result.len(), 3);
}

#[test]
fn test_empty_tree_has_empty_layout() {
    let tree = RenderTree::new();
    let result = layout(
        &tree,
        LayoutSize {
            breadth: 450.0,
            depth_spacing: 180.0,
        },
    );
    assert!(result.is_empty());
}
