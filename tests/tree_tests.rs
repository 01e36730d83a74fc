mod common;

use common::{call, leaf, random_tree, root};
use lua_profile_viewer::parser::{parse_profile_value, NodeId, ProfileTree};
use lua_profile_viewer::tree::{build, TreeBuilder, TreeEvent};
use pretty_assertions::assert_eq;

/// Recursive reference walk, fine for the small trees used here
fn reference_preorder(tree: &ProfileTree, id: NodeId, out: &mut Vec<String>) {
    let node = tree.node(id).unwrap();
    out.push(node.function_name.clone());
    for child in node.child_ids() {
        reference_preorder(tree, *child, out);
    }
}

#[test]
fn test_one_enter_per_node_and_balanced_exits() {
    for seed in 0..20 {
        let tree = parse_profile_value(&random_tree(seed, 60)).unwrap();

        let mut enters = 0;
        let mut open_levels: i64 = 0;
        let mut current_depth = 0usize;

        for event in build(&tree) {
            match event {
                TreeEvent::Enter { node, depth, .. } => {
                    enters += 1;
                    assert!(depth <= current_depth);
                    current_depth = depth;
                    if node.has_children_field() {
                        open_levels += 1;
                        current_depth = depth + 1;
                    }
                }
                TreeEvent::Exit { depth } => {
                    assert_eq!(depth, current_depth);
                    open_levels -= 1;
                    current_depth -= 1;
                }
            }
            assert!(open_levels >= 0);
        }

        assert_eq!(enters, tree.len());
        assert_eq!(open_levels, 0);
        assert_eq!(current_depth, 0);
    }
}

#[test]
fn test_enter_order_is_preorder() {
    for seed in 100..110 {
        let tree = parse_profile_value(&random_tree(seed, 40)).unwrap();

        let mut expected = Vec::new();
        reference_preorder(&tree, tree.root_id(), &mut expected);

        let actual: Vec<String> = build(&tree)
            .filter_map(|event| match event {
                TreeEvent::Enter { node, .. } => Some(node.function_name.clone()),
                TreeEvent::Exit { .. } => None,
            })
            .collect();

        assert_eq!(actual, expected);
    }
}

#[test]
fn test_siblings_keep_report_order() {
    let doc = root(vec![
        call("a", "lua:a:1", 1, vec![leaf("a1", "lua:a1:1", 1, 1), leaf("a2", "lua:a2:1", 1, 1)]),
        leaf("b", "lua:b:1", 1, 1),
        leaf("c", "lua:c:1", 1, 1),
    ]);
    let tree = parse_profile_value(&doc).unwrap();

    let names: Vec<_> = build(&tree)
        .filter(TreeEvent::is_enter)
        .map(|event| match event {
            TreeEvent::Enter { node, depth, .. } => format!("{}:{}", node.function_name, depth),
            TreeEvent::Exit { .. } => unreachable!(),
        })
        .collect();

    assert_eq!(names, vec!["root:0", "a:1", "a1:2", "a2:2", "b:1", "c:1"]);
}

#[test]
fn test_deep_chain_does_not_overflow() {
    let depth = 100_000;
    let mut tree = ProfileTree::new(parse_profile_value(&root(vec![])).unwrap().root().clone());
    let mut parent = tree.root_id();
    for i in 0..depth {
        let mut node = tree.root().clone();
        node.function_name = format!("f{}", i);
        node.children = None;
        parent = tree.push_child(parent, node);
    }

    let mut max_depth = 0;
    let mut exits = 0;
    for event in TreeBuilder::new(&tree).build() {
        match event {
            TreeEvent::Enter { depth, .. } => max_depth = max_depth.max(depth),
            TreeEvent::Exit { .. } => exits += 1,
        }
    }

    assert_eq!(max_depth, depth);
    assert_eq!(exits, depth);
}
