//! Vertical diagram rendering

mod common;

use gentree::tree_traits::TreeNodeConvert;
use gentree::{render, Tree, EMPTY_TREE_MARKER};
use rstest::rstest;

fn scenario() -> Tree<&'static str> {
    let mut tree = Tree::new();
    let a = tree.create_root("A").unwrap();
    let b = a.add_child("B").unwrap();
    a.add_child("C").unwrap();
    a.add_child("D").unwrap();
    b.add_child("E").unwrap();
    tree
}

#[test]
fn given_empty_tree_when_rendering_then_marker() {
    let tree: Tree<&str> = Tree::new();
    assert_eq!(render(&tree), format!("{}\n", EMPTY_TREE_MARKER));
}

#[rstest]
#[case("X")]
#[case("a longer label")]
fn given_single_root_when_rendering_then_one_unindented_line(#[case] label: &'static str) {
    let tree = Tree::with_root(label);
    let out = render(&tree);
    assert_eq!(out.lines().collect::<Vec<_>>(), vec![label]);
}

#[test]
fn given_scenario_when_rendering_then_children_in_order() {
    let expected = "\
A
|
|_ B
|  |
|  |_ E
|
|_ C
|
|_ D
";
    assert_eq!(render(&scenario()), expected);
}

#[test]
fn given_scenario_when_deleting_b_and_compressing_then_c_before_d() {
    let mut tree = scenario();
    let b = tree.root().unwrap().live_children()[0].clone();
    tree.delete_subtree(&b).unwrap();
    tree.compress().unwrap();

    assert_eq!(render(&tree), "A\n|\n|_ C\n|\n|_ D\n");
}

#[test]
fn given_scenario_when_children_below_c_and_d_then_only_c_trails_a_connector() {
    let mut tree = scenario();
    let a = tree.root().unwrap();
    let b = a.live_children()[0].clone();
    tree.delete_subtree(&b).unwrap();
    tree.compress().unwrap();
    let children = a.live_children();
    children[0].add_child("F").unwrap();
    children[1].add_child("G").unwrap();

    let expected = "\
A
|
|_ C
|  |
|  |_ F
|
|_ D
   |
   |_ G
";
    assert_eq!(render(&tree), expected);
}

#[test]
fn given_deep_rightmost_chain_when_rendering_then_blank_trailing_columns() {
    let tree = Tree::with_root("R");
    let r = tree.root().unwrap();
    let x = r.add_child("X").unwrap();
    let y = r.add_child("Y").unwrap();
    x.add_child("X1").unwrap();
    y.add_child("Y1").unwrap().add_child("Y2").unwrap();

    let expected = "\
R
|
|_ X
|  |
|  |_ X1
|
|_ Y
   |
   |_ Y1
      |
      |_ Y2
";
    assert_eq!(render(&tree), expected);
}

#[test]
fn given_uncompressed_tombstone_when_rendering_then_null_marker() {
    let mut tree = scenario();
    let d = tree.root().unwrap().live_children()[2].clone();
    tree.delete_subtree(&d).unwrap();

    let out = render(&tree);
    assert!(out.ends_with("|_ C\n|\n|_ [null]\n"), "{}", out);
}

#[test]
fn given_debug_messages_when_rendering_then_flat_listing() {
    common::init();
    let mut tree = scenario();
    tree.set_debug_messages(true);
    assert_eq!(
        render(&tree),
        "Depth: 0 Data: A\nDepth: 1 Data: B\nDepth: 2 Data: E\nDepth: 1 Data: C\nDepth: 1 Data: D\n"
    );
}

#[test]
fn given_tree_when_printing_then_same_as_render() {
    let tree = scenario();
    let mut buf = Vec::new();
    tree.print(&mut buf).unwrap();
    assert_eq!(String::from_utf8(buf).unwrap(), render(&tree));
    assert_eq!(format!("{}", tree), render(&tree));
}

#[test]
fn given_scenario_when_converting_to_termtree_then_same_shape() {
    let tree = scenario();
    let tt = tree.to_tree_string();
    assert_eq!(tt.root, "A");
    let leaves: Vec<&str> = tt.leaves.iter().map(|l| l.root.as_str()).collect();
    assert_eq!(leaves, vec!["B", "C", "D"]);
    assert_eq!(tt.leaves[0].leaves[0].root, "E");
}
