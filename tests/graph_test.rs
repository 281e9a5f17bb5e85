//! Tests for the dot graph exporter

use akin::domain::codec;
use akin::domain::{Answer, DecisionTree, NodeValue};
use akin::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const ANIMALS_BASE: &str = "\
?Is it alive??
  'Rock'
  ?Does it bark??
    'Cat'
    'Dog'
";

#[test]
fn given_tree_when_exporting_then_vertices_and_edges_are_declared() {
    let tree = codec::parse(ANIMALS_BASE).unwrap();

    let dot = tree.export_graph();

    assert!(dot.starts_with("digraph base {"));
    assert!(dot.trim_end().ends_with('}'));
    assert!(dot.contains("rankdir = LR;"));
    // One declaration per vertex, one edge per child link
    assert_eq!(dot.matches("fillcolor=").count(), 5);
    assert_eq!(dot.matches("[label=\"No\"]").count(), 2);
    assert_eq!(dot.matches("[label=\"Yes\"]").count(), 2);
}

#[test]
fn given_tree_when_exporting_then_styles_distinguish_characters_from_features() {
    let tree = codec::parse(ANIMALS_BASE).unwrap();

    let dot = tree.export_graph();

    assert_eq!(dot.matches("fillcolor=orange").count(), 3);
    assert_eq!(dot.matches("fillcolor=lightskyblue").count(), 2);
    assert!(dot.contains("label=\"Is it alive?\""));
    assert!(dot.contains("label=\"Rock\""));
}

#[test]
fn given_tree_when_exporting_then_preorder_declares_left_subtree_first() {
    let tree = codec::parse(ANIMALS_BASE).unwrap();

    let dot = tree.export_graph();

    let root_pos = dot.find("label=\"Is it alive?\"").unwrap();
    let rock_pos = dot.find("label=\"Rock\"").unwrap();
    let bark_pos = dot.find("label=\"Does it bark?\"").unwrap();
    assert!(root_pos < rock_pos);
    assert!(rock_pos < bark_pos);
}

#[test]
fn given_named_tree_when_exporting_then_graph_label_carries_the_name() {
    let mut tree = codec::parse(ANIMALS_BASE).unwrap();
    tree.set_name("animals");

    let dot = tree.export_graph();

    assert!(dot.contains("label = \"base: animals\";"));
}

#[test]
fn given_unmutated_tree_when_exporting_twice_then_output_is_identical() {
    let tree = codec::parse(ANIMALS_BASE).unwrap();

    assert_eq!(tree.export_graph(), tree.export_graph());
}

#[test]
fn given_equal_labels_when_exporting_then_vertices_stay_distinct() {
    // Vertices are keyed by arena slot, so two nodes with the same text do
    // not collapse into one
    let mut tree = DecisionTree::new("twins");
    let root = tree
        .arena
        .insert_node(NodeValue::Feature("Is it alive?".into()), None);
    tree.arena
        .insert_node(NodeValue::Character("Twin".into()), Some((root, Answer::No)));
    tree.arena
        .insert_node(NodeValue::Character("Twin".into()), Some((root, Answer::Yes)));

    let dot = tree.export_graph();

    assert_eq!(dot.matches("label=\"Twin\"").count(), 2);
}

#[test]
fn given_quotes_in_values_when_exporting_then_labels_are_escaped() {
    let mut tree = DecisionTree::new("quoted");
    tree.arena
        .insert_node(NodeValue::Character("The \"Rock\"".into()), None);

    let dot = tree.export_graph();

    assert!(dot.contains("label=\"The \\\"Rock\\\"\""));
}

#[test]
fn given_empty_tree_when_exporting_then_only_header_and_footer_remain() {
    let tree = DecisionTree::new("empty");

    let dot = tree.export_graph();

    assert!(dot.contains("digraph base {"));
    assert!(!dot.contains("fillcolor"));
}
