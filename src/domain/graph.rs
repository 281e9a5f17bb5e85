//! Graphviz dot export of a tree.
//!
//! Pure text projection: running `dot` on it is the caller's business.

use tracing::instrument;

use crate::domain::tree::DecisionTree;

/// Render the tree as a directed graph: one declaration per vertex, one edge
/// per child link labeled `No`/`Yes`, in preorder (node, left subtree, right
/// subtree).
///
/// Vertices are keyed by arena slot, not by label, so two nodes with equal
/// text stay distinct in the graph. Characters are filled orange, features
/// light blue. Deterministic for an unmutated tree.
#[instrument(level = "debug", skip(tree))]
pub fn export(tree: &DecisionTree) -> String {
    let mut out = String::from("digraph base {\n");
    out.push_str("    rankdir = LR;\n");
    out.push_str("    node [shape=box, style=filled, color=black];\n");

    if let Some(root) = tree.arena.root() {
        let mut stack = vec![root];
        while let Some(idx) = stack.pop() {
            let Some(node) = tree.arena.get_node(idx) else {
                continue;
            };
            let fill = if node.is_leaf() {
                "orange"
            } else {
                "lightskyblue"
            };
            out.push_str(&format!(
                "    {} [fillcolor={}, label=\"{}\"];\n",
                node_id(idx),
                fill,
                escape(node.value.text())
            ));
            if let Some(left) = node.left {
                out.push_str(&format!(
                    "    {} -> {} [label=\"No\"];\n",
                    node_id(idx),
                    node_id(left)
                ));
            }
            if let Some(right) = node.right {
                out.push_str(&format!(
                    "    {} -> {} [label=\"Yes\"];\n",
                    node_id(idx),
                    node_id(right)
                ));
            }
            if let Some(right) = node.right {
                stack.push(right);
            }
            if let Some(left) = node.left {
                stack.push(left);
            }
        }
    }

    out.push_str("    labelloc = \"t\";\n");
    out.push_str(&format!("    label = \"base: {}\";\n", escape(tree.name())));
    out.push_str("}\n");
    out
}

fn node_id(idx: generational_arena::Index) -> String {
    let (slot, _) = idx.into_raw_parts();
    format!("n{slot}")
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
