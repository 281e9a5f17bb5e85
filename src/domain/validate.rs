//! Structural validator: arity and tag consistency for every node.

use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::error::{ValidationError, ValidationKind};

/// Check that every node satisfies the structural invariants: childless
/// nodes hold characters, two-child nodes hold features, one-child nodes do
/// not exist.
///
/// Nodes are visited right-subtree-first (the same order the path finder
/// searches); the first fault aborts the pass. The error's breadcrumb lists
/// the offending node's value first and the root's last, so a root-to-fault
/// trail is the reversed breadcrumb.
#[instrument(level = "debug", skip(arena))]
pub fn validate(arena: &TreeArena) -> Result<(), ValidationError> {
    let Some(root) = arena.root() else {
        return Ok(());
    };
    let mut stack = vec![root];
    while let Some(idx) = stack.pop() {
        let Some(node) = arena.get_node(idx) else {
            continue;
        };
        let fault = match node.child_count() {
            0 if !node.value.is_character() => Some(ValidationKind::LeafTagMismatch),
            2 if !node.value.is_feature() => Some(ValidationKind::BranchTagMismatch),
            1 => Some(ValidationKind::SingleChildViolation),
            _ => None,
        };
        if let Some(kind) = fault {
            let breadcrumb = arena
                .path_from_root(idx)
                .iter()
                .rev()
                .filter_map(|&ancestor| arena.get_node(ancestor))
                .map(|node| node.value.text().to_string())
                .collect();
            return Err(ValidationError { kind, breadcrumb });
        }
        // Left pushed first so the right subtree is checked first
        if let Some(left) = node.left {
            stack.push(left);
        }
        if let Some(right) = node.right {
            stack.push(right);
        }
    }
    Ok(())
}
