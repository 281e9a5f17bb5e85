//! The decision tree: arena storage plus a display name, with the engine
//! operations (search, mutation) callers reach for first.

use generational_arena::Index;
use tracing::instrument;

use crate::domain::arena::{NodeValue, TreeArena, TreeNode};
use crate::domain::compare::{self, ComparisonReport, FeatureClause};
use crate::domain::error::{DomainError, MutationError, ValidationError};
use crate::domain::graph;
use crate::domain::validate;

/// Binary decision tree: feature questions at inner nodes, character answers
/// at the leaves. Sole owner of its node storage; dropping the tree frees the
/// whole arena at once, no recursive teardown involved.
#[derive(Debug)]
pub struct DecisionTree {
    pub arena: TreeArena,
    name: String,
}

impl DecisionTree {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            arena: TreeArena::new(),
            name: name.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Root-first path to the first node whose value text equals `target`,
    /// or None when no node matches.
    ///
    /// Depth-first with an explicit stack, right subtree before left (the
    /// same order the validator checks). The path is rebuilt through parent
    /// links on a hit.
    #[instrument(level = "debug", skip(self))]
    pub fn find_path(&self, target: &str) -> Option<Vec<Index>> {
        let mut stack = vec![self.arena.root()?];
        while let Some(idx) = stack.pop() {
            let node = self.arena.get_node(idx)?;
            if node.value.text() == target {
                return Some(self.arena.path_from_root(idx));
            }
            // Left pushed first so the right subtree is searched first
            if let Some(left) = node.left {
                stack.push(left);
            }
            if let Some(right) = node.right {
                stack.push(right);
            }
        }
        None
    }

    /// Splice a new feature question in place of the character leaf `leaf`:
    /// the existing character becomes the "no" child, a fresh leaf holding
    /// `new_character` the "yes" child. The new feature node takes over the
    /// leaf's former slot (or the root). Node count grows by exactly 2 and
    /// every other leaf keeps its path.
    #[instrument(level = "debug", skip(self))]
    pub fn add_answer(
        &mut self,
        leaf: Index,
        new_character: &str,
        feature: &str,
    ) -> Result<(), MutationError> {
        if let Some(existing) = self.find_path(new_character) {
            let is_character_leaf = existing
                .last()
                .and_then(|&idx| self.arena.get_node(idx))
                .is_some_and(|node| node.is_leaf() && node.value.is_character());
            if is_character_leaf {
                return Err(MutationError::DuplicateCharacter {
                    character: new_character.to_string(),
                    path: self.path_values(&existing),
                });
            }
        }

        let old_parent = {
            let node = self.arena.get_node(leaf).ok_or(MutationError::NodeNotFound)?;
            if !node.is_leaf() || !node.value.is_character() {
                return Err(MutationError::NotACharacterLeaf);
            }
            node.parent
        };

        let branch = self
            .arena
            .insert_detached(NodeValue::Feature(feature.to_string()));
        let new_leaf = self
            .arena
            .insert_detached(NodeValue::Character(new_character.to_string()));

        if let Some(node) = self.arena.get_node_mut(branch) {
            node.left = Some(leaf);
            node.right = Some(new_leaf);
            node.parent = old_parent;
        }
        if let Some(node) = self.arena.get_node_mut(new_leaf) {
            node.parent = Some(branch);
        }
        if let Some(node) = self.arena.get_node_mut(leaf) {
            node.parent = Some(branch);
        }
        match old_parent {
            Some(parent_idx) => {
                if let Some(parent) = self.arena.get_node_mut(parent_idx) {
                    if parent.left == Some(leaf) {
                        parent.left = Some(branch);
                    } else if parent.right == Some(leaf) {
                        parent.right = Some(branch);
                    }
                }
            }
            None => self.arena.set_root(Some(branch)),
        }

        self.arena.propagate_depth(branch);
        Ok(())
    }

    /// Check every node for arity and tag consistency.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::validate(&self.arena)
    }

    /// Feature clauses along two resolved paths, shared prefix first.
    pub fn compare(
        &self,
        first: &[Index],
        second: &[Index],
    ) -> Result<ComparisonReport, DomainError> {
        compare::compare_paths(&self.arena, first, second)
    }

    /// Feature clauses along a single resolved path.
    pub fn clauses(&self, path: &[Index]) -> Result<Vec<FeatureClause>, DomainError> {
        compare::path_clauses(&self.arena, path)
    }

    /// Graphviz dot rendition of the tree.
    pub fn export_graph(&self) -> String {
        graph::export(self)
    }

    /// Value texts along an index path, in path order.
    pub fn path_values(&self, path: &[Index]) -> Vec<String> {
        path.iter()
            .filter_map(|&idx| self.arena.get_node(idx))
            .map(|node| node.value.text().to_string())
            .collect()
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get_node(idx)
    }

    pub fn node_count(&self) -> usize {
        self.arena.node_count()
    }

    /// Structural and value equality, ignoring names and arena layout.
    pub fn structural_eq(&self, other: &DecisionTree) -> bool {
        let mut stack = vec![(self.arena.root(), other.arena.root())];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) => {
                    let (Some(node_a), Some(node_b)) =
                        (self.arena.get_node(a), other.arena.get_node(b))
                    else {
                        return false;
                    };
                    if node_a.value != node_b.value {
                        return false;
                    }
                    stack.push((node_a.left, node_b.left));
                    stack.push((node_a.right, node_b.right));
                }
                _ => return false,
            }
        }
        true
    }
}
