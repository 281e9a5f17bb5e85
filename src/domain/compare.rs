//! Feature-path comparison between two resolved characters.

use generational_arena::Index;
use std::fmt;
use tracing::instrument;

use crate::domain::arena::{Answer, TreeArena};
use crate::domain::error::DomainError;

/// One feature along a path, oriented by the branch that was taken:
/// `affirmed` is true for the "yes" child, false for the "no" child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureClause {
    pub feature: String,
    pub affirmed: bool,
}

impl fmt::Display for FeatureClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.affirmed {
            write!(f, "not ")?;
        }
        write!(f, "{}", self.feature)
    }
}

/// Outcome of comparing two root-first paths.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComparisonReport {
    /// Features both characters answer identically, root-first
    pub shared: Vec<FeatureClause>,
    /// Features distinguishing the first character, below the divergence
    pub first_only: Vec<FeatureClause>,
    /// Features distinguishing the second character, below the divergence
    pub second_only: Vec<FeatureClause>,
}

/// Clause for the adjacency (`path[i]`, `path[i + 1]`).
fn clause_at(arena: &TreeArena, path: &[Index], i: usize) -> Result<FeatureClause, DomainError> {
    let (Some(&current), Some(&next)) = (path.get(i), path.get(i + 1)) else {
        return Err(DomainError::CorruptPath);
    };
    let node = arena.get_node(current).ok_or(DomainError::CorruptPath)?;
    let affirmed = match node.slot_of(next) {
        Some(Answer::Yes) => true,
        Some(Answer::No) => false,
        None => return Err(DomainError::CorruptPath),
    };
    Ok(FeatureClause {
        feature: node.value.text().to_string(),
        affirmed,
    })
}

/// All feature clauses along a single root-first path ending in a leaf.
pub fn path_clauses(arena: &TreeArena, path: &[Index]) -> Result<Vec<FeatureClause>, DomainError> {
    (0..path.len().saturating_sub(1))
        .map(|i| clause_at(arena, path, i))
        .collect()
}

/// Compare two root-first paths feature by feature.
///
/// The divergence check is deliberately shallow: when the elements at index 1
/// (just below the root) differ, the characters are reported as sharing
/// nothing, even if a common node exists deeper in either path. Otherwise the
/// shared prefix is collected in lockstep up to the first divergence or
/// either path's penultimate element, and each remaining suffix becomes that
/// character's distinguishing clauses.
#[instrument(level = "debug", skip(arena, first, second))]
pub fn compare_paths(
    arena: &TreeArena,
    first: &[Index],
    second: &[Index],
) -> Result<ComparisonReport, DomainError> {
    let mut report = ComparisonReport::default();
    let mut i1 = 0;
    let mut i2 = 0;

    let diverge_below_root =
        first.len() < 2 || second.len() < 2 || first[1] != second[1];
    if !diverge_below_root {
        while i1 + 1 < first.len() && i2 + 1 < second.len() && first[i1 + 1] == second[i2 + 1] {
            report.shared.push(clause_at(arena, first, i1)?);
            i1 += 1;
            i2 += 1;
        }
    }

    while i1 + 1 < first.len() {
        report.first_only.push(clause_at(arena, first, i1)?);
        i1 += 1;
    }
    while i2 + 1 < second.len() {
        report.second_only.push(clause_at(arena, second, i2)?);
        i2 += 1;
    }

    Ok(report)
}
