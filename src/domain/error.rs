//! Domain-level errors (no external dependencies)

use itertools::Itertools;
use thiserror::Error;

/// Base text could not be parsed into a tree.
///
/// Offsets are byte positions into the input text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unexpected end of input at byte {offset}")]
    UnexpectedEof { offset: usize },

    #[error("token opened with {expected:?} but closed with {found:?} at byte {offset}")]
    UnmatchedSigil {
        expected: char,
        found: char,
        offset: usize,
    },

    #[error("empty value between sigils at byte {offset}")]
    EmptyValue { offset: usize },

    #[error("expected a sigil but found {found:?} at byte {offset}")]
    MissingSigil { found: char, offset: usize },

    #[error("trailing content after complete tree at byte {offset}")]
    TrailingContent { offset: usize },
}

/// Structural fault categories detected by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    /// Childless node does not carry a character value
    LeafTagMismatch,
    /// Node with two children does not carry a feature value
    BranchTagMismatch,
    /// Node has exactly one child
    SingleChildViolation,
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            ValidationKind::LeafTagMismatch => "childless node must hold a character",
            ValidationKind::BranchTagMismatch => "node with two children must hold a feature",
            ValidationKind::SingleChildViolation => "every node must have 0 or 2 children",
        };
        write!(f, "{msg}")
    }
}

/// Structural fault plus the trail of node values leading to it.
///
/// The breadcrumb is ordered most-specific-first: the offending node's value
/// at index 0, the root last. [trail] renders it root-first.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {}", trail(.breadcrumb))]
pub struct ValidationError {
    pub kind: ValidationKind,
    pub breadcrumb: Vec<String>,
}

/// Render a most-specific-first breadcrumb as a root-first trail.
pub fn trail(breadcrumb: &[String]) -> String {
    breadcrumb
        .iter()
        .rev()
        .map(|value| format!("[{value}]"))
        .join(" -> ")
}

/// Tree mutation was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("character {character:?} already exists: {}", .path.iter().map(|v| format!("[{v}]")).join(" -> "))]
    DuplicateCharacter {
        character: String,
        /// Root-first value path to the existing character
        path: Vec<String>,
    },

    #[error("node handle is stale or belongs to another tree")]
    NodeNotFound,

    #[error("target node is not a character leaf")]
    NotACharacterLeaf,
}

/// Umbrella for all tree-engine failures.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    /// A node sequence claimed to be a path does not descend through
    /// parent-child links.
    #[error("path does not descend through parent-child links")]
    CorruptPath,
}
