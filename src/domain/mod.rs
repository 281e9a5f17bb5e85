//! Domain layer: the tree engine
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config
//! loading). Files and terminals live in the application and cli layers.

pub mod arena;
pub mod codec;
pub mod compare;
pub mod error;
pub mod graph;
pub mod tree;
pub mod validate;

pub use arena::{Answer, NodeValue, TreeArena, TreeNode};
pub use compare::{ComparisonReport, FeatureClause};
pub use error::{DomainError, MutationError, ParseError, ValidationError, ValidationKind};
pub use tree::DecisionTree;
