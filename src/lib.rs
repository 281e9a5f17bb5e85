//! akin: a decision-tree knowledge base.
//!
//! A base is a binary tree of yes/no feature questions with character
//! answers at the leaves, persisted as a sigil-tagged text file. The domain
//! layer carries the engine (codec, validator, path finder, mutator, graph
//! exporter), the application layer the file boundary, the cli layer the
//! command surface. Library code returns errors; only the binary exits.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{DecisionTree, NodeValue};
