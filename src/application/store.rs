//! Base-file boundary: read and write trees on disk.
//!
//! The only place where tree data touches the filesystem. Text goes in and
//! out of the domain codec as plain buffers.

use std::fs;
use std::path::Path;

use tracing::instrument;

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::error::DomainError;
use crate::domain::{codec, DecisionTree};

/// Load a tree from a base file. The tree is named after the file stem.
#[instrument(level = "debug")]
pub fn load_tree(path: &Path) -> ApplicationResult<DecisionTree> {
    let text = fs::read_to_string(path)
        .map_err(|e| ApplicationError::io(format!("read {}", path.display()), e))?;
    let mut tree = codec::parse(&text).map_err(DomainError::from)?;
    if let Some(stem) = path.file_stem() {
        tree.set_name(stem.to_string_lossy());
    }
    Ok(tree)
}

/// Serialize a tree and write it to a base file.
#[instrument(level = "debug", skip(tree))]
pub fn save_tree(tree: &DecisionTree, path: &Path) -> ApplicationResult<()> {
    write_text(path, &codec::serialize(tree))
}

/// Write plain text, creating parent directories as needed. Also used for
/// graph exports.
#[instrument(level = "debug", skip(text))]
pub fn write_text(path: &Path, text: &str) -> ApplicationResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| ApplicationError::io(format!("create {}", parent.display()), e))?;
        }
    }
    fs::write(path, text).map_err(|e| ApplicationError::io(format!("write {}", path.display()), e))
}
