//! Error types for kestrel_3d

use crate::scene::NodeId;
use thiserror::Error;

/// Errors raised by scene-graph edits and configuration loading
///
/// Numerical contract violations (non-unit rays, singular matrices) are not
/// represented here; they are debug assertions, and a pick that finds nothing
/// is `None`, not an error.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The key does not refer to a live node in the tree
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeId),

    /// Linking would make a node its own ancestor
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },

    /// Failed to read a configuration file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed or is invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for SceneError {
    fn from(err: toml::de::Error) -> Self {
        SceneError::Config(err.to_string())
    }
}

/// Result type for kestrel_3d operations
pub type Result<T> = std::result::Result<T, SceneError>;
