use crate::config::ConfigError;
use crate::node::NodeError;
use thiserror::Error;

/// Top-level error type for the merry-tree library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("node error: {0}")]
    Node(#[from] NodeError),
}
