use thiserror::Error;

use super::Key;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NodeError {
    #[error("key not found: {0}")]
    KeyNotFound(Key),

    #[error("value at '{0}' is not a node")]
    NotANode(Key),

    #[error("nested modifier for '{0}' has no child node to apply to")]
    UnsupportedModifier(Key),
}
