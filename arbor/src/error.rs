//! Error types for building a render tree from a payload.

/// Errors raised while turning a payload into a [`TreeNode`](crate::TreeNode).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The payload has no root object.
    #[error("Payload has no root node")]
    MissingRoot,

    /// A node in the payload is not shaped like `{ name, children? }`.
    #[error("Invalid node at {path}: {reason}")]
    InvalidNode { path: String, reason: String },

    /// The payload is not valid JSON.
    #[error("Payload parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Creates a new invalid node error.
    pub fn invalid_node(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidNode {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
