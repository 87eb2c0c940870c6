use thiserror::Error;

/// Failures raised by tree operations.
///
/// `AlreadyInitialized`, `CrossTree` and `ReleasedNode` are caller misuse and
/// leave the tree untouched. `Corruption` and `InternalInvariant` mean the
/// container itself is broken; the tree must not be trusted afterwards.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("Tried to create root when root already exists")]
    AlreadyInitialized,

    #[error("Tried to delete a node from a different tree")]
    CrossTree,

    #[error("Node handle refers to a released node")]
    ReleasedNode,

    #[error("Tree corruption detected: {0}")]
    Corruption(String),

    #[error("Internal invariant violated: {0}")]
    InternalInvariant(String),
}

impl TreeError {
    /// True for errors that indicate a bug in the container rather than misuse.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            TreeError::Corruption(_) | TreeError::InternalInvariant(_)
        )
    }
}

pub type TreeResult<T> = Result<T, TreeError>;
