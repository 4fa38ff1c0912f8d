/// Failure of a single aggregation. No partial result is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError<E> {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: &'static str },

    #[error("Cycle detected: {folder} is reachable from itself")]
    CycleDetected { folder: String },

    #[error("Maximum depth of {limit} exceeded below {folder}")]
    MaxDepthExceeded { limit: usize, folder: String },

    /// An error raised by the folder source, passed through untouched.
    #[error(transparent)]
    Collaborator(#[from] E),
}

impl<E> AggregationError<E> {
    pub(crate) const fn missing_folder() -> Self {
        Self::InvalidArgument {
            reason: "a folder is required",
        }
    }

    /// The folder source's own error, if that is what failed.
    pub fn into_collaborator(self) -> Option<E> {
        match self {
            Self::Collaborator(e) => Some(e),
            _ => None,
        }
    }
}
