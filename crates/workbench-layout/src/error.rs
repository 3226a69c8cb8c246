use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = LayoutError> = std::result::Result<T, E>;

/// Failures raised by layout operations and the codec.
///
/// Every operation clones before it mutates, so an error never leaves a
/// partially edited tree behind.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("part `{part_id}` not found")]
    PartNotFound { part_id: String },

    #[error("view `{view_id}` is not docked in any part")]
    ViewNotFound { view_id: String },

    #[error("view `{view_id}` is not present in part `{part_id}`")]
    ViewNotPresentInPart { part_id: String, view_id: String },

    #[error("sash #{sash_id} not found")]
    SashNotFound { sash_id: u32 },

    #[error("insertion index {index} is out of range for a part with {len} views")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("split ratio {ratio} must be strictly between 0 and 1")]
    InvalidRatio { ratio: f64 },

    #[error("identifier `{id}` is already used in the layout")]
    DuplicateId { id: String },

    #[error("corrupt layout: {reason}")]
    CorruptLayout { reason: String },

    #[error("failed to encode layout: {0}")]
    Encode(#[from] serde_json::Error),
}

impl LayoutError {
    pub(crate) fn part_not_found(part_id: &str) -> Self {
        LayoutError::PartNotFound { part_id: part_id.to_string() }
    }

    pub(crate) fn view_not_found(view_id: &str) -> Self {
        LayoutError::ViewNotFound { view_id: view_id.to_string() }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        LayoutError::CorruptLayout { reason: reason.into() }
    }
}
