use thiserror::Error;

/// Errors surfaced by the editor facade
#[derive(Debug, Error)]
pub enum EditorError {
    /// A shape index did not address an existing shape
    #[error("Shape index {index} out of range (collection has {len} shapes)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Configuration values failed validation
    #[error("Invalid editor configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed
    #[error("Failed to parse editor configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for editor operations
pub type EditorResult<T> = Result<T, EditorError>;

impl EditorError {
    pub(crate) fn check_index(index: usize, len: usize) -> EditorResult<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange { index, len })
        }
    }
}
