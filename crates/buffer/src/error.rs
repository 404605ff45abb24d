// Chunk: docs/chunks/text_model - Shared text buffer & cursor model for editable widgets

use thiserror::Error;

/// Errors returned by the strict accessors of the model.
///
/// Mutations never fail: out-of-range offsets passed to them are clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// An offset handed to a strict accessor lies outside `[0, len]`.
    #[error("offset {offset} is outside the document (length {len})")]
    OffsetOutOfRange { offset: usize, len: usize },
    /// A text limit of zero was requested.
    #[error("text limit cannot be zero")]
    ZeroTextLimit,
}

pub type Result<T> = std::result::Result<T, ModelError>;
