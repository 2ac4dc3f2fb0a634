//! Error types shared by the transform and the file pipeline.

use thiserror::Error;

/// Result type for transform and pipeline operations
pub type Result<T> = std::result::Result<T, TransformError>;

/// Errors that can abort a forward or inverse run. All of these are fatal to
/// the operation that raised them; nothing in this crate retries.
#[derive(Error, Debug)]
pub enum TransformError {
    /// Source unreadable or destination unwritable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Every one of the 256 byte values occurs in the input, so no delimiter
    /// can be chosen. Raised by the pre-pass, before any block is transformed.
    #[error("no unused byte value exists in the input (all 256 values occur)")]
    DelimiterExhausted,

    /// A transformed block did not contain the delimiter exactly once
    #[error("corrupt block: expected exactly one delimiter byte, found {0}")]
    DecodeCorruption(usize),

    /// A pipeline thread died without delivering its block
    #[error("worker thread panicked; output is incomplete")]
    WorkerFailed,
}
