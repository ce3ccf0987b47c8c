use thiserror::Error;

/// Result type for fallible list and queue operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by fallible insertions.
///
/// Whenever one of these is returned, the list or queue the operation was
/// called on is left exactly as it was.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A list node (or a ghost node) could not be allocated.
    #[error("failed to allocate a list node of {size} bytes")]
    NodeAlloc { size: usize },

    /// The owned copy of an inserted value could not be allocated.
    #[error("failed to copy a value of {len} bytes")]
    ValueAlloc { len: usize },
}
