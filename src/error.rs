//! Error taxonomy shared by the list and map layers.
//!
//! Duplicate inserts have no variant: they are silent no-ops that
//! report `false`, never failures.

/// Failures reported by index-taking operations, map construction, and cursors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("key not found")]
    UnknownKey,

    #[error("key order does not match map keys: {reason}")]
    KeyOrderMismatch { reason: &'static str },

    #[error("operation not supported: {0}")]
    Unsupported(&'static str),

    #[error("cursor has no current element")]
    NoCurrentElement,
}

pub type Result<T> = core::result::Result<T, CollectionError>;

/// `Ok(())` when `index < len`.
#[inline]
pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(CollectionError::IndexOutOfBounds { index, len })
    }
}

/// `Ok(())` when `index <= len`, i.e. a valid insertion point.
#[inline]
pub(crate) fn check_position(index: usize, len: usize) -> Result<()> {
    if index <= len {
        Ok(())
    } else {
        Err(CollectionError::IndexOutOfBounds { index, len })
    }
}
