//! Error types for the crate.

use thiserror::Error;

/// Result type alias for fallible tree operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error returned by tree, map and set operations.
///
/// Lookup misses that are ordinary control flow (`get`, `remove`) are
/// reported through `Option`/`bool` instead; this enum covers the cases
/// where the caller's contract was violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Construction argument out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Keyed lookup on an absent key where the contract demands presence.
    #[error("key not found")]
    NotFound,

    /// Unique-key insert rejected because the key is already present.
    #[error("duplicate key")]
    DuplicateKey,

    /// Destination buffer too small for a bulk copy.
    #[error("destination holds {capacity} entries, {required} required")]
    CapacityExceeded {
        /// Number of entries the copy would have written.
        required: usize,
        /// Number of entries the destination can hold.
        capacity: usize,
    },

    /// Cursor used after the tree changed underneath it, or `current`
    /// read while the cursor is not positioned on an entry.
    #[error("cursor invalidated by tree mutation")]
    IteratorInvalid,
}
