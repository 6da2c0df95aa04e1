use thiserror::Error;

/// Error type for the failing operations on [`HashTable`].
///
/// Most of the table's API is non-failing (`Option`-returning); this enum
/// covers the operations whose contract says a bad call is an error rather
/// than an absence: the failing lookups ([`HashTable::get`],
/// [`HashTable::get_mut`]) and bulk copies into caller-provided storage
/// ([`HashTable::copy_to`]).
///
/// [`HashTable`]: crate::hash_table::HashTable
/// [`HashTable::get`]: crate::hash_table::HashTable::get
/// [`HashTable::get_mut`]: crate::hash_table::HashTable::get_mut
/// [`HashTable::copy_to`]: crate::hash_table::HashTable::copy_to
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// A failing lookup did not find the requested key.
    #[error("key not found")]
    KeyNotFound,

    /// A copy destination does not have room for every stored entry.
    #[error("destination has room for {available} entries but {required} are stored")]
    CapacityExceeded {
        /// Number of entries the copy would write.
        required: usize,
        /// Number of slots available from the start index to the end of the
        /// destination.
        available: usize,
    },

    /// A copy start index pointed past the end of the destination.
    #[error("start index {start} is out of range for a destination of length {len}")]
    StartIndexOutOfRange {
        /// The start index that was passed.
        start: usize,
        /// Length of the destination slice.
        len: usize,
    },
}

/// Convenience alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;
