//! Error types shared by more than one collection.

use derive_more::{Display, Error};

/// An index was used that doesn't refer to an initialized element.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Index {index} out of bounds for collection with {len} elements!")]
pub struct IndexOutOfBounds {
    /// The offending index.
    pub index: usize,
    /// The length of the collection at the time of the access.
    pub len: usize,
}

/// Growing (or shrinking) the backing storage of a collection failed, either because the
/// allocator refused the request or because the new capacity would overflow.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
#[display("Unable to reallocate storage for capacity {requested}!")]
pub struct AllocationFailure {
    /// The capacity that was being requested.
    pub requested: usize,
}
