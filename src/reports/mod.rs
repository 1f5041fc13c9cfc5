//! Pure aggregation functions over fetched row collections.
//!
//! Nothing in here performs I/O or holds state; every function is a transform
//! from already-fetched rows to a report structure. The fetch services decide
//! what to feed in and what to cache.

pub mod materials;
pub mod progress;
pub mod sheets;
pub mod trips;
