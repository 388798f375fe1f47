//! Storage abstractions for the service layer
//!
//! The book collection persists as one opaque blob in an external
//! key/value object store; the trait in `blob` is the seam, `fs` the
//! local-disk implementation.

pub mod blob;
pub mod fs;
