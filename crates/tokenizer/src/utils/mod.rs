//! Internal utilities.

pub mod cache;

pub use cache::SegmentCache;
