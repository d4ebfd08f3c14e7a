//! Filter implementations for the feed pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FeedFilterPipeline.

pub mod blocked_author;
pub mod date_range;
pub mod media_kind;
pub mod relevance;

// Re-export for convenience
pub use blocked_author::BlockedAuthorFilter;
pub use date_range::DateRangeFilter;
pub use media_kind::MediaKindFilter;
pub use relevance::RelevanceFilter;
