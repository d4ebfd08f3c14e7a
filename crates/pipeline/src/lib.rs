//! Feed composition pipeline for the SaldeFiesta feed.
//!
//! This crate provides:
//! - FeedFilter trait and implementations for visibility filtering
//! - FeedFilterPipeline for composing filters
//! - Sort strategies (recent, popular, nearby)
//! - Leaderboard aggregation (top contributors, trending locations)
//! - FeedComposer, the memoizing coordinator of the three stages
//!
//! ## Architecture
//! The pipeline re-derives the rendered feed whenever an input changes:
//! 1. Visibility filters remove blocked authors and, during a search,
//!    anything outside the relevance set
//! 2. The sort strategy orders the visible posts
//! 3. The leaderboard aggregators run off the full, unfiltered snapshot
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FeedComposer;
//!
//! let mut composer = FeedComposer::new();
//! let feed = composer.compose(&snapshot, &session)?;
//! for post in &feed.posts {
//!     println!("{} — {}", post.title, post.city);
//! }
//! ```

pub mod composer;
pub mod filter_pipeline;
pub mod filters;
pub mod leaderboard;
pub mod sort;
pub mod traits;

// Re-export main types
pub use composer::{ComposedFeed, FeedComposer};
pub use filter_pipeline::FeedFilterPipeline;
pub use leaderboard::{
    top_contributors, trending_locations, TopContributor, TrendingLocation,
    TOP_CONTRIBUTOR_LIMIT, TRENDING_LOCATION_LIMIT,
};
pub use sort::sorted_posts;
pub use traits::FeedFilter;
