//! Core traits for the feed composition pipeline.
//!
//! This module defines the FeedFilter trait that allows composable,
//! extensible visibility filters to be applied to the post list.

use anyhow::Result;
use feed_data::Post;
use session::SessionContext;

/// Core trait for filtering the visible post list.
///
/// All filters must implement this trait to be used in the FeedFilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be used in concurrent contexts
/// - Filters take ownership of the Vec<Post> and return a filtered Vec,
///   so chaining stages needs no extra cloning
/// - The `Result` return keeps the seam open for fallible filters, even
///   though the shipped filters are total
pub trait FeedFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to the post list.
    ///
    /// # Arguments
    /// * `posts` - The posts to filter (takes ownership)
    /// * `session` - Session context with block list and relevance set
    fn apply(&self, posts: Vec<Post>, session: &SessionContext) -> Result<Vec<Post>>;
}
