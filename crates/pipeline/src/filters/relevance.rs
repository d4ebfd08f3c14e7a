//! Filter that applies the active search's relevance set.
//!
//! When no search is active the filter is a pass-through. When a search is
//! active the relevance set is an allow-list of post ids, and an *empty* set
//! legitimately empties the feed ("no results for this search") — that state
//! must not be confused with "no search active".

use crate::traits::FeedFilter;
use anyhow::Result;
use feed_data::Post;
use session::SessionContext;

/// Keeps only posts whose id is in the active relevance set, if any.
///
/// Membership is by exact identifier match.
pub struct RelevanceFilter;

impl FeedFilter for RelevanceFilter {
    fn name(&self) -> &str {
        "RelevanceFilter"
    }

    fn apply(&self, posts: Vec<Post>, session: &SessionContext) -> Result<Vec<Post>> {
        let Some(relevance) = session.relevance() else {
            // No active search: everything stays visible.
            return Ok(posts);
        };
        let filtered: Vec<Post> = posts
            .into_iter()
            .filter(|post| relevance.contains(&post.id))
            .collect();
        Ok(filtered)
    }
}
