//! Optional filter for a creation-date window.
//!
//! Bounds are inclusive and compared against the normalized instant, so the
//! window treats both timestamp wire representations identically.

use crate::traits::FeedFilter;
use anyhow::Result;
use chrono::{DateTime, Utc};
use feed_data::Post;
use session::SessionContext;

/// Keeps posts whose creation instant falls inside the configured window.
///
/// An unset bound is open on that side.
pub struct DateRangeFilter {
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
}

impl DateRangeFilter {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }
}

impl FeedFilter for DateRangeFilter {
    fn name(&self) -> &str {
        "DateRangeFilter"
    }

    fn apply(&self, posts: Vec<Post>, _session: &SessionContext) -> Result<Vec<Post>> {
        if self.start.is_none() && self.end.is_none() {
            return Ok(posts);
        }
        let filtered: Vec<Post> = posts
            .into_iter()
            .filter(|post| {
                let instant = post.timestamp.instant();
                self.start.is_none_or(|s| instant >= s) && self.end.is_none_or(|e| instant <= e)
            })
            .collect();
        Ok(filtered)
    }
}
