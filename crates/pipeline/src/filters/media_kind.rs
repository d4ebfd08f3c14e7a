//! Optional filter for a single media kind.
//!
//! Backs the "photos only" / "videos only" feed toggle.

use crate::traits::FeedFilter;
use anyhow::Result;
use feed_data::{MediaKind, Post};
use session::SessionContext;

/// Keeps only posts carrying the configured media kind.
pub struct MediaKindFilter {
    kind: MediaKind,
}

impl MediaKindFilter {
    pub fn new(kind: MediaKind) -> Self {
        Self { kind }
    }
}

impl FeedFilter for MediaKindFilter {
    fn name(&self) -> &str {
        "MediaKindFilter"
    }

    fn apply(&self, posts: Vec<Post>, _session: &SessionContext) -> Result<Vec<Post>> {
        let filtered: Vec<Post> = posts
            .into_iter()
            .filter(|post| post.media_kind == self.kind)
            .collect();
        Ok(filtered)
    }
}
