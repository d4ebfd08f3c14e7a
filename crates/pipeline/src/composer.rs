//! # Feed Composer
//!
//! This module coordinates the whole composition pipeline:
//! 1. Run the visibility filters over the snapshot's post list
//! 2. Order the survivors with the session's sort strategy
//! 3. Aggregate the leaderboards from the full snapshot
//!
//! Every stage is a synchronous pure function of its inputs, so the composer
//! memoizes on the input revisions: the filtered+sorted feed is keyed on
//! `(snapshot revision, session revision)` and the leaderboards on the
//! snapshot revision alone. Unrelated state churn in the hosting application
//! recomputes nothing.

use crate::filter_pipeline::FeedFilterPipeline;
use crate::leaderboard::{top_contributors, trending_locations, TopContributor, TrendingLocation};
use crate::sort::sorted_posts;
use anyhow::Result;
use feed_data::{FeedSnapshot, Post};
use session::SessionContext;
use std::time::Instant;
use tracing::{debug, info};

/// Everything the feed view renders: the visible ordered posts plus the
/// sidebar leaderboards.
#[derive(Debug, Clone)]
pub struct ComposedFeed {
    pub posts: Vec<Post>,
    pub top_contributors: Vec<TopContributor>,
    pub trending_locations: Vec<TrendingLocation>,
    /// Whether a search gated the post list. Lets the caller distinguish an
    /// empty feed from "no results for this search".
    pub search_active: bool,
}

/// Derived leaderboard pair, cached as a unit.
#[derive(Debug, Clone)]
struct Leaderboards {
    top_contributors: Vec<TopContributor>,
    trending_locations: Vec<TrendingLocation>,
}

/// Memoizing coordinator for the three pipeline stages.
pub struct FeedComposer {
    filters: FeedFilterPipeline,
    feed_cache: Option<(u64, u64, Vec<Post>)>,
    board_cache: Option<(u64, Leaderboards)>,
}

impl FeedComposer {
    /// Composer with the standard visibility pipeline (block list + search).
    pub fn new() -> Self {
        Self::with_filters(FeedFilterPipeline::standard())
    }

    /// Composer with a caller-assembled filter pipeline, e.g. with media
    /// kind or date range stages appended.
    pub fn with_filters(filters: FeedFilterPipeline) -> Self {
        Self {
            filters,
            feed_cache: None,
            board_cache: None,
        }
    }

    /// Compose the feed for one (snapshot, session) pair.
    ///
    /// Pure with respect to its inputs; `&mut self` only maintains the memo
    /// caches.
    pub fn compose(
        &mut self,
        snapshot: &FeedSnapshot,
        session: &SessionContext,
    ) -> Result<ComposedFeed> {
        let start = Instant::now();
        let posts = self.visible_posts(snapshot, session)?;
        let boards = self.leaderboards(snapshot);

        info!(
            visible = posts.len(),
            contributors = boards.top_contributors.len(),
            locations = boards.trending_locations.len(),
            elapsed = ?start.elapsed(),
            "composed feed"
        );

        Ok(ComposedFeed {
            posts,
            top_contributors: boards.top_contributors,
            trending_locations: boards.trending_locations,
            search_active: session.search_active(),
        })
    }

    fn visible_posts(
        &mut self,
        snapshot: &FeedSnapshot,
        session: &SessionContext,
    ) -> Result<Vec<Post>> {
        let key = (snapshot.revision(), session.revision());
        if let Some((snap_rev, sess_rev, cached)) = &self.feed_cache {
            if (*snap_rev, *sess_rev) == key {
                debug!(snapshot = key.0, session = key.1, "feed cache hit");
                return Ok(cached.clone());
            }
        }

        let filtered = self.filters.apply(snapshot.posts().to_vec(), session)?;
        let sorted = sorted_posts(filtered, session.sort_mode(), session.viewer_location());

        self.feed_cache = Some((key.0, key.1, sorted.clone()));
        Ok(sorted)
    }

    fn leaderboards(&mut self, snapshot: &FeedSnapshot) -> Leaderboards {
        let key = snapshot.revision();
        if let Some((rev, cached)) = &self.board_cache {
            if *rev == key {
                debug!(snapshot = key, "leaderboard cache hit");
                return cached.clone();
            }
        }

        let boards = Leaderboards {
            top_contributors: top_contributors(snapshot),
            trending_locations: trending_locations(snapshot),
        };
        self.board_cache = Some((key, boards.clone()));
        boards
    }
}

impl Default for FeedComposer {
    fn default() -> Self {
        Self::new()
    }
}
