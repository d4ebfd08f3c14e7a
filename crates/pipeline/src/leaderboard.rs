//! Gamification leaderboards derived from the full snapshot.
//!
//! Both aggregations deliberately run over the *unfiltered* content set:
//! blocking and search scope what one viewer sees, not what the community
//! produced (see DESIGN.md for the discussion of this choice).
//!
//! ## Algorithm
//! - Top contributors: score each author by authored-post count via the
//!   snapshot's by-author index, drop zero scores, stable-sort descending,
//!   keep the top 5.
//! - Trending locations: count posts per city with a parallel fold/reduce,
//!   order cities by first appearance in the feed (the tie-break order),
//!   stable-sort descending, keep the top 3.

use feed_data::{Author, FeedSnapshot};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Maximum number of contributors on the board.
pub const TOP_CONTRIBUTOR_LIMIT: usize = 5;

/// Maximum number of trending locations on the board.
pub const TRENDING_LOCATION_LIMIT: usize = 3;

/// An author and their contribution score (authored-post count).
#[derive(Debug, Clone, PartialEq)]
pub struct TopContributor {
    pub author: Author,
    pub score: u32,
}

/// A city and how many posts it currently has in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingLocation {
    pub city: String,
    pub post_count: u32,
}

/// Top contributors by authored-post count.
///
/// Authors who authored nothing never appear. Ties keep the author
/// collection's input order.
pub fn top_contributors(snapshot: &FeedSnapshot) -> Vec<TopContributor> {
    let mut board: Vec<TopContributor> = snapshot
        .authors()
        .iter()
        .filter_map(|author| {
            let score = snapshot.posts_by_author(&author.id).len() as u32;
            (score > 0).then(|| TopContributor {
                author: author.clone(),
                score,
            })
        })
        .collect();

    board.sort_by(|a, b| b.score.cmp(&a.score));
    board.truncate(TOP_CONTRIBUTOR_LIMIT);
    debug!(entries = board.len(), "computed top contributors");
    board
}

/// Trending locations by post count per city.
///
/// Ties keep the order in which the cities first appear in the feed.
pub fn trending_locations(snapshot: &FeedSnapshot) -> Vec<TrendingLocation> {
    // Count in parallel; cheap for the common snapshot but scales with the
    // feed. The fold/reduce shape keeps each worker on a local map.
    let counts: HashMap<&str, u32> = snapshot
        .posts()
        .par_iter()
        .fold(HashMap::new, |mut local, post| {
            *local.entry(post.city.as_str()).or_insert(0) += 1;
            local
        })
        .reduce(HashMap::new, |mut acc, local| {
            for (city, count) in local {
                *acc.entry(city).or_insert(0) += count;
            }
            acc
        });

    // Recover first-appearance order sequentially; the parallel maps above
    // lose it and it is the tie-break the board promises.
    let mut seen = HashSet::new();
    let mut board: Vec<TrendingLocation> = snapshot
        .posts()
        .iter()
        .filter(|post| seen.insert(post.city.as_str()))
        .map(|post| TrendingLocation {
            city: post.city.clone(),
            post_count: counts[post.city.as_str()],
        })
        .collect();

    board.sort_by(|a, b| b.post_count.cmp(&a.post_count));
    board.truncate(TRENDING_LOCATION_LIMIT);
    debug!(entries = board.len(), "computed trending locations");
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{author, post};

    fn snapshot() -> FeedSnapshot {
        let authors = vec![
            author("u1", "maria"),
            author("u2", "jon"),
            author("u3", "lurker"),
            author("u4", "aitana"),
        ];
        let posts = vec![
            post("p1", "u1", "Madrid", 0, "2024-01-01T00:00:00Z"),
            post("p2", "u2", "Sevilla", 0, "2024-01-02T00:00:00Z"),
            post("p3", "u1", "Madrid", 0, "2024-01-03T00:00:00Z"),
            post("p4", "u4", "Valencia", 0, "2024-01-04T00:00:00Z"),
            post("p5", "u1", "Sevilla", 0, "2024-01-05T00:00:00Z"),
        ];
        FeedSnapshot::from_collections(authors, posts)
    }

    #[test]
    fn test_zero_score_authors_excluded() {
        let board = top_contributors(&snapshot());
        assert!(board.iter().all(|c| c.author.id != "u3"));
    }

    #[test]
    fn test_top_contributors_descending_with_input_order_ties() {
        let board = top_contributors(&snapshot());
        let entries: Vec<(&str, u32)> = board
            .iter()
            .map(|c| (c.author.id.as_str(), c.score))
            .collect();
        // u1 has 3; u2 and u4 tie at 1 and keep author-collection order
        assert_eq!(entries, [("u1", 3), ("u2", 1), ("u4", 1)]);
    }

    #[test]
    fn test_top_contributors_capped_at_five() {
        let authors: Vec<_> = (0..8).map(|i| author(&format!("u{i}"), "x")).collect();
        let posts: Vec<_> = (0..8)
            .map(|i| {
                post(
                    &format!("p{i}"),
                    &format!("u{i}"),
                    "Madrid",
                    0,
                    "2024-01-01T00:00:00Z",
                )
            })
            .collect();
        let snapshot = FeedSnapshot::from_collections(authors, posts);
        assert_eq!(top_contributors(&snapshot).len(), TOP_CONTRIBUTOR_LIMIT);
    }

    #[test]
    fn test_trending_locations_descending_capped_at_three() {
        let board = trending_locations(&snapshot());
        let entries: Vec<(&str, u32)> = board
            .iter()
            .map(|t| (t.city.as_str(), t.post_count))
            .collect();
        // Madrid and Sevilla tie at 2; Madrid appeared first in the feed
        assert_eq!(entries, [("Madrid", 2), ("Sevilla", 2), ("Valencia", 1)]);
    }

    #[test]
    fn test_trending_counts_bounded_by_total() {
        let snap = snapshot();
        let total: u32 = trending_locations(&snap).iter().map(|t| t.post_count).sum();
        assert!(total <= snap.posts().len() as u32);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = FeedSnapshot::new();
        assert!(top_contributors(&snapshot).is_empty());
        assert!(trending_locations(&snapshot).is_empty());
    }
}
