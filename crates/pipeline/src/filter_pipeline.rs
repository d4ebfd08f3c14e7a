//! The FeedFilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FeedFilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::FeedFilter;
use anyhow::Result;
use feed_data::Post;
use session::SessionContext;
use tracing;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FeedFilterPipeline::new()
///     .add_filter(BlockedAuthorFilter)
///     .add_filter(RelevanceFilter)
///     .add_filter(MediaKindFilter::new(MediaKind::Image));
///
/// let visible = pipeline.apply(posts, &session)?;
/// ```
pub struct FeedFilterPipeline {
    filters: Vec<Box<dyn FeedFilter>>,
}

impl FeedFilterPipeline {
    /// Create a new empty FeedFilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// The standard visibility pipeline: block list, then search relevance.
    pub fn standard() -> Self {
        Self::new()
            .add_filter(crate::filters::BlockedAuthorFilter)
            .add_filter(crate::filters::RelevanceFilter)
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl FeedFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Apply all filters in sequence to the post list.
    ///
    /// Each stage takes ownership of the current list and hands back the
    /// surviving posts in unchanged relative order.
    pub fn apply(&self, posts: Vec<Post>, session: &SessionContext) -> Result<Vec<Post>> {
        let mut current = posts;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current, session)?;
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        Ok(current)
    }
}

impl Default for FeedFilterPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::post;
    use std::collections::HashSet;

    #[test]
    fn test_empty_pipeline() {
        let pipeline = FeedFilterPipeline::new();
        let session = SessionContext::new();

        let posts = vec![
            post("p1", "u1", "Madrid", 5, "2024-01-01T00:00:00Z"),
            post("p2", "u2", "Sevilla", 3, "2024-01-02T00:00:00Z"),
        ];

        let visible = pipeline.apply(posts, &session).unwrap();
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn test_standard_pipeline_blocks_and_gates() {
        let mut session = SessionContext::new();
        session.block("u1");
        session.apply_search_results(HashSet::from(["p2".to_string(), "p3".to_string()]));

        let posts = vec![
            post("p1", "u1", "Madrid", 5, "2024-01-01T00:00:00Z"),
            post("p2", "u2", "Sevilla", 3, "2024-01-02T00:00:00Z"),
            post("p3", "u1", "Valencia", 1, "2024-01-03T00:00:00Z"),
        ];

        // p1: blocked. p3: blocked even though relevant. p2: survives.
        let visible = FeedFilterPipeline::standard().apply(posts, &session).unwrap();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "p2");
    }
}
