//! Filter to remove posts from authors the viewer has blocked.
//!
//! This is the first filter in the pipeline: blocked content must never be
//! visible regardless of search state or sort mode.

use crate::traits::FeedFilter;
use anyhow::Result;
use feed_data::Post;
use session::SessionContext;

/// Removes posts whose author is in the session block set.
///
/// ## Algorithm
/// Uses the HashSet in SessionContext for O(1) membership tests; the
/// surviving posts keep their relative order.
pub struct BlockedAuthorFilter;

impl FeedFilter for BlockedAuthorFilter {
    fn name(&self) -> &str {
        "BlockedAuthorFilter"
    }

    fn apply(&self, posts: Vec<Post>, session: &SessionContext) -> Result<Vec<Post>> {
        let filtered: Vec<Post> = posts
            .into_iter()
            .filter(|post| !session.is_blocked(&post.user_id))
            .collect();
        Ok(filtered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::post;

    #[test]
    fn test_blocked_author_filter() {
        let mut session = SessionContext::new();
        session.block("u1");

        let posts = vec![
            post("p1", "u1", "Madrid", 0, "2024-01-01T00:00:00Z"),
            post("p2", "u2", "Sevilla", 0, "2024-01-02T00:00:00Z"),
            post("p3", "u1", "Valencia", 0, "2024-01-03T00:00:00Z"),
        ];

        let filtered = BlockedAuthorFilter.apply(posts, &session).unwrap();
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "p2");
    }

    #[test]
    fn test_empty_block_set_keeps_everything() {
        let session = SessionContext::new();
        let posts = vec![
            post("p1", "u1", "Madrid", 0, "2024-01-01T00:00:00Z"),
            post("p2", "u2", "Sevilla", 0, "2024-01-02T00:00:00Z"),
        ];

        let filtered = BlockedAuthorFilter.apply(posts, &session).unwrap();
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_idempotent() {
        let mut session = SessionContext::new();
        session.block("u2");

        let posts = vec![
            post("p1", "u1", "Madrid", 0, "2024-01-01T00:00:00Z"),
            post("p2", "u2", "Sevilla", 0, "2024-01-02T00:00:00Z"),
        ];

        let once = BlockedAuthorFilter.apply(posts, &session).unwrap();
        let twice = BlockedAuthorFilter.apply(once.clone(), &session).unwrap();
        assert_eq!(
            once.iter().map(|p| &p.id).collect::<Vec<_>>(),
            twice.iter().map(|p| &p.id).collect::<Vec<_>>()
        );
    }
}
