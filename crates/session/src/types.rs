//! Session-scoped viewer state.
//!
//! Everything the feed pipeline needs to know about *this* viewing session:
//! who is browsing, whom they have blocked, how they want the feed sorted,
//! where they are, and which posts the active search matched. None of it is
//! persisted; it lives exactly as long as the session.

use feed_data::{Coordinates, PostId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Feed ordering selected by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first. The default and the fallback for everything else.
    #[default]
    Recent,
    /// Most liked first.
    Popular,
    /// Closest city centroid first. Requires a resolved viewer location.
    Nearby,
}

impl SortMode {
    /// Parse a mode label, mapping anything unrecognized to `Recent`.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "popular" => SortMode::Popular,
            "nearby" => SortMode::Nearby,
            "recent" => SortMode::Recent,
            other => {
                debug!(mode = other, "unrecognized sort mode, falling back to recent");
                SortMode::Recent
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Recent => "recent",
            SortMode::Popular => "popular",
            SortMode::Nearby => "nearby",
        }
    }
}

/// Per-session context consumed by the feed pipeline.
///
/// Mutations go through methods so the revision counter stays honest: the
/// composer memoizes on `(snapshot revision, session revision)` and must see
/// a bump for every observable change.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    viewer_id: Option<UserId>,
    blocked: HashSet<UserId>,
    sort_mode: SortMode,
    viewer_location: Option<Coordinates>,
    /// `None`: no active search. `Some(empty)`: search ran, nothing matched.
    relevance: Option<HashSet<PostId>>,
    revision: u64,
}

impl SessionContext {
    /// Create a context for an anonymous viewer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context for a signed-in viewer.
    pub fn for_viewer(viewer_id: impl Into<UserId>) -> Self {
        Self {
            viewer_id: Some(viewer_id.into()),
            ..Self::default()
        }
    }

    pub fn viewer_id(&self) -> Option<&UserId> {
        self.viewer_id.as_ref()
    }

    /// Block an author for the rest of this session.
    ///
    /// A viewer can never block themselves; such a request is refused and
    /// the block set is left untouched. Returns whether the set changed.
    pub fn block(&mut self, user_id: impl Into<UserId>) -> bool {
        let user_id = user_id.into();
        if self.viewer_id.as_ref() == Some(&user_id) {
            debug!(user_id = %user_id, "refusing to block the viewer's own id");
            return false;
        }
        let changed = self.blocked.insert(user_id);
        if changed {
            self.bump();
        }
        changed
    }

    /// Remove an author from the block set. Returns whether it was present.
    pub fn unblock(&mut self, user_id: &str) -> bool {
        let changed = self.blocked.remove(user_id);
        if changed {
            self.bump();
        }
        changed
    }

    pub fn is_blocked(&self, user_id: &str) -> bool {
        self.blocked.contains(user_id)
    }

    pub fn blocked(&self) -> &HashSet<UserId> {
        &self.blocked
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        if self.sort_mode != mode {
            self.sort_mode = mode;
            self.bump();
        }
    }

    pub fn viewer_location(&self) -> Option<Coordinates> {
        self.viewer_location
    }

    pub fn set_viewer_location(&mut self, location: Option<Coordinates>) {
        self.viewer_location = location;
        self.bump();
    }

    /// Whether a search is currently active.
    ///
    /// Distinct from "the search matched nothing": an active search with an
    /// empty result set is still active, and the caller uses the difference
    /// to choose between an empty-feed and a no-results presentation.
    pub fn search_active(&self) -> bool {
        self.relevance.is_some()
    }

    /// The active relevance set, if a search is in effect.
    pub fn relevance(&self) -> Option<&HashSet<PostId>> {
        self.relevance.as_ref()
    }

    /// Commit a search result set as the active relevance set.
    pub fn apply_search_results(&mut self, matches: HashSet<PostId>) {
        self.relevance = Some(matches);
        self.bump();
    }

    /// Drop the active search, restoring the unfiltered feed.
    pub fn clear_search(&mut self) {
        if self.relevance.take().is_some() {
            self.bump();
        }
    }

    /// Session revision. Bumped by every observable mutation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_mode_parse_lossy() {
        assert_eq!(SortMode::parse_lossy("popular"), SortMode::Popular);
        assert_eq!(SortMode::parse_lossy("nearby"), SortMode::Nearby);
        assert_eq!(SortMode::parse_lossy("recent"), SortMode::Recent);
        assert_eq!(SortMode::parse_lossy("trending"), SortMode::Recent);
        assert_eq!(SortMode::parse_lossy(""), SortMode::Recent);
    }

    #[test]
    fn test_block_and_unblock() {
        let mut session = SessionContext::new();
        assert!(session.block("u2"));
        assert!(session.is_blocked("u2"));
        assert!(!session.block("u2"), "re-blocking is a no-op");
        assert!(session.unblock("u2"));
        assert!(!session.is_blocked("u2"));
        assert!(!session.unblock("u2"));
    }

    #[test]
    fn test_viewer_cannot_block_self() {
        let mut session = SessionContext::for_viewer("u1");
        let before = session.revision();
        assert!(!session.block("u1"));
        assert!(!session.is_blocked("u1"));
        assert_eq!(session.revision(), before, "refused block must not bump");
        assert!(session.block("u2"));
    }

    #[test]
    fn test_revision_bumps_on_every_mutation() {
        let mut session = SessionContext::new();
        let r0 = session.revision();

        session.block("u2");
        let r1 = session.revision();
        assert!(r1 > r0);

        session.set_sort_mode(SortMode::Popular);
        let r2 = session.revision();
        assert!(r2 > r1);

        // Setting the same mode again is not an observable change
        session.set_sort_mode(SortMode::Popular);
        assert_eq!(session.revision(), r2);

        session.apply_search_results(HashSet::new());
        let r3 = session.revision();
        assert!(r3 > r2);

        session.clear_search();
        assert!(session.revision() > r3);
        // Clearing with no active search is a no-op
        let r4 = session.revision();
        session.clear_search();
        assert_eq!(session.revision(), r4);
    }

    #[test]
    fn test_empty_relevance_is_still_active() {
        let mut session = SessionContext::new();
        assert!(!session.search_active());

        session.apply_search_results(HashSet::new());
        assert!(session.search_active());
        assert!(session.relevance().unwrap().is_empty());

        session.clear_search();
        assert!(!session.search_active());
    }
}
