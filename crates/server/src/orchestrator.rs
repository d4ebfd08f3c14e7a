//! # Feed Orchestrator
//!
//! This module ties the session, the snapshot subscription, the composer,
//! and the search session together the way the hosting view would:
//! 1. Hold the live subscription to the content/author collections
//! 2. Own the viewer's SessionContext
//! 3. Run searches with debounce + supersession and commit only fresh results
//! 4. Compose the feed on demand, memoized across unchanged inputs
//!
//! The orchestrator is the one place where collaborator failures get
//! downgraded: a failing search provider clears the relevance set and
//! reports `Unavailable` so the view can fall back to the unfiltered feed,
//! and geolocation outcomes are resolved into a safe sort mode.

use crate::subscription::FeedSubscription;
use anyhow::{Context, Result};
use pipeline::{ComposedFeed, FeedComposer};
use session::{
    GeoOutcome, SearchOutcome, SearchProvider, SearchSession, SessionContext, SortMode,
    SortRequest,
};
use tracing::{info, warn};

/// What a search request did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    /// Results committed as the active relevance set.
    Applied { matches: usize },
    /// A newer query superseded this one before it finished.
    Superseded,
    /// Empty query: the active search was cleared.
    Cleared,
    /// The provider failed; the relevance set was cleared so the caller can
    /// show the unfiltered feed or an explicit error state.
    Unavailable,
}

/// Coordinates one viewer's feed for the lifetime of their session.
pub struct FeedOrchestrator<P: SearchProvider> {
    subscription: FeedSubscription,
    session: SessionContext,
    composer: FeedComposer,
    search: SearchSession,
    provider: P,
}

impl<P: SearchProvider> FeedOrchestrator<P> {
    pub fn new(subscription: FeedSubscription, session: SessionContext, provider: P) -> Self {
        Self {
            subscription,
            session,
            composer: FeedComposer::new(),
            search: SearchSession::default(),
            provider,
        }
    }

    /// Override the debounce/supersession settings (mainly for tests).
    pub fn with_search_session(mut self, search: SearchSession) -> Self {
        self.search = search;
        self
    }

    /// Swap in a composer with a caller-assembled filter pipeline.
    pub fn with_composer(mut self, composer: FeedComposer) -> Self {
        self.composer = composer;
        self
    }

    /// Compose the feed from the latest snapshot and the current session.
    pub fn compose(&mut self) -> Result<ComposedFeed> {
        let snapshot = self.subscription.latest();
        self.composer
            .compose(&snapshot, &self.session)
            .context("Failed to compose feed")
    }

    /// Run a search query end to end and commit its outcome.
    ///
    /// An empty query clears the active search. Provider failure never
    /// propagates past this point: it clears the relevance set and reports
    /// `Unavailable`.
    pub async fn search(&mut self, query: &str) -> SearchStatus {
        if query.trim().is_empty() {
            self.session.clear_search();
            return SearchStatus::Cleared;
        }

        let ticket = self.search.begin();
        let snapshot = self.subscription.latest();
        match self.search.run(ticket, &self.provider, query, &snapshot).await {
            Ok(SearchOutcome::Results(matches)) => {
                let count = matches.len();
                info!(query, matches = count, "search applied");
                self.session.apply_search_results(matches);
                SearchStatus::Applied { matches: count }
            }
            Ok(SearchOutcome::Superseded) => SearchStatus::Superseded,
            Err(error) => {
                warn!(query, %error, "search provider failed, showing unfiltered feed");
                self.session.clear_search();
                SearchStatus::Unavailable
            }
        }
    }

    /// Request a sort mode; `Nearby` may come back `NeedsLocation`.
    pub fn request_sort(&mut self, mode: SortMode) -> SortRequest {
        self.session.request_sort(mode)
    }

    /// Feed a geolocation outcome back in; returns the mode now in effect.
    pub fn resolve_geolocation(&mut self, outcome: GeoOutcome) -> SortMode {
        self.session.resolve_geolocation(outcome)
    }

    pub fn block_author(&mut self, user_id: &str) -> bool {
        self.session.block(user_id)
    }

    pub fn unblock_author(&mut self, user_id: &str) -> bool {
        self.session.unblock(user_id)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Wait for the next snapshot publication.
    pub async fn snapshot_changed(&mut self) -> Result<()> {
        self.subscription
            .changed()
            .await
            .context("Feed subscription closed")?;
        Ok(())
    }

    /// Tear down the subscription when the view goes away.
    pub fn shutdown(self) {
        self.subscription.unsubscribe();
    }
}
