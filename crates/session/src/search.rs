//! Debounced, superseding search.
//!
//! The relevance set comes from an external search collaborator (in
//! production a generative-AI service; offline, the keyword fallback below).
//! Two timing hazards live on that path:
//!
//! 1. the query changes on every keystroke, so calls must be debounced;
//! 2. responses can arrive out of order, so a stale result must never
//!    overwrite a newer one.
//!
//! Both are handled with an explicit request generation counter: every new
//! query takes a ticket, and a result is only committed if its ticket is
//! still the newest one after the debounce wait and after the provider call.

use crate::types::SessionContext;
use anyhow::Result;
use async_trait::async_trait;
use feed_data::{FeedSnapshot, PostId};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, instrument};

/// External search collaborator: free-text query in, matching post ids out.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, snapshot: &FeedSnapshot) -> Result<Vec<PostId>>;
}

/// A request generation handle. Taken synchronously when the query changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// What became of one search request.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The request was still the newest when it finished; commit these.
    Results(HashSet<PostId>),
    /// A newer query took over; discard silently.
    Superseded,
}

/// Owns the generation counter and the debounce interval for one session.
#[derive(Debug)]
pub struct SearchSession {
    generation: AtomicU64,
    debounce: Duration,
}

/// Debounce matching the hosting application's 500 ms keystroke settle time.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl SearchSession {
    pub fn new(debounce: Duration) -> Self {
        Self {
            generation: AtomicU64::new(0),
            debounce,
        }
    }

    /// Register a new query. Call this the moment the query text changes;
    /// it invalidates every in-flight request.
    pub fn begin(&self) -> SearchTicket {
        SearchTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Whether `ticket` still belongs to the newest query.
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Run one search request to completion.
    ///
    /// Waits out the debounce interval, invokes the provider, and reports
    /// `Superseded` if a newer ticket appeared at either checkpoint. Provider
    /// errors propagate so the caller can fall back to the unfiltered feed.
    #[instrument(skip(self, provider, snapshot), fields(ticket = ticket.0))]
    pub async fn run<P: SearchProvider>(
        &self,
        ticket: SearchTicket,
        provider: &P,
        query: &str,
        snapshot: &FeedSnapshot,
    ) -> Result<SearchOutcome> {
        tokio::time::sleep(self.debounce).await;
        if !self.is_current(ticket) {
            debug!("superseded during debounce");
            return Ok(SearchOutcome::Superseded);
        }

        let matches = provider.search(query, snapshot).await?;
        if !self.is_current(ticket) {
            debug!("superseded while provider was in flight");
            return Ok(SearchOutcome::Superseded);
        }

        debug!(matches = matches.len(), "search completed");
        Ok(SearchOutcome::Results(matches.into_iter().collect()))
    }
}

impl SessionContext {
    /// Commit a finished search request. Superseded outcomes are dropped.
    pub fn commit_search(&mut self, outcome: SearchOutcome) {
        match outcome {
            SearchOutcome::Results(matches) => self.apply_search_results(matches),
            SearchOutcome::Superseded => {}
        }
    }
}

/// Offline keyword fallback for the AI search collaborator.
///
/// Case-insensitive substring match over title, description, city, and the
/// author's username.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordSearch;

#[async_trait]
impl SearchProvider for KeywordSearch {
    async fn search(&self, query: &str, snapshot: &FeedSnapshot) -> Result<Vec<PostId>> {
        let needle = query.to_lowercase();
        let matches = snapshot
            .posts()
            .iter()
            .filter(|post| {
                post.title.to_lowercase().contains(&needle)
                    || post.description.to_lowercase().contains(&needle)
                    || post.city.to_lowercase().contains(&needle)
                    || snapshot
                        .get_author(&post.user_id)
                        .is_some_and(|a| a.username.to_lowercase().contains(&needle))
            })
            .map(|post| post.id.clone())
            .collect();
        Ok(matches)
    }
}
