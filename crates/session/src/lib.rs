//! # Session Crate
//!
//! Session-scoped viewer state and the asynchronous workflows that feed it.
//!
//! ## Components
//!
//! ### SessionContext
//! Everything one viewing session contributes to feed composition: block
//! list, sort mode, viewer location, active relevance set. Owned by the
//! caller, never persisted, revision-counted for memoization.
//!
//! ### Geolocation workflow
//! The one-shot permission request that gates the nearby sort:
//! request → granted/denied/failed, each outcome handled distinctly.
//!
//! ### Search session
//! Debounced queries against a [`SearchProvider`] with a request generation
//! counter, so only the newest query's results are ever committed.
//!
//! ## Example Usage
//!
//! ```ignore
//! use session::{GeoOutcome, SearchSession, SessionContext, SortMode};
//!
//! let mut ctx = SessionContext::for_viewer("u1");
//! ctx.block("u9");
//!
//! if ctx.request_sort(SortMode::Nearby) == SortRequest::NeedsLocation {
//!     ctx.resolve_geolocation(GeoOutcome::Granted(coords));
//! }
//!
//! let search = SearchSession::default();
//! let ticket = search.begin();
//! let outcome = search.run(ticket, &provider, "san fermín", &snapshot).await?;
//! ctx.commit_search(outcome);
//! ```

// Public modules
pub mod geolocation;
pub mod search;
pub mod types;

// Re-export commonly used types
pub use geolocation::{GeoOutcome, SortRequest};
pub use search::{
    KeywordSearch, SearchOutcome, SearchProvider, SearchSession, SearchTicket, DEFAULT_DEBOUNCE,
};
pub use types::{SessionContext, SortMode};
