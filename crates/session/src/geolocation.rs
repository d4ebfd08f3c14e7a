//! Geolocation permission workflow.
//!
//! The nearby sort is only meaningful once the viewer's coordinates are
//! known, and resolving them is a one-shot request with three distinct
//! outcomes: granted with coordinates, denied by the viewer, or failed for
//! some other reason. Each outcome needs its own handling so the caller can
//! offer the right fallback (e.g. manual city entry on denial).
//!
//! The flow mirrors the hosting application's: requesting nearby does not
//! switch the sort mode by itself; it asks for a location first, and only a
//! granted outcome enters nearby.

use crate::types::{SessionContext, SortMode};
use feed_data::Coordinates;
use tracing::{info, warn};

/// Result of the one-shot geolocation request.
#[derive(Debug, Clone, PartialEq)]
pub enum GeoOutcome {
    /// Permission granted, coordinates captured.
    Granted(Coordinates),
    /// The viewer explicitly refused the permission prompt.
    Denied,
    /// The request errored (timeout, unavailable provider, ...).
    Failed(String),
}

/// What happened to a sort-mode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortRequest {
    /// The mode took effect immediately.
    Applied(SortMode),
    /// `Nearby` was requested without coordinates; run the geolocation
    /// workflow and feed its outcome to [`SessionContext::resolve_geolocation`].
    NeedsLocation,
}

impl SessionContext {
    /// Request a sort mode, gating `Nearby` behind a resolved location.
    pub fn request_sort(&mut self, mode: SortMode) -> SortRequest {
        match mode {
            SortMode::Nearby => match self.viewer_location() {
                Some(_) => {
                    self.set_sort_mode(SortMode::Nearby);
                    SortRequest::Applied(SortMode::Nearby)
                }
                None => SortRequest::NeedsLocation,
            },
            other => {
                // Leaving nearby drops the captured location; a later return
                // to nearby re-runs the permission workflow.
                self.set_viewer_location(None);
                self.set_sort_mode(other);
                SortRequest::Applied(other)
            }
        }
    }

    /// Apply the outcome of the geolocation request.
    ///
    /// Granted: capture coordinates and enter `Nearby`. Denied or failed:
    /// stay on (or fall back to) `Recent` so the nearby comparator is never
    /// invoked without coordinates. Returns the sort mode now in effect.
    pub fn resolve_geolocation(&mut self, outcome: GeoOutcome) -> SortMode {
        match outcome {
            GeoOutcome::Granted(coords) => {
                info!(lat = coords.lat, lon = coords.lon, "geolocation granted");
                self.set_viewer_location(Some(coords));
                self.set_sort_mode(SortMode::Nearby);
            }
            GeoOutcome::Denied => {
                info!("geolocation denied by viewer, staying on recent");
                self.set_viewer_location(None);
                self.set_sort_mode(SortMode::Recent);
            }
            GeoOutcome::Failed(reason) => {
                warn!(reason = %reason, "geolocation failed, staying on recent");
                self.set_viewer_location(None);
                self.set_sort_mode(SortMode::Recent);
            }
        }
        self.sort_mode()
    }
}
