//! # Feed Data Crate
//!
//! This crate owns the domain types and the in-memory snapshot index for the
//! SaldeFiesta feed.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Post, Author, MediaKind, FeedSnapshot)
//! - **timestamp**: Normalization of the two timestamp wire representations
//! - **geo**: Haversine distance and the festival city centroid table
//! - **loader**: Parse JSON collection exports into an indexed snapshot
//! - **error**: Error types for snapshot loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use feed_data::FeedSnapshot;
//! use std::path::Path;
//!
//! let snapshot = FeedSnapshot::load_from_files(Path::new("data/sample"))?;
//! let post = snapshot.get_post("p1").unwrap();
//! println!("{} from {}", post.title, post.city);
//! ```
//!
//! The snapshot is a read-only view: the real-time collaborator owns the
//! underlying collections and replaces the whole snapshot on every change.

// Public modules
pub mod error;
pub mod geo;
pub mod loader;
pub mod timestamp;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{FeedDataError, Result};
pub use geo::{city_centroid, haversine_km, known_cities, Coordinates, EARTH_RADIUS_KM};
pub use timestamp::PostTimestamp;
pub use types::{Author, FeedSnapshot, MediaKind, Post, PostId, UserId};
