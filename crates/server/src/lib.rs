//! # Server Crate
//!
//! Wires the pure composition pipeline to its reactive surroundings:
//!
//! - **subscription**: push-based snapshot delivery over a watch channel,
//!   with explicit teardown (the stand-in for the document store's
//!   real-time listener)
//! - **orchestrator**: owns one viewer's session, subscription, composer
//!   and search provider, and downgrades collaborator failures into safe
//!   fallbacks

pub mod orchestrator;
pub mod subscription;

pub use orchestrator::{FeedOrchestrator, SearchStatus};
pub use subscription::{FeedPublisher, FeedSubscription, SubscriptionClosed};
