//! Push-based snapshot delivery.
//!
//! The document store replaces the whole snapshot on every collection
//! change. This module models that as a watch channel: the publisher assigns
//! a fresh revision and pushes an `Arc<FeedSnapshot>`; subscribers read the
//! latest value or await the next change, and tear themselves down
//! explicitly when their view goes away so nothing keeps listening by
//! accident.

use feed_data::FeedSnapshot;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info};

/// The subscription's publisher side went away.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("feed subscription closed: publisher dropped")]
pub struct SubscriptionClosed;

/// Owns the channel and the revision counter for one feed.
pub struct FeedPublisher {
    tx: watch::Sender<Arc<FeedSnapshot>>,
    next_revision: u64,
}

impl FeedPublisher {
    /// Start publishing with an initial snapshot at revision 1.
    pub fn new(initial: FeedSnapshot) -> Self {
        let mut publisher = Self {
            tx: watch::channel(Arc::new(FeedSnapshot::new())).0,
            next_revision: 0,
        };
        publisher.publish(initial);
        publisher
    }

    /// Replace the current snapshot. Assigns the next revision and wakes
    /// every live subscriber.
    pub fn publish(&mut self, mut snapshot: FeedSnapshot) {
        self.next_revision += 1;
        snapshot.set_revision(self.next_revision);
        let (authors, posts) = snapshot.counts();
        info!(
            revision = self.next_revision,
            authors, posts, "publishing feed snapshot"
        );
        // send_replace delivers even with zero subscribers
        self.tx.send_replace(Arc::new(snapshot));
    }

    /// Open a new subscription positioned at the current snapshot.
    pub fn subscribe(&self) -> FeedSubscription {
        FeedSubscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// One consumer's handle on the snapshot stream.
pub struct FeedSubscription {
    rx: watch::Receiver<Arc<FeedSnapshot>>,
}

impl FeedSubscription {
    /// The most recently published snapshot.
    pub fn latest(&self) -> Arc<FeedSnapshot> {
        self.rx.borrow().clone()
    }

    /// Wait for the next published snapshot and return it.
    pub async fn changed(&mut self) -> Result<Arc<FeedSnapshot>, SubscriptionClosed> {
        self.rx.changed().await.map_err(|_| SubscriptionClosed)?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Tear the subscription down.
    ///
    /// Consuming self makes the teardown explicit at the call site; the
    /// publisher stops counting this consumer immediately.
    pub fn unsubscribe(self) {
        debug!("feed subscription torn down");
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feed_data::{Author, MediaKind, Post, PostTimestamp};

    fn snapshot_with_posts(n: usize) -> FeedSnapshot {
        let authors = vec![Author {
            id: "u1".into(),
            username: "maria".into(),
            avatar_url: String::new(),
        }];
        let posts = (0..n)
            .map(|i| Post {
                id: format!("p{i}"),
                user_id: "u1".into(),
                title: format!("Post {i}"),
                description: String::new(),
                city: "Madrid".into(),
                media_url: String::new(),
                media_kind: MediaKind::Image,
                timestamp: PostTimestamp::Server {
                    seconds: 1_700_000_000 + i as i64,
                    nanos: 0,
                },
                likes: 0,
                liked_by: vec![],
                comment_count: 0,
            })
            .collect();
        FeedSnapshot::from_collections(authors, posts)
    }

    #[tokio::test]
    async fn test_publish_assigns_increasing_revisions() {
        let mut publisher = FeedPublisher::new(snapshot_with_posts(1));
        let subscription = publisher.subscribe();
        assert_eq!(subscription.latest().revision(), 1);

        publisher.publish(snapshot_with_posts(2));
        assert_eq!(subscription.latest().revision(), 2);
    }

    #[tokio::test]
    async fn test_changed_delivers_next_snapshot() {
        let mut publisher = FeedPublisher::new(snapshot_with_posts(1));
        let mut subscription = publisher.subscribe();

        let waiter = tokio::spawn(async move { subscription.changed().await });
        publisher.publish(snapshot_with_posts(3));

        let snapshot = waiter.await.unwrap().unwrap();
        assert_eq!(snapshot.counts().1, 3);
        assert_eq!(snapshot.revision(), 2);
    }

    #[tokio::test]
    async fn test_unsubscribe_releases_the_consumer() {
        let publisher = FeedPublisher::new(snapshot_with_posts(1));
        let a = publisher.subscribe();
        let b = publisher.subscribe();
        assert_eq!(publisher.subscriber_count(), 2);

        a.unsubscribe();
        assert_eq!(publisher.subscriber_count(), 1);
        b.unsubscribe();
        assert_eq!(publisher.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_publisher_drop_closes_subscription() {
        let publisher = FeedPublisher::new(snapshot_with_posts(1));
        let mut subscription = publisher.subscribe();
        drop(publisher);

        assert_eq!(subscription.changed().await.unwrap_err(), SubscriptionClosed);
    }
}
