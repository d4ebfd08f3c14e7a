//! Core domain types for the SaldeFiesta feed.
//!
//! This module defines the fundamental data structures used throughout the
//! system. Key Rust concepts demonstrated here:
//! - Type aliases for domain clarity (UserId, PostId)
//! - Structs with public fields mirroring the document-store export shape
//! - Enums for fixed sets of values
//! - Derive macros for common traits
//! - HashMap secondary indices for efficient lookups

use crate::timestamp::PostTimestamp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================
// Document-store identifiers are opaque strings. The aliases keep signatures
// readable and prevent mixing up author ids with post ids.

/// Unique identifier for an author (a document id in the user collection)
pub type UserId = String;

/// Unique identifier for a post (a document id in the post collection)
pub type PostId = String;

// =============================================================================
// Author
// =============================================================================

/// A registered user as it appears in the user collection.
///
/// Only the fields the feed needs: the follower graph and auth profile live
/// in the excluded surrounding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: UserId,
    pub username: String,
    pub avatar_url: String,
}

// =============================================================================
// Post
// =============================================================================

/// Kind of media attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A single piece of shared festival content.
///
/// Invariant: `likes == liked_by.len()`. The document store maintains it with
/// atomic increment / array-union updates; the loader re-normalizes and warns
/// if a snapshot arrives with the two out of step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    /// City label, e.g. "Pamplona". Keys the centroid lookup for nearby sort.
    pub city: String,
    pub media_url: String,
    #[serde(rename = "mediaType")]
    pub media_kind: MediaKind,
    pub timestamp: PostTimestamp,
    pub likes: u32,
    #[serde(default)]
    pub liked_by: Vec<UserId>,
    #[serde(default)]
    pub comment_count: u32,
}

// =============================================================================
// FeedSnapshot - The In-Memory Snapshot Index
// =============================================================================

/// An indexed, read-only snapshot of the post and author collections.
///
/// The real-time collaborator replaces the whole snapshot on every change;
/// the pipeline never mutates one. Post and author insertion order is
/// preserved because it is the tie-break order for every stable sort
/// downstream.
#[derive(Debug, Default)]
pub struct FeedSnapshot {
    // Primary data, in arrival order
    pub(crate) posts: Vec<Post>,
    pub(crate) authors: Vec<Author>,

    // Id lookups (positions into the vectors above)
    pub(crate) post_positions: HashMap<PostId, usize>,
    pub(crate) author_positions: HashMap<UserId, usize>,

    // Secondary indices
    /// Posts authored by each user
    pub(crate) posts_by_author: HashMap<UserId, Vec<PostId>>,
    /// Posts grouped by city label
    pub(crate) posts_by_city: HashMap<String, Vec<PostId>>,

    /// Monotone revision assigned by the publisher; memoization key.
    pub(crate) revision: u64,
}

impl FeedSnapshot {
    /// Creates a new, empty snapshot at revision 0.
    pub fn new() -> Self {
        Self::default()
    }

    // Getters return references; the snapshot owns the data.

    /// All posts in arrival order.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// All authors in arrival order.
    pub fn authors(&self) -> &[Author] {
        &self.authors
    }

    /// Get a post by id.
    pub fn get_post(&self, id: &str) -> Option<&Post> {
        self.post_positions.get(id).map(|&i| &self.posts[i])
    }

    /// Get an author by id.
    pub fn get_author(&self, id: &str) -> Option<&Author> {
        self.author_positions.get(id).map(|&i| &self.authors[i])
    }

    /// Ids of all posts authored by `user_id`.
    ///
    /// Returns an empty slice for unknown authors.
    pub fn posts_by_author(&self, user_id: &str) -> &[PostId] {
        self.posts_by_author
            .get(user_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Ids of all posts tagged with `city`.
    pub fn posts_by_city(&self, city: &str) -> &[PostId] {
        self.posts_by_city
            .get(city)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Snapshot revision. Bumped by the publisher on every replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }

    // Mutators, used while a snapshot is being materialized. Once published
    // behind an Arc the snapshot is effectively frozen.

    /// Insert an author, replacing any previous document with the same id.
    pub fn insert_author(&mut self, author: Author) {
        match self.author_positions.get(&author.id) {
            Some(&i) => self.authors[i] = author,
            None => {
                self.author_positions
                    .insert(author.id.clone(), self.authors.len());
                self.authors.push(author);
            }
        }
    }

    /// Insert a post and update the secondary indices.
    pub fn insert_post(&mut self, post: Post) {
        if let Some(&i) = self.post_positions.get(&post.id) {
            // Replacement: drop the old index entries first.
            let old = self.posts[i].clone();
            if let Some(ids) = self.posts_by_author.get_mut(&old.user_id) {
                ids.retain(|id| id != &old.id);
            }
            if let Some(ids) = self.posts_by_city.get_mut(&old.city) {
                ids.retain(|id| id != &old.id);
            }
            self.posts[i] = post.clone();
        } else {
            self.post_positions.insert(post.id.clone(), self.posts.len());
            self.posts.push(post.clone());
        }

        self.posts_by_author
            .entry(post.user_id.clone())
            .or_default()
            .push(post.id.clone());
        self.posts_by_city
            .entry(post.city.clone())
            .or_default()
            .push(post.id);
    }

    /// Get counts for debugging/validation: (authors, posts).
    pub fn counts(&self) -> (usize, usize) {
        (self.authors.len(), self.posts.len())
    }
}
