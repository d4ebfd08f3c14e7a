//! Snapshot loading from JSON collection exports.
//!
//! The document store exports each collection as a JSON array of documents:
//! - `users.json`: `[{ "id", "username", "avatarUrl" }, ...]`
//! - `posts.json`: `[{ "id", "userId", "title", ..., "timestamp" }, ...]`
//!
//! Both files are parsed in parallel, indexed in arrival order (the order
//! every downstream tie-break depends on), and then validated:
//! - a post whose author has no user document is kept but logged, since the
//!   live application renders such posts too;
//! - a like count that disagrees with the liking-user set is re-normalized
//!   to the set size, which is the authoritative side of the invariant.

use crate::error::{FeedDataError, Result};
use crate::types::{Author, FeedSnapshot, Post};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

fn read_collection<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Err(FeedDataError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|source| FeedDataError::JsonError {
        file: path.display().to_string(),
        source,
    })
}

impl FeedSnapshot {
    /// Load a snapshot from a directory containing `users.json` and
    /// `posts.json`.
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        let users_path = data_dir.join("users.json");
        let posts_path = data_dir.join("posts.json");

        // Parse both collections in parallel.
        let (authors, posts) = rayon::join(
            || read_collection::<Author>(&users_path),
            || read_collection::<Post>(&posts_path),
        );
        let authors = authors?;
        let posts = posts?;

        info!(
            authors = authors.len(),
            posts = posts.len(),
            "loaded feed collections from {}",
            data_dir.display()
        );

        Ok(Self::from_collections(authors, posts))
    }

    /// Build an indexed snapshot from already-deserialized collections.
    ///
    /// This is also the entry point the real-time subscription uses when a
    /// fresh snapshot is pushed.
    pub fn from_collections(authors: Vec<Author>, posts: Vec<Post>) -> Self {
        let mut snapshot = FeedSnapshot::new();
        for author in authors {
            snapshot.insert_author(author);
        }
        for mut post in posts {
            let liked = post.liked_by.len() as u32;
            if post.likes != liked {
                warn!(
                    post_id = %post.id,
                    likes = post.likes,
                    liked_by = liked,
                    "like count out of step with liking-user set, re-normalizing"
                );
                post.likes = liked;
            }
            if snapshot.get_author(&post.user_id).is_none() {
                warn!(post_id = %post.id, user_id = %post.user_id, "post by unknown author");
            }
            snapshot.insert_post(post);
        }
        snapshot
    }
}
