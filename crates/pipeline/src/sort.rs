//! Sort strategies for the visible post list.
//!
//! Three interchangeable comparators, all stable, all total:
//! - `recent` (default): newest normalized instant first;
//! - `popular`: highest like count first;
//! - `nearby`: closest city centroid first, unknown centroids last.
//!
//! Callers gate `nearby` behind the geolocation workflow; if it is invoked
//! without coordinates anyway, the strategy logs and degrades to `recent`
//! rather than erroring.

use feed_data::{city_centroid, haversine_km, Coordinates, Post};
use session::SortMode;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Order the post list according to the selected strategy.
///
/// Takes ownership of the list and returns a newly ordered one; the caller's
/// original collection is never mutated in place behind its back. All sorts
/// are stable: equal keys keep their input relative order.
pub fn sorted_posts(
    posts: Vec<Post>,
    mode: SortMode,
    viewer_location: Option<Coordinates>,
) -> Vec<Post> {
    match mode {
        SortMode::Popular => sort_by_likes(posts),
        SortMode::Nearby => match viewer_location {
            Some(viewer) => sort_by_distance(posts, viewer),
            None => {
                warn!("nearby sort requested without viewer location, using recent");
                sort_by_instant(posts)
            }
        },
        SortMode::Recent => sort_by_instant(posts),
    }
}

fn sort_by_likes(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.likes.cmp(&a.likes));
    posts
}

fn sort_by_instant(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.timestamp.instant().cmp(&a.timestamp.instant()));
    posts
}

fn sort_by_distance(posts: Vec<Post>, viewer: Coordinates) -> Vec<Post> {
    // Decorate with the distance once, sort, undecorate. Posts whose city
    // has no centroid get `None` and collect after every known distance;
    // two unknowns compare equal, which keeps the sort total.
    let mut keyed: Vec<(Option<f64>, Post)> = posts
        .into_iter()
        .map(|post| {
            let distance = city_centroid(&post.city).map(|c| haversine_km(viewer, c));
            (distance, post)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(da), Some(db)) => da.partial_cmp(db).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    debug!(count = keyed.len(), "sorted by distance from viewer");
    keyed.into_iter().map(|(_, post)| post).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{post, post_with_server_ts};

    fn ids(posts: &[Post]) -> Vec<&str> {
        posts.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_popular_descending_by_likes() {
        let posts = vec![
            post("a", "u1", "Madrid", 5, "2024-01-01T00:00:00Z"),
            post("b", "u2", "Sevilla", 10, "2024-02-01T00:00:00Z"),
        ];
        let sorted = sorted_posts(posts, SortMode::Popular, None);
        assert_eq!(ids(&sorted), ["b", "a"]);
    }

    #[test]
    fn test_popular_ties_keep_input_order() {
        let posts = vec![
            post("first", "u1", "Madrid", 7, "2024-01-01T00:00:00Z"),
            post("second", "u2", "Sevilla", 7, "2024-02-01T00:00:00Z"),
            post("third", "u3", "Valencia", 9, "2024-03-01T00:00:00Z"),
        ];
        let sorted = sorted_posts(posts, SortMode::Popular, None);
        assert_eq!(ids(&sorted), ["third", "first", "second"]);
    }

    #[test]
    fn test_recent_descending_by_instant() {
        let posts = vec![
            post("a", "u1", "Madrid", 5, "2024-01-01T00:00:00Z"),
            post("b", "u2", "Sevilla", 10, "2024-02-01T00:00:00Z"),
        ];
        let sorted = sorted_posts(posts, SortMode::Recent, None);
        assert_eq!(ids(&sorted), ["b", "a"]);
    }

    #[test]
    fn test_recent_interleaves_wire_representations() {
        let posts = vec![
            // 2024-01-01T00:00:00Z as a server timestamp object
            post_with_server_ts("server-jan", "u1", "Madrid", 1_704_067_200),
            post("iso-feb", "u2", "Sevilla", 0, "2024-02-01T00:00:00Z"),
            // 2024-03-01T00:00:00Z as a server timestamp object
            post_with_server_ts("server-mar", "u3", "Valencia", 1_709_251_200),
            post("iso-jan-later", "u4", "Bilbao", 0, "2024-01-01T12:00:00Z"),
        ];
        let sorted = sorted_posts(posts, SortMode::Recent, None);
        assert_eq!(
            ids(&sorted),
            ["server-mar", "iso-feb", "iso-jan-later", "server-jan"]
        );
    }

    #[test]
    fn test_recent_equal_instants_keep_input_order() {
        let posts = vec![
            post_with_server_ts("obj", "u1", "Madrid", 1_704_067_200),
            post("str", "u2", "Sevilla", 0, "2024-01-01T00:00:00Z"),
        ];
        let sorted = sorted_posts(posts, SortMode::Recent, None);
        assert_eq!(ids(&sorted), ["obj", "str"]);
    }

    #[test]
    fn test_nearby_ascending_distance_from_viewer() {
        // Viewer in Madrid
        let viewer = city_centroid("Madrid").unwrap();
        let posts = vec![
            post("bilbao", "u1", "Bilbao", 0, "2024-01-01T00:00:00Z"),
            post("madrid", "u2", "Madrid", 0, "2024-01-02T00:00:00Z"),
            post("sevilla", "u3", "Sevilla", 0, "2024-01-03T00:00:00Z"),
        ];
        let sorted = sorted_posts(posts, SortMode::Nearby, Some(viewer));
        assert_eq!(ids(&sorted), ["madrid", "sevilla", "bilbao"]);
    }

    #[test]
    fn test_nearby_unknown_centroid_sorts_last() {
        let viewer = city_centroid("Madrid").unwrap();
        let posts = vec![
            post("mystery", "u1", "Villarriba", 0, "2024-01-01T00:00:00Z"),
            post("madrid", "u2", "Madrid", 0, "2024-01-02T00:00:00Z"),
            post("enigma", "u3", "Villabajo", 0, "2024-01-03T00:00:00Z"),
        ];
        let sorted = sorted_posts(posts, SortMode::Nearby, Some(viewer));
        assert_eq!(sorted[0].id, "madrid");
        // Both unknowns follow every known centroid; order among them is
        // unspecified but must not panic.
        assert_eq!(sorted.len(), 3);
        assert!(sorted[1..].iter().all(|p| city_centroid(&p.city).is_none()));
    }

    #[test]
    fn test_nearby_without_location_degrades_to_recent() {
        let posts = vec![
            post("a", "u1", "Madrid", 5, "2024-01-01T00:00:00Z"),
            post("b", "u2", "Sevilla", 10, "2024-02-01T00:00:00Z"),
        ];
        let sorted = sorted_posts(posts, SortMode::Nearby, None);
        assert_eq!(ids(&sorted), ["b", "a"]);
    }
}
