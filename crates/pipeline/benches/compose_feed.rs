//! Benchmarks for feed composition
//!
//! Run with: cargo bench --package pipeline
//!
//! Composes a synthetic feed of 10k posts under each sort strategy, plus the
//! leaderboard aggregation on its own.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feed_data::{city_centroid, Author, FeedSnapshot, MediaKind, Post, PostTimestamp};
use pipeline::{trending_locations, FeedComposer};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use session::{SessionContext, SortMode};

const CITIES: &[&str] = &[
    "Madrid", "Sevilla", "Valencia", "Pamplona", "Bilbao", "Buñol", "Cádiz", "Villarriba",
];

fn synthetic_snapshot(posts: usize, authors: usize) -> FeedSnapshot {
    let mut rng = StdRng::seed_from_u64(42);

    let author_docs: Vec<Author> = (0..authors)
        .map(|i| Author {
            id: format!("u{i}"),
            username: format!("user{i}"),
            avatar_url: String::new(),
        })
        .collect();

    let post_docs: Vec<Post> = (0..posts)
        .map(|i| {
            let likes = rng.gen_range(0..500u32);
            Post {
                id: format!("p{i}"),
                user_id: format!("u{}", rng.gen_range(0..authors)),
                title: format!("Fiesta {i}"),
                description: String::new(),
                city: CITIES[rng.gen_range(0..CITIES.len())].to_string(),
                media_url: String::new(),
                media_kind: MediaKind::Image,
                timestamp: PostTimestamp::Server {
                    seconds: 1_700_000_000 + rng.gen_range(0..10_000_000),
                    nanos: 0,
                },
                likes,
                liked_by: Vec::new(),
                comment_count: 0,
            }
        })
        .map(|mut p| {
            // Keep the like invariant intact for the synthetic feed
            p.liked_by = (0..p.likes).map(|i| format!("liker{i}")).collect();
            p
        })
        .collect();

    let mut snap = FeedSnapshot::from_collections(author_docs, post_docs);
    snap.set_revision(1);
    snap
}

fn bench_compose_by_mode(c: &mut Criterion) {
    let snapshot = synthetic_snapshot(10_000, 200);

    for mode in [SortMode::Recent, SortMode::Popular, SortMode::Nearby] {
        let mut session = SessionContext::new();
        if mode == SortMode::Nearby {
            session.set_viewer_location(city_centroid("Madrid"));
        }
        session.set_sort_mode(mode);

        c.bench_function(&format!("compose_10k_{}", mode.as_str()), |b| {
            b.iter(|| {
                // Fresh composer per iteration: measure the cold path
                let mut composer = FeedComposer::new();
                let feed = composer.compose(black_box(&snapshot), black_box(&session));
                black_box(feed)
            })
        });
    }
}

fn bench_memoized_recompose(c: &mut Criterion) {
    let snapshot = synthetic_snapshot(10_000, 200);
    let session = SessionContext::new();
    let mut composer = FeedComposer::new();
    composer.compose(&snapshot, &session).unwrap();

    c.bench_function("compose_10k_cache_hit", |b| {
        b.iter(|| {
            let feed = composer.compose(black_box(&snapshot), black_box(&session));
            black_box(feed)
        })
    });
}

fn bench_trending_locations(c: &mut Criterion) {
    let snapshot = synthetic_snapshot(10_000, 200);

    c.bench_function("trending_locations_10k", |b| {
        b.iter(|| black_box(trending_locations(black_box(&snapshot))))
    });
}

criterion_group!(
    benches,
    bench_compose_by_mode,
    bench_memoized_recompose,
    bench_trending_locations
);
criterion_main!(benches);
