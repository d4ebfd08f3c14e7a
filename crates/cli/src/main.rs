use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use feed_data::{known_cities, Coordinates, FeedSnapshot, MediaKind};
use pipeline::filters::{BlockedAuthorFilter, MediaKindFilter, RelevanceFilter};
use pipeline::{ComposedFeed, FeedComposer, FeedFilterPipeline};
use server::{FeedOrchestrator, FeedPublisher, SearchStatus};
use session::{GeoOutcome, KeywordSearch, SessionContext, SortMode, SortRequest};
use std::path::PathBuf;
use std::time::Instant;

/// SaldeFiesta - Festival feed composer
#[derive(Parser)]
#[command(name = "salde-feed")]
#[command(about = "Compose the SaldeFiesta festival feed from a snapshot export", long_about = None)]
struct Cli {
    /// Path to the snapshot directory (users.json + posts.json)
    #[arg(short, long, default_value = "data/sample")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the composed feed
    Feed {
        /// Sort mode: recent, popular or nearby (anything else falls back to recent)
        #[arg(long, default_value = "recent")]
        sort: String,

        /// Viewer latitude (required for nearby sort)
        #[arg(long)]
        lat: Option<f64>,

        /// Viewer longitude (required for nearby sort)
        #[arg(long)]
        lon: Option<f64>,

        /// Author ids to block for this session
        #[arg(long)]
        block: Vec<String>,

        /// Run a search query and show only matching posts
        #[arg(long)]
        search: Option<String>,

        /// Only show this media kind: image or video
        #[arg(long)]
        media: Option<String>,

        /// Number of posts to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show the gamification leaderboards
    Leaderboard,

    /// Show an author profile and their posts
    Author {
        /// Author id to display
        #[arg(long)]
        user_id: String,
    },

    /// List the cities with a known centroid (nearby sort coverage)
    Cities,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading feed snapshot from {}...", cli.data_dir.display());
    let start = Instant::now();
    let snapshot = FeedSnapshot::load_from_files(&cli.data_dir)
        .context("Failed to load feed snapshot")?;
    println!("{} Loaded snapshot in {:?}", "✓".green(), start.elapsed());

    match cli.command {
        Commands::Feed {
            sort,
            lat,
            lon,
            block,
            search,
            media,
            limit,
        } => handle_feed(snapshot, sort, lat, lon, block, search, media, limit).await?,
        Commands::Leaderboard => handle_leaderboard(snapshot)?,
        Commands::Author { user_id } => handle_author(snapshot, user_id)?,
        Commands::Cities => handle_cities(),
    }

    Ok(())
}

fn parse_media_kind(kind: &str) -> Result<MediaKind> {
    match kind {
        "image" => Ok(MediaKind::Image),
        "video" => Ok(MediaKind::Video),
        other => Err(anyhow!("unknown media kind: {other}")),
    }
}

/// Handle the 'feed' command
#[allow(clippy::too_many_arguments)]
async fn handle_feed(
    snapshot: FeedSnapshot,
    sort: String,
    lat: Option<f64>,
    lon: Option<f64>,
    block: Vec<String>,
    search: Option<String>,
    media: Option<String>,
    limit: usize,
) -> Result<()> {
    // The media toggle is just one more pipeline stage.
    let mut filters = FeedFilterPipeline::new()
        .add_filter(BlockedAuthorFilter)
        .add_filter(RelevanceFilter);
    if let Some(kind) = media.as_deref() {
        filters = filters.add_filter(MediaKindFilter::new(parse_media_kind(kind)?));
    }

    let publisher = FeedPublisher::new(snapshot);
    let mut orchestrator =
        FeedOrchestrator::new(publisher.subscribe(), SessionContext::new(), KeywordSearch)
            .with_composer(FeedComposer::with_filters(filters));

    for user_id in block {
        orchestrator.block_author(&user_id);
    }

    // The geolocation prompt is a browser affair; on the command line the
    // coordinates either came in as flags (granted) or they didn't (denied).
    let mode = SortMode::parse_lossy(&sort);
    if orchestrator.request_sort(mode) == SortRequest::NeedsLocation {
        let outcome = match (lat, lon) {
            (Some(lat), Some(lon)) => GeoOutcome::Granted(Coordinates::new(lat, lon)),
            _ => GeoOutcome::Denied,
        };
        let effective = orchestrator.resolve_geolocation(outcome);
        if effective != SortMode::Nearby {
            println!(
                "{} nearby sort needs --lat and --lon; showing recent instead",
                "!".yellow()
            );
        }
    }

    if let Some(query) = search.as_deref() {
        match orchestrator.search(query).await {
            SearchStatus::Applied { matches } => {
                println!("{} Search \"{}\" matched {} posts", "✓".green(), query, matches)
            }
            SearchStatus::Unavailable => {
                println!("{} Search unavailable, showing all posts", "!".yellow())
            }
            SearchStatus::Cleared | SearchStatus::Superseded => {}
        }
    }

    let feed = orchestrator.compose()?;
    print_feed(&feed, limit);
    orchestrator.shutdown();
    Ok(())
}

fn print_feed(feed: &ComposedFeed, limit: usize) {
    if feed.posts.is_empty() {
        if feed.search_active {
            println!("{}", "No posts match this search.".yellow());
        } else {
            println!("{}", "The feed is empty.".yellow());
        }
        return;
    }

    for (i, post) in feed.posts.iter().take(limit).enumerate() {
        println!(
            "{}. {} {} {}",
            i + 1,
            post.title.bold(),
            format!("({})", post.city).cyan(),
            format!("[{:?}]", post.media_kind).dimmed(),
        );
        println!(
            "   {}   ♥ {}   comments: {}",
            post.timestamp.instant().format("%Y-%m-%d %H:%M"),
            post.likes,
            post.comment_count,
        );
        if !post.description.is_empty() {
            println!("   {}", post.description.dimmed());
        }
    }
}

/// Handle the 'leaderboard' command
fn handle_leaderboard(snapshot: FeedSnapshot) -> Result<()> {
    let contributors = pipeline::top_contributors(&snapshot);
    let locations = pipeline::trending_locations(&snapshot);

    println!("{}", "Top contributors".bold().blue());
    for (i, entry) in contributors.iter().enumerate() {
        println!(
            "  {}. {} — {} posts",
            i + 1,
            entry.author.username.bold(),
            entry.score
        );
    }

    println!("{}", "Trending locations".bold().blue());
    for (i, entry) in locations.iter().enumerate() {
        println!("  {}. {} — {} posts", i + 1, entry.city.bold(), entry.post_count);
    }
    Ok(())
}

/// Handle the 'author' command
fn handle_author(snapshot: FeedSnapshot, user_id: String) -> Result<()> {
    let author = snapshot
        .get_author(&user_id)
        .ok_or_else(|| anyhow!("Author {} not found", user_id))?;

    println!("{}", format!("{} ({})", author.username, author.id).bold().blue());
    let post_ids = snapshot.posts_by_author(&user_id);
    println!("{}Posts: {}", "• ".green(), post_ids.len());

    let mut total_likes = 0;
    for id in post_ids {
        if let Some(post) = snapshot.get_post(id) {
            total_likes += post.likes;
            println!(
                "  - {} {} ♥ {}",
                post.title,
                format!("({})", post.city).cyan(),
                post.likes
            );
        }
    }
    println!("{}Total likes received: {}", "• ".green(), total_likes);
    Ok(())
}

/// Handle the 'cities' command
fn handle_cities() {
    println!("{}", "Cities with a known centroid:".bold().blue());
    for city in known_cities() {
        println!("  - {city}");
    }
}
