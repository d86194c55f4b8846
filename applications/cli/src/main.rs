/// SunoHub - terminal client
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use sunohub_cli::{App, CliConfig};
use sunohub_core::{SongId, SortFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sunohub")]
#[command(about = "Browse, import, and queue SunoHub songs", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./sunohub.toml)
    #[arg(short, long, global = true, env = "SUNOHUB_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the shared feed
    Feed {
        /// latest, trending, top_rated, or mine
        #[arg(short, long, default_value = "latest")]
        sort: SortFilter,
        /// Filter by artist (substring, case-insensitive)
        #[arg(short, long)]
        artist: Option<String>,
    },
    /// Show one song with its reviews
    Song {
        /// Song id
        id: String,
    },
    /// Import a song from its page link
    Import {
        /// Song page link
        url: String,
        /// Publish to the shared feed
        #[arg(long)]
        publish: bool,
        /// Add to the queue
        #[arg(long)]
        queue: bool,
    },
    /// Manage the play queue
    Queue {
        #[command(subcommand)]
        action: QueueAction,
    },
    /// Play the next song
    Next {
        /// Song to roam from when the queue is empty
        #[arg(long)]
        from: Option<String>,
    },
    /// Play the previous song
    Prev {
        /// Song to roam from when the queue is empty
        #[arg(long)]
        from: Option<String>,
    },
    /// Toggle shuffle
    Shuffle,
    /// Cycle repeat mode (off, all, one, one_custom)
    Repeat,
    /// Print a song's lyric timeline
    Lyrics {
        /// Song id
        id: String,
        /// Highlight the line active at this many seconds
        #[arg(long)]
        at: Option<f64>,
    },
    /// Record line timings by pressing Enter along with the song
    SyncLyrics {
        /// Song id
        id: String,
    },
    /// Rate songs
    Review {
        #[command(subcommand)]
        action: ReviewAction,
    },
    /// Delete songs from the feed
    Delete {
        /// Song ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Rename an artist on every song
    RenameArtist {
        /// Current artist name (exact)
        from: String,
        /// New artist name
        to: String,
    },
    /// Print a song's share link
    Share {
        /// Song id
        id: String,
        /// Print the share page HTML instead
        #[arg(long)]
        html: bool,
    },
}

#[derive(Subcommand)]
enum QueueAction {
    /// Add a published song
    Add { id: String },
    /// Remove a song
    Remove { id: String },
    /// Remove everything
    Clear,
    /// Show the queue
    List,
    /// Jump to an entry and play it
    Play { index: usize },
}

#[derive(Subcommand)]
enum ReviewAction {
    /// Rate a song 1-5, replacing your earlier review
    Add {
        id: String,
        rating: u8,
        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Delete a review by its id
    Delete { review_id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sunohub=info,sunohub_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = CliConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let mut app = App::open(config)?;

    match cli.command {
        Commands::Feed { sort, artist } => app.feed(sort, artist.as_deref()).await?,
        Commands::Song { id } => app.song(&SongId::new(id)).await?,
        Commands::Import {
            url,
            publish,
            queue,
        } => app.import(&url, publish, queue).await?,
        Commands::Queue { action } => match action {
            QueueAction::Add { id } => app.queue_add(&SongId::new(id)).await?,
            QueueAction::Remove { id } => app.queue_remove(&id)?,
            QueueAction::Clear => app.queue_clear()?,
            QueueAction::List => app.queue_list(),
            QueueAction::Play { index } => app.queue_play(index).await?,
        },
        Commands::Next { from } => app.next(from.map(SongId::new)).await?,
        Commands::Prev { from } => app.prev(from.map(SongId::new)).await?,
        Commands::Shuffle => app.toggle_shuffle()?,
        Commands::Repeat => app.toggle_repeat()?,
        Commands::Lyrics { id, at } => app.lyrics(&SongId::new(id), at).await?,
        Commands::SyncLyrics { id } => {
            app.sync_lyrics(&SongId::new(id), std::io::stdin().lock())
                .await?;
        }
        Commands::Review { action } => match action {
            ReviewAction::Add {
                id,
                rating,
                comment,
            } => {
                app.review(&SongId::new(id), rating, comment.as_deref())
                    .await?;
            }
            ReviewAction::Delete { review_id } => app.delete_review(&review_id).await?,
        },
        Commands::Delete { ids } => {
            let ids: Vec<SongId> = ids.into_iter().map(SongId::new).collect();
            app.delete(&ids).await?;
        }
        Commands::RenameArtist { from, to } => app.rename_artist(&from, &to).await?,
        Commands::Share { id, html } => app.share(&SongId::new(id), html).await?,
    }

    Ok(())
}
