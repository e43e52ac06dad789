/// VibeBeat - command-line music client
use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vibebeat_cli::{AppConfig, AppState};
use vibebeat_core::PlaylistId;
use vibebeat_sync::views::{self, PlaylistDetailView};
use vibebeat_sync::{Notice, NoticeLevel, SyncObserver};

#[derive(Parser)]
#[command(name = "vibebeat")]
#[command(about = "VibeBeat music client", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend URL (overrides configuration)
    #[arg(long, global = true, env = "VIBEBEAT_URL")]
    server: Option<String>,

    /// Print views as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the library
    Songs {
        /// Group by artist
        #[arg(long, conflicts_with = "albums")]
        artists: bool,
        /// Group by album
        #[arg(long)]
        albums: bool,
    },
    /// Search titles, artists and albums
    Search { query: String },
    /// Upload an audio file
    Upload { path: PathBuf },
    /// List playlists
    Playlists,
    /// Manage one playlist
    Playlist {
        #[command(subcommand)]
        action: PlaylistAction,
    },
    /// Show the backend's legacy single playlist
    LegacyPlaylist,
    /// Play a song, the library, or a playlist
    Play {
        /// Song filename; with --library, the song to start at
        filename: Option<String>,
        /// Play a playlist by id
        #[arg(long, conflicts_with = "filename")]
        playlist: Option<PlaylistId>,
        /// Queue the whole library
        #[arg(long)]
        library: bool,
        #[arg(long)]
        shuffle: bool,
        #[arg(long)]
        repeat: bool,
        /// Skip forward this many times after starting
        #[arg(long, default_value_t = 0)]
        skip: usize,
    },
    /// Log in with a Gmail address
    Login {
        email: String,
        password: String,
        /// Keep the session across runs
        #[arg(long)]
        remember: bool,
    },
    /// Log out
    Logout,
    /// Show the logged in user
    Whoami,
    /// Like or unlike a song
    Like { filename: String },
    /// List liked songs
    Liked,
    /// List recently played songs
    Recent,
}

#[derive(Subcommand)]
enum PlaylistAction {
    /// Show a playlist's songs
    Show { id: PlaylistId },
    /// Create a playlist
    Create {
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Rename a playlist and set its description
    Edit {
        id: PlaylistId,
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a playlist
    Delete { id: PlaylistId },
    /// Add songs to a playlist
    Add {
        id: PlaylistId,
        #[arg(required = true)]
        filenames: Vec<String>,
    },
    /// Remove a song from a playlist
    Remove { id: PlaylistId, filename: String },
    /// List library songs not yet in a playlist
    Candidates { id: PlaylistId },
}

/// Prints notices to stderr
struct ConsoleObserver;

impl SyncObserver for ConsoleObserver {
    fn on_notice(&self, notice: &Notice) {
        match (notice.level, &notice.detail) {
            (NoticeLevel::Info, _) => eprintln!("{}", notice.message),
            (NoticeLevel::Error, Some(detail)) => eprintln!("error: {} ({})", notice.message, detail),
            (NoticeLevel::Error, None) => eprintln!("error: {}", notice.message),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vibebeat=info,vibebeat_cli=info,vibebeat_sync=info,vibebeat_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.server {
        config.server.url = url;
    }
    config.validate()?;

    let mut state = AppState::new(config, Arc::new(ConsoleObserver))?;
    let autosave = state.spawn_autosave();

    let result = run(&mut state, cli.command, cli.json).await;

    autosave.shutdown().await;
    result
}

async fn run(state: &mut AppState, command: Commands, json: bool) -> anyhow::Result<()> {
    match command {
        Commands::Songs { artists, albums } => {
            state.sync.refresh_songs().await?;
            let catalog = state.sync.catalog().snapshot();
            if artists {
                emit(json, &catalog.artists(), |groups| {
                    for group in groups {
                        println!("{} ({})", group.name, group.songs.len());
                    }
                })?;
            } else if albums {
                emit(json, &catalog.albums(), |groups| {
                    for group in groups {
                        println!("{} - {} ({})", group.name, group.artist, group.songs.len());
                    }
                })?;
            } else {
                emit(json, &views::library_view(&catalog), |view| {
                    if let Some(message) = view.empty_message {
                        println!("{}", message);
                    }
                    for card in &view.cards {
                        println!("{}  [{}]", card.title, card.filename);
                    }
                })?;
            }
        }
        Commands::Search { query } => {
            state.sync.refresh_songs().await?;
            let results = state.sync.catalog().snapshot().search(&query);
            emit(json, &results, |results| {
                if results.is_empty() {
                    println!("No results for \"{}\"", query);
                }
                for (label, songs) in [
                    ("Songs", &results.songs),
                    ("Artists", &results.artists),
                    ("Albums", &results.albums),
                ] {
                    if !songs.is_empty() {
                        println!("{}:", label);
                        for song in songs {
                            println!("  {} - {} ({})", song.title, song.artist, song.album);
                        }
                    }
                }
            })?;
        }
        Commands::Upload { path } => {
            let (filename, contents) = read_upload(&path).await?;
            state.sync.upload(&filename, contents).await?;
        }
        Commands::Playlists => {
            state.sync.refresh_playlists().await?;
            let playlists = state.sync.registry().snapshot();
            emit(json, &views::playlist_cards(&playlists), |cards| {
                if cards.is_empty() {
                    println!("No playlists");
                }
                for card in cards {
                    println!("#{} {} - {}", card.id, card.name, card.count_label);
                    if !card.description.is_empty() {
                        println!("    {}", card.description);
                    }
                }
            })?;
        }
        Commands::Playlist { action } => {
            state.load().await?;
            run_playlist(state, action, json).await?;
        }
        Commands::LegacyPlaylist => {
            let entries = state.client.songs().legacy_playlist().await?;
            for entry in entries {
                println!("{}", entry.filename);
            }
        }
        Commands::Play {
            filename,
            playlist,
            library,
            shuffle,
            repeat,
            skip,
        } => {
            state.load().await?;
            state.player.set_shuffle(shuffle);
            state.player.set_repeat(repeat);

            match (playlist, library, filename) {
                (Some(id), _, _) => state.play_playlist(id)?,
                (None, true, start) => state.play_library(start.as_deref())?,
                (None, false, Some(filename)) => state.play_song(&filename)?,
                (None, false, None) => anyhow::bail!("Nothing to play: give a filename, --library or --playlist"),
            }
            for _ in 0..skip {
                if !state.next()? {
                    break;
                }
            }

            let catalog = state.sync.catalog().snapshot();
            let queue = views::queue_view(state.player.queue(), &*catalog);
            let now_playing = state.now_playing();
            emit(json, &(&now_playing, &queue), |(now, queue)| {
                if let Some(song) = &now.song {
                    println!("Now playing: {} - {}", song.title, song.artist);
                }
                for row in queue.iter() {
                    let marker = if row.active { ">" } else { " " };
                    println!("{} {}. {}", marker, row.index + 1, row.title);
                }
            })?;
        }
        Commands::Login {
            email,
            password,
            remember,
        } => {
            let user = state.session.login(&email, &password, remember)?;
            println!("Welcome, {}", user.name);
        }
        Commands::Logout => {
            state.session.logout()?;
            println!("Logged out");
        }
        Commands::Whoami => match state.session.current_user() {
            Some(user) => println!("{} <{}>", user.name, user.email),
            None => println!("Not logged in"),
        },
        Commands::Like { filename } => {
            state.sync.refresh_songs().await?;
            if state.sync.catalog().lookup(&filename).is_none() {
                anyhow::bail!("Song not found: {}", filename);
            }
            let liked = state.session.toggle_like(&filename)?;
            println!("{} {}", if liked { "Liked" } else { "Unliked" }, filename);
        }
        Commands::Liked => {
            state.sync.refresh_songs().await?;
            let liked = state.liked_view();
            emit(json, &liked, |cards| {
                println!("{}", state.session.liked_count_label());
                for card in cards {
                    println!("  {}", card.title);
                }
            })?;
        }
        Commands::Recent => {
            state.sync.refresh_songs().await?;
            emit(json, &state.recent_view(), |cards| {
                for card in cards {
                    println!("{}", card.title);
                }
            })?;
        }
    }

    Ok(())
}

async fn run_playlist(state: &AppState, action: PlaylistAction, json: bool) -> anyhow::Result<()> {
    let sync = &state.sync;
    match action {
        PlaylistAction::Show { id } => {
            let Some(playlist) = sync.select_playlist(id) else {
                anyhow::bail!("Playlist {} not found", id);
            };
            let catalog = sync.catalog().snapshot();
            emit(json, &PlaylistDetailView::build(&playlist, &*catalog), |view| {
                println!("{} - {}", view.title, view.info);
                if !view.description.is_empty() {
                    println!("{}", view.description);
                }
                if let Some(message) = view.empty_message {
                    println!("{}", message);
                }
                for row in &view.rows {
                    let missing = if row.available { "" } else { "  (unavailable)" };
                    println!("{}. {}{}", row.position, row.title, missing);
                }
            })?;
        }
        PlaylistAction::Create { name, description } => {
            match sync.create_playlist(&name, &description).await? {
                Some(id) => println!("Created playlist #{}", id),
                None => println!("Created playlist"),
            }
        }
        PlaylistAction::Edit {
            id,
            name,
            description,
        } => {
            sync.edit_playlist(id, &name, &description).await?;
            println!("Saved");
        }
        PlaylistAction::Delete { id } => {
            sync.delete_playlist(id).await?;
            println!("Deleted playlist #{}", id);
        }
        PlaylistAction::Add { id, filenames } => {
            sync.add_songs(id, &filenames).await?;
            println!("Added {} song(s)", filenames.len());
        }
        PlaylistAction::Remove { id, filename } => {
            sync.remove_song(id, &filename).await?;
            println!("Removed {}", filename);
        }
        PlaylistAction::Candidates { id } => {
            let Some(playlist) = sync.registry().get(id) else {
                anyhow::bail!("Playlist {} not found", id);
            };
            let catalog = sync.catalog().snapshot();
            emit(json, &views::add_candidates(&catalog, &playlist), |cards| {
                for card in cards {
                    println!("{}  [{}]", card.title, card.filename);
                }
            })?;
        }
    }
    Ok(())
}

/// Print `value` as JSON, or through `text`
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

async fn read_upload(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Not a file: {}", path.display()))?
        .to_string();
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((filename, contents))
}
