//! lyrics-tui - A terminal lyrics viewer with a local cache and remote lookups.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};
use tokio::sync::mpsc;

mod action;
mod app;
mod config;
mod lyrics;
mod tui;
mod ui;

use action::{Action, Screen};
use app::App;
use config::Config;
use lyrics::{Provider, Track};
use ui::PlaylistState;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "lyrics-tui")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Playlist file with one "Artist - Title" per line (overrides config)
    #[arg(short, long)]
    playlist: Option<PathBuf>,

    /// Lyrics provider index (overrides config)
    #[arg(long)]
    provider: Option<usize>,

    /// Only use cached lyrics
    #[arg(long)]
    offline: bool,

    /// Print the available lyrics providers and exit
    #[arg(long)]
    list_providers: bool,

    /// Tracks to add to the playlist, as "Artist - Title"
    tracks: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install panic hooks
    tui::install_hooks()?;

    // Parse command-line arguments
    let args = Args::parse();

    if args.list_providers {
        for (i, provider) in Provider::all().iter().enumerate() {
            println!("{}: {}", i, provider.name());
        }
        return Ok(());
    }

    // Initialize logging
    let log_file = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("lyrics-tui")
        .join("lyrics-tui.log");

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_appender = tracing_subscriber::fmt::layer()
        .with_writer(std::fs::File::create(&log_file)?)
        .with_ansi(false);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::sink) // Don't write to stdout in TUI mode
        .finish()
        .with(file_appender)
        .try_init()
        .ok();

    // Load configuration
    let config_path = match args.config {
        Some(path) => path,
        None => Config::config_path()?,
    };
    let mut config = Config::load(&config_path).unwrap_or_else(|e| {
        tracing::warn!("Failed to load {}: {}", config_path.display(), e);
        Config::default()
    });

    // Apply command-line overrides
    if let Some(provider) = args.provider {
        config.lyrics.provider = provider;
    }
    if args.offline {
        config.lyrics.remote = false;
    }
    if let Some(playlist) = args.playlist {
        config.playlist.path = Some(playlist);
    }

    // Build the playlist
    let mut tracks = match &config.playlist.path {
        Some(path) => PlaylistState::load_file(path)?,
        None => Vec::new(),
    };
    for arg in &args.tracks {
        match Track::parse(arg) {
            Some(track) => tracks.push(track),
            None => tracing::warn!("Ignoring track without artist and title: {}", arg),
        }
    }

    // Create action channel
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    // Create application
    let mut app = App::new(config, config_path, tracks, action_tx.clone())?;

    // Initialize terminal
    let mut terminal = tui::init()?;

    // Main event loop
    let tick_rate = Duration::from_millis(100);

    loop {
        // Render UI
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        // Handle events with timeout
        if event::poll(tick_rate)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Press {
                        let action = handle_key_event(key.code, key.modifiers, &app);
                        if action != Action::None {
                            action_tx.send(action)?;
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    let action = handle_mouse_event(mouse);
                    if action != Action::None {
                        action_tx.send(action)?;
                    }
                }
                _ => {}
            }
        }

        // Send tick action
        action_tx.send(Action::Tick)?;

        // Process all pending actions
        while let Ok(action) = action_rx.try_recv() {
            app.handle_action(action).await?;
        }

        // Console editors take over the terminal until they exit
        if let Some(command) = app.take_console_editor() {
            tui::suspend()?;
            let result = command.run_console();
            tui::resume(&mut terminal)?;

            match result {
                Ok(status) if !status.success() => {
                    tracing::warn!("Editor {} exited with {}", command.editor, status);
                }
                Ok(_) => {}
                Err(e) => action_tx.send(Action::Error(e.to_string()))?,
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    tui::restore()?;

    Ok(())
}

/// Map key events to actions.
fn handle_key_event(code: KeyCode, modifiers: KeyModifiers, app: &App) -> Action {
    // Handle help overlay
    if app.show_help {
        return match code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Action::HideHelp,
            _ => Action::None,
        };
    }

    // Global keys
    match code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Action::Quit,
        _ => {}
    }

    match code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => Action::NavigateUp,
        KeyCode::Down | KeyCode::Char('j') => Action::NavigateDown,
        KeyCode::PageUp => Action::PageUp,
        KeyCode::PageDown => Action::PageDown,
        KeyCode::Esc | KeyCode::Backspace => Action::Back,

        // Vim-style jump navigation
        KeyCode::Char('g') => Action::JumpToTop,
        KeyCode::Char('G') => Action::JumpToBottom,
        KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
            Action::ScrollHalfPageDown
        }
        KeyCode::Char('u') if modifiers.contains(KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,

        // Playback
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char('n') => Action::NextTrack,
        KeyCode::Char('p') => Action::PreviousTrack,

        // Lyrics
        KeyCode::Char('l') => Action::ShowLyrics,
        KeyCode::Char(' ') if app.screen == Screen::Lyrics => Action::ToggleAutoReload,
        KeyCode::Char('e') => Action::EditLyrics,

        // Help
        KeyCode::Char('?') => Action::ShowHelp,

        // Clear error
        KeyCode::Char('x') => Action::ClearError,

        _ => Action::None,
    }
}

/// Handle mouse events.
fn handle_mouse_event(mouse: crossterm::event::MouseEvent) -> Action {
    match mouse.kind {
        MouseEventKind::ScrollUp => Action::MouseScroll(-3),
        MouseEventKind::ScrollDown => Action::MouseScroll(3),
        _ => Action::None,
    }
}

use tracing_subscriber::prelude::*;
