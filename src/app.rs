//! Main application state and logic.

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::Result;
use tokio::sync::mpsc;

use crate::action::{Action, Screen};
use crate::config::Config;
use crate::lyrics::transport::Transport;
use crate::lyrics::{
    EditRequest, EditorCommand, FetchContext, HttpTransport, LyricsCache, LyricsCoordinator,
    NetworkGate, Provider, RequestStatus, Track,
};
use crate::ui::PlaylistState;

/// How many ticks a status message stays visible.
const MESSAGE_TICKS: u16 = 50;

/// Main application state.
pub struct App {
    /// Whether the app should quit
    pub should_quit: bool,

    /// Configuration
    pub config: Config,

    /// Where the configuration is saved
    pub config_path: PathBuf,

    /// Active screen
    pub screen: Screen,

    /// Screen to return to when leaving the lyrics screen
    pub previous_screen: Screen,

    /// Playlist state
    pub playlist: PlaylistState,

    /// Lyrics state
    pub lyrics: LyricsCoordinator,

    /// Help overlay visible
    pub show_help: bool,

    /// Transient message for the status line
    pub status_message: Option<String>,

    /// Ticks left before the status message is cleared
    message_ticks: u16,

    /// Error message to display
    pub error_message: Option<String>,

    /// Action sender for async operations
    pub action_tx: mpsc::UnboundedSender<Action>,

    /// Visible rows of the main area, for half-page scrolling
    pub page_size: usize,

    /// Console editor waiting for the terminal
    pending_editor: Option<EditorCommand>,
}

impl App {
    /// Create a new application instance.
    pub fn new(
        config: Config,
        config_path: PathBuf,
        tracks: Vec<Track>,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Result<Self> {
        let transport: Option<Arc<dyn Transport>> = if config.lyrics.remote {
            Some(Arc::new(HttpTransport::new()?))
        } else {
            None
        };

        let ctx = FetchContext {
            cache: LyricsCache::new(config.lyrics.directory()),
            provider: Provider::from_index(config.lyrics.provider),
            transport,
            gate: NetworkGate::new(),
        };

        Ok(Self::with_context(config, config_path, tracks, ctx, action_tx))
    }

    /// Create an application around an existing fetch context.
    pub fn with_context(
        config: Config,
        config_path: PathBuf,
        tracks: Vec<Track>,
        ctx: FetchContext,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        tracing::info!(
            "Lyrics directory {}, provider {}, remote lookups {}",
            ctx.cache.dir().display(),
            ctx.provider.name(),
            if ctx.transport.is_some() { "on" } else { "off" }
        );

        let autoreload = config.lyrics.autoreload;
        Self {
            should_quit: false,
            config,
            config_path,
            screen: Screen::default(),
            previous_screen: Screen::default(),
            playlist: PlaylistState::new(tracks),
            lyrics: LyricsCoordinator::new(ctx, autoreload),
            show_help: false,
            status_message: None,
            message_ticks: 0,
            error_message: None,
            action_tx,
            page_size: 20,
            pending_editor: None,
        }
    }

    /// Handle an action and update state.
    pub async fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }

            Action::Tick => {
                self.lyrics.update(self.playlist.now_playing()).await;

                if self.message_ticks > 0 {
                    self.message_ticks -= 1;
                    if self.message_ticks == 0 {
                        self.status_message = None;
                    }
                }
            }

            // Navigation
            Action::NavigateUp => match self.screen {
                Screen::Playlist => self.playlist.select_previous(),
                Screen::Lyrics => self.lyrics.pane_mut().scroll_up(1),
            },

            Action::NavigateDown => match self.screen {
                Screen::Playlist => self.playlist.select_next(),
                Screen::Lyrics => self.lyrics.pane_mut().scroll_down(1),
            },

            Action::PageUp => match self.screen {
                Screen::Playlist => self.playlist.scroll_half_page_up(self.page_size * 2),
                Screen::Lyrics => self.lyrics.pane_mut().page_up(),
            },

            Action::PageDown => match self.screen {
                Screen::Playlist => self.playlist.scroll_half_page_down(self.page_size * 2),
                Screen::Lyrics => self.lyrics.pane_mut().page_down(),
            },

            Action::ScrollHalfPageUp => {
                let half = (self.page_size / 2).max(1);
                match self.screen {
                    Screen::Playlist => self.playlist.scroll_half_page_up(self.page_size),
                    Screen::Lyrics => self.lyrics.pane_mut().scroll_up(half as u16),
                }
            }

            Action::ScrollHalfPageDown => {
                let half = (self.page_size / 2).max(1);
                match self.screen {
                    Screen::Playlist => self.playlist.scroll_half_page_down(self.page_size),
                    Screen::Lyrics => self.lyrics.pane_mut().scroll_down(half as u16),
                }
            }

            Action::JumpToTop => match self.screen {
                Screen::Playlist => self.playlist.jump_to_top(),
                Screen::Lyrics => self.lyrics.pane_mut().scroll_to_top(),
            },

            Action::JumpToBottom => match self.screen {
                Screen::Playlist => self.playlist.jump_to_bottom(),
                Screen::Lyrics => self.lyrics.pane_mut().scroll_to_bottom(),
            },

            Action::MouseScroll(delta) => {
                let steps = delta.unsigned_abs();
                let action = if delta < 0 {
                    Action::NavigateUp
                } else {
                    Action::NavigateDown
                };
                for _ in 0..steps {
                    self.action_tx.send(action.clone())?;
                }
            }

            Action::Back => {
                if self.screen == Screen::Lyrics {
                    self.screen = self.previous_screen;
                }
            }

            // Playback
            Action::PlaySelected => {
                if self.screen == Screen::Playlist && self.playlist.play_selected().is_some() {
                    self.track_changed();
                }
            }

            Action::NextTrack => {
                if self.playlist.advance().is_some() {
                    self.track_changed();
                }
            }

            Action::PreviousTrack => {
                if self.playlist.go_back().is_some() {
                    self.track_changed();
                }
            }

            // Lyrics
            Action::ShowLyrics => {
                self.show_lyrics().await;
            }

            Action::ToggleAutoReload => {
                if self.screen == Screen::Lyrics {
                    self.toggle_autoreload();
                }
            }

            Action::EditLyrics => {
                self.edit_lyrics();
            }

            // Overlays
            Action::ShowHelp => {
                self.show_help = true;
            }

            Action::HideHelp => {
                self.show_help = false;
            }

            // Errors
            Action::Error(msg) => {
                tracing::error!("{}", msg);
                self.error_message = Some(msg);
            }

            Action::ClearError => {
                self.error_message = None;
            }

            Action::None => {}
        }

        Ok(())
    }

    /// Console editor to run once the terminal has been handed over.
    pub fn take_console_editor(&mut self) -> Option<EditorCommand> {
        self.pending_editor.take()
    }

    /// Show a message on the status line for a few seconds.
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.message_ticks = MESSAGE_TICKS;
    }

    fn track_changed(&mut self) {
        if let Some(track) = self.playlist.now_playing() {
            tracing::info!("Now playing: {}", track);
        }
        self.lyrics.on_track_changed(self.screen == Screen::Lyrics);
    }

    /// Switch to the lyrics screen, or back from it.
    async fn show_lyrics(&mut self) {
        let reload = self.lyrics.reload_pending();
        if self.screen == Screen::Lyrics && !reload {
            self.screen = self.previous_screen;
            return;
        }

        let track = if reload {
            self.playlist.now_playing().cloned()
        } else {
            self.playlist.selected_track().cloned()
        };

        match self.lyrics.request(track.as_ref()).await {
            RequestStatus::Started => {
                if self.screen != Screen::Lyrics {
                    self.previous_screen = self.screen;
                    self.screen = Screen::Lyrics;
                }
            }
            RequestStatus::Busy => self.set_message("Lyrics are being downloaded..."),
            RequestStatus::Skipped => {}
        }
    }

    fn toggle_autoreload(&mut self) {
        let enabled = self.lyrics.toggle_autoreload();
        self.config.lyrics.autoreload = enabled;
        self.set_message(format!(
            "Reload lyrics if song changes: {}",
            if enabled { "On" } else { "Off" }
        ));

        // Only the toggle is written back; command-line overrides stay in memory.
        let saved = Config::update(&self.config_path, |stored| {
            stored.lyrics.autoreload = enabled;
        });
        if let Err(e) = saved {
            tracing::warn!("Failed to save configuration: {}", e);
            self.error_message = Some(format!("Failed to save configuration: {}", e));
        }
    }

    fn edit_lyrics(&mut self) {
        let request = self.lyrics.edit_request(
            &self.config.editor.command,
            self.config.editor.console,
            self.screen == Screen::Lyrics,
        );

        match request {
            EditRequest::Inactive => {}
            EditRequest::NoEditor => self.set_message("External editor is not set!"),
            EditRequest::NoFile => self.set_message("No lyrics file to edit"),
            EditRequest::Launch(command) => {
                self.set_message("Opening lyrics in external editor...");
                if command.console {
                    self.pending_editor = Some(command);
                } else if let Err(e) = command.spawn_detached() {
                    tracing::error!("{}", e);
                    self.error_message = Some(e.to_string());
                }
            }
        }
    }
}
