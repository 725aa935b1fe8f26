//! Single-flight lyrics fetching for the lyrics screen.
//!
//! At most one background lookup exists at a time. The UI loop polls it
//! once per tick and moves its output into the pane when it is done;
//! requests arriving while a lookup is still running are rejected.

use std::path::{Path, PathBuf};

use tokio::task::JoinHandle;

use super::editor::{self, EditRequest};
use super::fetch::{self, FetchContext, FetchOutcome, FetchReport};
use super::pane::LyricsPane;
use super::track::{self, Track};
use crate::ui::scroller::scroll_text;

const TITLE_PREFIX: &str = "Lyrics: ";

/// Result of asking for lyrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStatus {
    /// A lookup was started.
    Started,
    /// A previous lookup is still running; nothing was started.
    Busy,
    /// No track, or the track lacks an artist or title.
    Skipped,
}

/// The one outstanding background lookup.
struct FetchJob {
    track: Track,
    handle: JoinHandle<FetchReport>,
}

impl FetchJob {
    fn is_ready(&self) -> bool {
        self.handle.is_finished()
    }
}

/// Owns the lyrics pane and the background lookup feeding it.
pub struct LyricsCoordinator {
    ctx: FetchContext,
    pane: LyricsPane,
    job: Option<FetchJob>,
    track: Option<Track>,
    filename: Option<PathBuf>,
    title_scroll: usize,
    reload: bool,
    autoreload: bool,
}

impl LyricsCoordinator {
    pub fn new(ctx: FetchContext, autoreload: bool) -> Self {
        Self {
            ctx,
            pane: LyricsPane::new(),
            job: None,
            track: None,
            filename: None,
            title_scroll: 0,
            reload: false,
            autoreload,
        }
    }

    /// Start looking up lyrics for a track.
    pub async fn request(&mut self, track: Option<&Track>) -> RequestStatus {
        if let Some(job) = &self.job {
            if !job.is_ready() {
                tracing::debug!("Lyrics for {} are still being fetched", job.track);
                return RequestStatus::Busy;
            }
        }
        // A finished but unclaimed lookup is flushed before starting over.
        self.poll().await;

        self.reload = false;
        let Some(track) = track.filter(|t| t.is_valid()) else {
            return RequestStatus::Skipped;
        };

        let track = Track::new(&track.artist, &track.title);
        self.title_scroll = 0;
        self.filename = Some(self.ctx.cache.path_for(&track));
        self.track = Some(track.clone());

        self.pane.clear();
        if self.ctx.transport.is_some() {
            self.pane.set_placeholder("Fetching lyrics...");
        }

        let ctx = self.ctx.clone();
        let snapshot = track.clone();
        let handle = tokio::spawn(async move { fetch::fetch_lyrics(&ctx, snapshot).await });
        self.job = Some(FetchJob { track, handle });

        RequestStatus::Started
    }

    /// Finalize the background lookup if it has finished.
    ///
    /// Returns the outcome of the lookup that was finalized, if any.
    pub async fn poll(&mut self) -> Option<FetchOutcome> {
        if !self.job.as_ref().is_some_and(FetchJob::is_ready) {
            return None;
        }
        let job = self.job.take()?;

        let report = match job.handle.await {
            Ok(report) => report,
            Err(e) => {
                tracing::error!("Lyrics task for {} failed: {}", job.track, e);
                FetchReport {
                    track: job.track,
                    text: format!("Error while fetching lyrics: {}", e),
                    outcome: FetchOutcome::Failed(e.to_string()),
                }
            }
        };

        tracing::debug!("Lyrics for {} finished: {:?}", report.track, report.outcome);
        self.pane.append(&report.text);
        self.pane.flush();
        Some(report.outcome)
    }

    /// Per-tick housekeeping: finalize a finished lookup and run a pending
    /// reload against the now playing track.
    pub async fn update(&mut self, now_playing: Option<&Track>) {
        self.poll().await;

        if !self.reload || self.is_fetching() {
            return;
        }
        if now_playing.is_some_and(Track::is_valid) {
            self.request(now_playing).await;
        } else {
            self.reload = false;
        }
    }

    /// The now playing track changed.
    pub fn on_track_changed(&mut self, lyrics_active: bool) {
        if self.autoreload && lyrics_active {
            self.schedule_reload();
        }
    }

    /// Reload lyrics for the now playing track on the next update.
    pub fn schedule_reload(&mut self) {
        self.reload = true;
    }

    pub fn reload_pending(&self) -> bool {
        self.reload
    }

    /// Flip the reload-on-track-change preference, returning the new value.
    pub fn toggle_autoreload(&mut self) -> bool {
        self.autoreload = !self.autoreload;
        self.autoreload
    }

    pub fn autoreload(&self) -> bool {
        self.autoreload
    }

    pub fn is_fetching(&self) -> bool {
        self.job.is_some()
    }

    /// Header text for the lyrics screen, `width` columns wide at most.
    pub fn title(&mut self, width: usize) -> String {
        let name = self
            .track
            .as_ref()
            .map(|t| track::to_display(&t.to_string()))
            .unwrap_or_default();
        let available = width.saturating_sub(TITLE_PREFIX.len());
        format!(
            "{}{}",
            TITLE_PREFIX,
            scroll_text(&name, available, &mut self.title_scroll)
        )
    }

    /// Resolve an edit request against the current lyrics file.
    pub fn edit_request(&self, editor: &str, console: bool, active: bool) -> EditRequest {
        editor::prepare(editor, console, self.filename.as_deref(), active)
    }

    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn pane(&self) -> &LyricsPane {
        &self.pane
    }

    pub fn pane_mut(&mut self) -> &mut LyricsPane {
        &mut self.pane
    }
}
