//! Application actions/events that drive state changes.

/// Actions that can be dispatched to update application state.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Application lifecycle
    Quit,
    Tick,

    // Navigation
    NavigateUp,
    NavigateDown,
    PageUp,
    PageDown,
    JumpToTop,
    JumpToBottom,
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    Back,

    // Playback
    PlaySelected,
    NextTrack,
    PreviousTrack,

    // Lyrics
    ShowLyrics,
    ToggleAutoReload,
    EditLyrics,

    // Overlays
    ShowHelp,
    HideHelp,

    // Mouse
    MouseScroll(i16), // positive = down, negative = up

    // Errors
    Error(String),
    ClearError,

    // No-op
    None,
}

/// Screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Playlist,
    Lyrics,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Playlist => "Playlist",
            Self::Lyrics => "Lyrics",
        }
    }
}
