//! Lyrics lookup, caching and display state.

pub mod cache;
pub mod coordinator;
pub mod editor;
pub mod fetch;
pub mod markup;
pub mod pane;
pub mod providers;
pub mod track;
pub mod transport;

use thiserror::Error;

pub use cache::LyricsCache;
pub use coordinator::{LyricsCoordinator, RequestStatus};
pub use editor::{EditRequest, EditorCommand};
pub use fetch::FetchContext;
pub use providers::Provider;
pub use track::Track;
pub use transport::{HttpTransport, NetworkGate};

/// Lyrics subsystem errors.
#[derive(Debug, Error)]
pub enum LyricsError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("{0}")]
    Transport(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to run editor: {0}")]
    Editor(std::io::Error),
}
