//! UI components module.

pub mod lyrics;
pub mod playlist;

pub use lyrics::render_lyrics;
pub use playlist::{render_playlist, PlaylistState};
