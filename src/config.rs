//! Application configuration management.

use std::path::{Path, PathBuf};

use color_eyre::Result;
use serde::{Deserialize, Serialize};

use crate::lyrics::LyricsCache;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Lyrics lookup configuration
    #[serde(default)]
    pub lyrics: LyricsConfig,

    /// External editor configuration
    #[serde(default)]
    pub editor: EditorConfig,

    /// Playlist configuration
    #[serde(default)]
    pub playlist: PlaylistConfig,
}

/// Lyrics lookup configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricsConfig {
    /// Index of the remote provider (0 = lyricwiki.org, 1 = lyricsplugin.com)
    #[serde(default)]
    pub provider: usize,

    /// Reload lyrics when the playing song changes
    #[serde(default)]
    pub autoreload: bool,

    /// Look up lyrics remotely when they are not cached
    #[serde(default = "default_true")]
    pub remote: bool,

    /// Lyrics directory (defaults to ~/.lyrics)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// External editor configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Editor command, run through the shell (empty = not set)
    #[serde(default)]
    pub command: String,

    /// The editor runs inside the terminal
    #[serde(default = "default_true")]
    pub console: bool,
}

/// Playlist configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaylistConfig {
    /// File with one "Artist - Title" per line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

impl Default for LyricsConfig {
    fn default() -> Self {
        Self {
            provider: 0,
            autoreload: false,
            remote: true,
            directory: None,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: String::new(),
            console: true,
        }
    }
}

impl LyricsConfig {
    /// Directory holding cached lyrics.
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .unwrap_or_else(LyricsCache::default_dir)
    }
}

impl Config {
    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not determine config directory"))?;

        Ok(config_dir.join("lyrics-tui").join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        Ok(config)
    }

    /// Change the configuration stored at `path` without touching anything
    /// else in it. Nothing is written if the file does not parse.
    pub fn update(path: &Path, change: impl FnOnce(&mut Config)) -> Result<()> {
        let mut stored = Self::load(path)?;
        change(&mut stored);
        stored.save(path)
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved configuration to {}", path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::cache::tests::temp_dir;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.lyrics.provider, 0);
        assert!(config.lyrics.remote);
        assert!(!config.lyrics.autoreload);
        assert!(config.editor.command.is_empty());
        assert!(config.editor.console);
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
            [lyrics]
            provider = 1
            directory = "/srv/lyrics"

            [editor]
            command = "gvim -f"
            console = false
            "#,
        )
        .unwrap();

        assert_eq!(config.lyrics.provider, 1);
        assert!(config.lyrics.remote);
        assert_eq!(config.lyrics.directory(), PathBuf::from("/srv/lyrics"));
        assert_eq!(config.editor.command, "gvim -f");
        assert!(!config.editor.console);
        assert!(config.playlist.path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = temp_dir();
        let path = dir.join("config.toml");
        assert_eq!(Config::load(&path).unwrap(), Config::default());

        let mut config = Config::default();
        config.lyrics.autoreload = true;
        config.editor.command = String::from("nano");
        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_update_changes_one_setting() {
        let dir = temp_dir();
        let path = dir.join("config.toml");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "[lyrics]\nprovider = 1\nremote = false\n").unwrap();

        Config::update(&path, |c| c.lyrics.autoreload = true).unwrap();

        let stored = Config::load(&path).unwrap();
        assert!(stored.lyrics.autoreload);
        assert_eq!(stored.lyrics.provider, 1);
        assert!(!stored.lyrics.remote);

        std::fs::write(&path, "provider = [").unwrap();
        assert!(Config::update(&path, |c| c.lyrics.autoreload = false).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "provider = [");

        let _ = std::fs::remove_dir_all(dir);
    }
}
