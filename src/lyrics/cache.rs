//! On-disk lyrics cache: one text file per track.

use std::path::{Path, PathBuf};

use super::track::Track;
use super::LyricsError;

/// Characters that are not allowed in cache filenames.
const UNALLOWED_CHARS: &[char] = &['"', '*', '/', ':', '<', '>', '?', '\\', '|'];

/// Directory of `ARTIST - TITLE.txt` files.
#[derive(Debug, Clone)]
pub struct LyricsCache {
    dir: PathBuf,
}

impl LyricsCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default cache location, `~/.lyrics`.
    pub fn default_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".lyrics")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the cache file for a track.
    pub fn path_for(&self, track: &Track) -> PathBuf {
        let mut filename = escape_filename(&track.to_string());
        filename.push_str(".txt");
        self.dir.join(filename)
    }

    /// Create the cache directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Result<(), LyricsError> {
        let mut builder = tokio::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o755);
        builder.create(&self.dir).await?;
        Ok(())
    }

    /// Read cached lyrics as lines.
    ///
    /// Returns `None` when there is no readable file for this path.
    pub async fn read(&self, path: &Path) -> Option<Vec<String>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                Some(text.lines().map(str::to_owned).collect())
            }
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!("Failed to read {}: {}", path.display(), e);
                }
                None
            }
        }
    }

    /// Store lyrics, replacing any existing content.
    pub async fn write(&self, path: &Path, lyrics: &str) -> Result<(), LyricsError> {
        tokio::fs::write(path, lyrics).await?;
        tracing::debug!("Cached lyrics in {}", path.display());
        Ok(())
    }
}

/// Replace characters that cannot appear in a filename.
pub fn escape_filename(name: &str) -> String {
    name.chars()
        .map(|c| if UNALLOWED_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Fresh, uniquely named directory under the system temp dir.
    pub(crate) fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("lyrics-tui-test-{:016x}", rand::random::<u64>()))
    }

    #[test]
    fn test_escape_filename() {
        assert_eq!(escape_filename("AC/DC - What?"), "AC_DC - What_");
        assert_eq!(escape_filename(r#"a"b*c:d<e>f\g|h"#), "a_b_c_d_e_f_g_h");
        assert_eq!(escape_filename("Plain - Name"), "Plain - Name");
    }

    #[test]
    fn test_path_for() {
        let cache = LyricsCache::new("/tmp/lyrics");
        let path = cache.path_for(&Track::new("Artist A", "Song B"));
        assert_eq!(path, PathBuf::from("/tmp/lyrics/Artist A - Song B.txt"));
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let cache = LyricsCache::new(temp_dir().join("nested"));
        cache.ensure_dir().await.unwrap();
        // A second call on an existing directory is fine.
        cache.ensure_dir().await.unwrap();

        let path = cache.path_for(&Track::new("A", "B"));
        assert!(cache.read(&path).await.is_none());

        cache.write(&path, "one\ntwo\n").await.unwrap();
        assert_eq!(cache.read(&path).await.unwrap(), vec!["one", "two"]);

        cache.write(&path, "three").await.unwrap();
        assert_eq!(cache.read(&path).await.unwrap(), vec!["three"]);

        let _ = std::fs::remove_dir_all(cache.dir());
    }
}
