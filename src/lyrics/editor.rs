//! Opening cached lyrics in an external editor.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use super::LyricsError;

/// What an edit request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    /// The lyrics screen is not active.
    Inactive,
    /// No editor is configured.
    NoEditor,
    /// No lyrics have been requested yet, so there is no file to edit.
    NoFile,
    Launch(EditorCommand),
}

/// Decide how to handle an edit key press.
pub fn prepare(editor: &str, console: bool, file: Option<&Path>, active: bool) -> EditRequest {
    if !active {
        return EditRequest::Inactive;
    }
    let editor = editor.trim();
    if editor.is_empty() {
        return EditRequest::NoEditor;
    }
    match file {
        Some(path) => EditRequest::Launch(EditorCommand {
            editor: editor.to_string(),
            path: path.to_path_buf(),
            console,
        }),
        None => EditRequest::NoFile,
    }
}

/// An editor invocation against a lyrics file.
///
/// The editor string goes through `sh -c` so it may carry arguments; the
/// file path is passed as `$1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorCommand {
    pub editor: String,
    pub path: PathBuf,
    /// Console editors take over the terminal and block until they exit.
    pub console: bool,
}

impl EditorCommand {
    fn script(&self) -> String {
        format!("{} \"$1\"", self.editor)
    }

    /// Run a console editor in the foreground and wait for it.
    ///
    /// The caller is responsible for handing the terminal over first.
    pub fn run_console(&self) -> Result<ExitStatus, LyricsError> {
        tracing::info!("Running console editor on {}", self.path.display());
        Command::new("sh")
            .arg("-c")
            .arg(self.script())
            .arg("sh")
            .arg(&self.path)
            .status()
            .map_err(LyricsError::Editor)
    }

    /// Start a graphical editor without waiting for it.
    ///
    /// The editor gets its own process group, so terminal signals aimed at
    /// the TUI do not reach it.
    pub fn spawn_detached(&self) -> Result<(), LyricsError> {
        tracing::info!("Spawning editor on {}", self.path.display());
        let mut command = tokio::process::Command::new("sh");
        command
            .arg("-c")
            .arg(self.script())
            .arg("sh")
            .arg(&self.path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        #[cfg(unix)]
        command.process_group(0);

        let mut child = command.spawn().map_err(LyricsError::Editor)?;

        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => tracing::debug!("Editor exited with {}", status),
                Err(e) => tracing::warn!("Failed to wait for editor: {}", e),
            }
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::cache::tests::temp_dir;

    #[test]
    fn test_prepare() {
        let file = Path::new("/tmp/A - B.txt");
        assert_eq!(prepare("vim", true, Some(file), false), EditRequest::Inactive);
        assert_eq!(prepare("  ", true, Some(file), true), EditRequest::NoEditor);
        assert_eq!(prepare("vim", true, None, true), EditRequest::NoFile);
        assert_eq!(
            prepare("gvim -f", false, Some(file), true),
            EditRequest::Launch(EditorCommand {
                editor: "gvim -f".to_string(),
                path: file.to_path_buf(),
                console: false,
            })
        );
    }

    #[test]
    fn test_console_editor_receives_path() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Artist \"A\" - $(Song).txt");
        std::fs::write(&path, "x").unwrap();

        let command = EditorCommand {
            editor: "test -f".to_string(),
            path: path.clone(),
            console: true,
        };
        assert!(command.run_console().unwrap().success());

        let missing = EditorCommand {
            path: dir.join("missing.txt"),
            ..command
        };
        assert!(!missing.run_console().unwrap().success());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[tokio::test]
    async fn test_detached_editor_does_not_block() {
        let command = EditorCommand {
            editor: "sleep 5; true".to_string(),
            path: PathBuf::from("/dev/null"),
            console: false,
        };
        let started = std::time::Instant::now();
        command.spawn_detached().unwrap();
        assert!(started.elapsed() < std::time::Duration::from_secs(5));
    }

    #[cfg(target_os = "linux")]
    fn process_group_of(stat: &str) -> String {
        // Fields after the command name: state, ppid, pgrp.
        let rest = &stat[stat.rfind(')').unwrap() + 2..];
        rest.split(' ').nth(2).unwrap().to_string()
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn test_detached_editor_has_own_process_group() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pgrp");

        let command = EditorCommand {
            editor: "cat /proc/self/stat >".to_string(),
            path: path.clone(),
            console: false,
        };
        command.spawn_detached().unwrap();

        let mut child_stat = String::new();
        for _ in 0..500 {
            child_stat = std::fs::read_to_string(&path).unwrap_or_default();
            if child_stat.contains(')') {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }

        let own_stat = std::fs::read_to_string("/proc/self/stat").unwrap();
        assert_ne!(process_group_of(&child_stat), process_group_of(&own_stat));

        let _ = std::fs::remove_dir_all(dir);
    }
}
