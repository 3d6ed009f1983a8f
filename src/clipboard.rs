/*!
 * Clipboard support for MergeFS
 *
 * Copies the combined document through whichever clipboard command the
 * system provides.
 */

use std::env;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Error type for clipboard operations
#[derive(Error, Debug)]
pub enum ClipboardError {
    /// Failed to execute the command
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// No suitable clipboard mechanism was found
    #[error("No suitable clipboard mechanism found")]
    NoClipboardFound,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for clipboard operations
pub type Result<T> = std::result::Result<T, ClipboardError>;

/// Anything that can receive copied text
pub trait Clipboard {
    /// Copy text to the clipboard
    fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

/// A clipboard reached by piping text into an external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandClipboard {
    program: &'static str,
    args: &'static [&'static str],
}

impl CommandClipboard {
    /// Program this clipboard runs
    pub fn program(&self) -> &'static str {
        self.program
    }
}

impl Clipboard for CommandClipboard {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        debug!(program = self.program, bytes = text.len(), "Copying to clipboard");

        let mut child = Command::new(self.program)
            .args(self.args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| ClipboardError::CommandFailed(format!("{}: {}", self.program, e)))?;

        {
            let stdin = child.stdin.as_mut().ok_or_else(|| {
                ClipboardError::CommandFailed(format!("Failed to open stdin for {}", self.program))
            })?;
            stdin.write_all(text.as_bytes())?;
        }

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(ClipboardError::CommandFailed(format!(
                "{} exited with status: {}",
                self.program, status
            )))
        }
    }
}

const TMUX: CommandClipboard = CommandClipboard {
    program: "tmux",
    args: &["load-buffer", "-w", "-"],
};
const PBCOPY: CommandClipboard = CommandClipboard {
    program: "pbcopy",
    args: &[],
};
const CLIP_EXE: CommandClipboard = CommandClipboard {
    program: "clip.exe",
    args: &[],
};
const WL_COPY: CommandClipboard = CommandClipboard {
    program: "wl-copy",
    args: &[],
};
const XSEL: CommandClipboard = CommandClipboard {
    program: "xsel",
    args: &["-b", "-i"],
};
const XCLIP: CommandClipboard = CommandClipboard {
    program: "xclip",
    args: &["-selection", "clipboard", "-in"],
};
const TERMUX: CommandClipboard = CommandClipboard {
    program: "termux-clipboard-set",
    args: &[],
};

/// Clipboards worth trying on this platform, most preferred first
fn candidates() -> Vec<CommandClipboard> {
    let mut list = Vec::new();

    if env::var("TMUX").is_ok() {
        list.push(TMUX);
    }

    if cfg!(target_os = "macos") {
        list.push(PBCOPY);
    } else if cfg!(target_os = "windows") || env::var("WSL_DISTRO_NAME").is_ok() {
        list.push(CLIP_EXE);
    } else if cfg!(target_os = "android") {
        list.push(TERMUX);
    } else {
        list.extend([WL_COPY, XSEL, XCLIP]);
    }

    list
}

/// Check if a command is on the PATH
pub fn command_exists(command: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| Path::new(&dir).join(command).is_file()))
        .unwrap_or(false)
}

/// First available clipboard for this system
pub fn detect() -> Result<CommandClipboard> {
    candidates()
        .into_iter()
        .find(|c| command_exists(c.program))
        .ok_or(ClipboardError::NoClipboardFound)
}

/// Copy text with the detected system clipboard
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    detect()?.copy_to_clipboard(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_exists() {
        assert!(command_exists("sh"));
        assert!(!command_exists("nonexistentcommandxyz"));
    }

    #[test]
    fn test_candidates_not_empty() {
        assert!(!candidates().is_empty());
    }

    #[test]
    fn test_failing_command() {
        let clipboard = CommandClipboard {
            program: "false",
            args: &[],
        };
        // Either the write hits a closed pipe or the exit status is non-zero
        assert!(clipboard.copy_to_clipboard("text").is_err());
    }

    #[test]
    fn test_missing_command() {
        let clipboard = CommandClipboard {
            program: "nonexistentcommandxyz",
            args: &[],
        };
        assert!(clipboard.copy_to_clipboard("text").is_err());
    }

    #[test]
    #[ignore] // Needs a running tmux session
    fn test_tmux_clipboard() {
        if env::var("TMUX").is_err() {
            return;
        }
        TMUX.copy_to_clipboard("mergefs clipboard test").unwrap();
        let output = Command::new("tmux").args(["show-buffer"]).output().unwrap();
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            "mergefs clipboard test"
        );
    }
}
