use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that stop a single keybinding source from producing bindings.
///
/// None of these abort an analysis run: `KeybindingSource::collect` logs them
/// and contributes an empty list for that tool.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Configuration file does not exist.
    #[error("{0} not found")]
    NotFound(PathBuf),
    /// Configuration file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Yazi keymap is not valid TOML.
    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),
    /// Neovim binary could not be started.
    #[error("Could not run {binary}: {reason}")]
    EditorUnavailable { binary: String, reason: String },
    /// Neovim did not exit before the deadline.
    #[error("Neovim did not finish within {0:?}")]
    EditorTimeout(Duration),
    /// Neovim ran but printed no keymap dump.
    #[error("Could not get keymaps from Neovim")]
    NoKeymapOutput,
    /// Keymap dump is not a JSON array.
    #[error("Invalid keymap dump: {0}")]
    Json(#[from] serde_json::Error),
    /// Generic I/O error while talking to a child process.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
