use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating the dotfiles root.
#[derive(Debug, Error)]
pub enum RootError {
    /// No ancestor of the start directory contains the marker file.
    #[error("Could not find dotfiles root ({marker} not found from {} upward)", .start.display())]
    MarkerNotFound { marker: &'static str, start: PathBuf },
    /// Root given on the command line is not a directory.
    #[error("Dotfiles root not found: {0}")]
    NotADirectory(PathBuf),
    /// Root given on the command line could not be tilde-expanded.
    #[error("Invalid root path: {0}")]
    InvalidPath(String),
}
