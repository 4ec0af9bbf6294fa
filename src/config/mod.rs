//! Dotfiles root discovery and per-tool configuration paths.
//!
//! Every tool's configuration lives at a fixed path below the root of a
//! dotfiles repository. The root is either given explicitly (tilde
//! expansion supported) or found by walking up from the working directory
//! to the first directory that contains `flake.nix`.
//!
//! # Example
//!
//! ```no_run
//! use keybind_check::config::{resolve_root, ConfigPaths};
//!
//! let root = resolve_root(Some("~/dotfiles"), &std::env::current_dir()?)?;
//! let paths = ConfigPaths::new(&root);
//! println!("WezTerm keybinds: {}", paths.wezterm.display());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;

use std::path::{Path, PathBuf};
use tracing::debug;

pub use error::RootError;

/// File whose presence marks the dotfiles root
pub const ROOT_MARKER: &str = "flake.nix";

/// WezTerm keybindings, relative to the root
pub const WEZTERM_KEYBINDS: &str = ".config/wezterm/keybinds.lua";

/// Yazi keymap, relative to the root
pub const YAZI_KEYMAP: &str = ".config/yazi/keymap.toml";

/// Locations of each tool's configuration file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigPaths {
    pub root: PathBuf,
    pub wezterm: PathBuf,
    pub yazi: PathBuf,
}

impl ConfigPaths {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            wezterm: root.join(WEZTERM_KEYBINDS),
            yazi: root.join(YAZI_KEYMAP),
        }
    }
}

/// Walks up from `start` to the first directory containing [`ROOT_MARKER`].
///
/// # Errors
///
/// Returns `RootError::MarkerNotFound` if no ancestor contains the marker.
pub fn find_dotfiles_root(start: &Path) -> Result<PathBuf, RootError> {
    for dir in start.ancestors() {
        if dir.join(ROOT_MARKER).is_file() {
            debug!(root = %dir.display(), "found dotfiles root");
            return Ok(dir.to_path_buf());
        }
    }

    Err(RootError::MarkerNotFound {
        marker: ROOT_MARKER,
        start: start.to_path_buf(),
    })
}

/// Resolves the dotfiles root.
///
/// An explicit root is tilde-expanded and must be an existing directory; it
/// does not need to contain the marker. Without one, the root is discovered
/// from `cwd` with [`find_dotfiles_root`].
pub fn resolve_root(explicit: Option<&str>, cwd: &Path) -> Result<PathBuf, RootError> {
    let Some(raw) = explicit else {
        return find_dotfiles_root(cwd);
    };

    let expanded = shellexpand::tilde(raw);
    if expanded.is_empty() {
        return Err(RootError::InvalidPath(raw.to_string()));
    }

    let path = cwd.join(expanded.as_ref());
    if !path.is_dir() {
        return Err(RootError::NotADirectory(path));
    }

    Ok(path)
}
