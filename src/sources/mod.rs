// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/sources/mod.rs
//!
//! Keybinding sources
//!
//! One source per tool, each turning that tool's configuration into a flat
//! list of `Keybinding`s:
//! - `wezterm`: scans the Lua key tables in `keybinds.lua`
//! - `neovim`: asks a headless Neovim for its active keymaps
//! - `yazi`: reads `prepend_keymap` entries from `keymap.toml`
//!
//! A missing config file or an unavailable Neovim never fails the run. The
//! source logs a warning and contributes no bindings, so partial tool
//! coverage still produces a report.

pub mod error;
pub mod lua;
pub mod neovim;
pub mod wezterm;
pub mod yazi;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::core::{Keybinding, Tool};

pub use error::SourceError;
pub use neovim::{KeymapEntry, KeymapQuery, NeovimSource, NvimCommand};
pub use wezterm::WeztermSource;
pub use yazi::YaziSource;

/// Something that produces the keybindings of one tool
pub trait KeybindingSource {
    /// Tool the bindings belong to
    fn tool(&self) -> Tool;

    /// Loads bindings, reporting why the source is unavailable on failure
    fn load(&self) -> Result<Vec<Keybinding>, SourceError>;

    /// Loads bindings, degrading to an empty list with a warning on failure
    fn collect(&self) -> Vec<Keybinding> {
        match self.load() {
            Ok(bindings) => {
                debug!(tool = %self.tool(), count = bindings.len(), "collected keybindings");
                bindings
            }
            Err(e) => {
                warn!("{}, skipping {}.", e, self.tool());
                Vec::new()
            }
        }
    }
}

/// Collects bindings from every source in order into one list
pub fn collect_all(sources: &[&dyn KeybindingSource]) -> Vec<Keybinding> {
    sources.iter().flat_map(|source| source.collect()).collect()
}

/// Reads a config file, mapping a missing file to `SourceError::NotFound`
pub(crate) fn read_config(path: &Path) -> Result<String, SourceError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::Read {
            path: path.to_path_buf(),
            source: e,
        },
    })
}

#[cfg(test)]
mod tests;
