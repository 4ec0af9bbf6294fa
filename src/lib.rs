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


//! Cross-tool keybinding conflict checker
//!
//! Reads the keybindings of WezTerm, Neovim and Yazi from a dotfiles
//! repository, normalises every key notation to one canonical form and
//! reports keys claimed by more than one tool.
//!
//! # Features
//!
//! - **Three sources:** WezTerm Lua key tables, live Neovim keymaps, Yazi TOML keymap
//! - **Canonical keys:** `<C-S-w>` in Neovim and `mods = 'CTRL|SHIFT'` in WezTerm compare equal
//! - **Capture-order severity:** WezTerm sees keys first, so its intercepts are critical
//! - **Graceful degradation:** a missing config or Neovim binary only skips that tool
//! - **Two outputs:** coloured text for people, JSON for scripts
//!
//! # Architecture
//!
//! - **`core`:** Pure logic (types, key normalisation, conflict detection)
//! - **`sources`:** Per-tool binding extraction (file parsing, Neovim process)
//! - **`config`:** Dotfiles root discovery and config file locations
//! - **`report`:** Text and JSON rendering
//!
//! # Examples
//!
//! ## Normalising keys
//!
//! ```
//! use keybind_check::core::normalize;
//! use keybind_check::core::normalize::normalize_wezterm;
//! use keybind_check::Platform;
//!
//! assert_eq!(normalize(&["SHIFT", "ctrl"], "W"), "ctrl+shift+w");
//! assert_eq!(normalize_wezterm("w", "CTRL|SHIFT", Platform::Linux), "ctrl+shift+w");
//! ```
//!
//! ## Checking a dotfiles tree
//!
//! ```no_run
//! use keybind_check::config::{find_dotfiles_root, ConfigPaths};
//! use keybind_check::sources::{collect_all, NeovimSource, NvimCommand, WeztermSource, YaziSource};
//! use keybind_check::{Analysis, Platform};
//!
//! let root = find_dotfiles_root(&std::env::current_dir()?)?;
//! let paths = ConfigPaths::new(&root);
//! let platform = Platform::host();
//!
//! let wezterm = WeztermSource::new(paths.wezterm, platform);
//! let neovim = NeovimSource::new(NvimCommand::default());
//! let yazi = YaziSource::new(paths.yazi);
//!
//! let analysis = Analysis::new(platform, collect_all(&[&wezterm, &neovim, &yazi]));
//! println!("{} critical conflicts", analysis.critical_count());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod core;
pub mod report;
pub mod sources;

// Re-export commonly used types for convenience
pub use core::{Conflict, KeyCombo, Keybinding, Modifier, Platform, Severity, Tool};
pub use report::Analysis;
