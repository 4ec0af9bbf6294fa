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

//! src/core/types.rs
//!
//! Core type definitions for cross-tool keybinding analysis
//!
//! This module defines the fundamental types used throughout the application:
//! - `Modifier`: Keyboard modifier keys (CTRL, ALT, SHIFT, SUPER)
//! - `KeyCombo`: A combination of modifiers and a key
//! - `Tool`: The three tools whose keybindings are compared
//! - `Keybinding`: One binding discovered in one tool's configuration
//! - `Conflict`: An overlap between tools on one canonical key
//!
//! `KeyCombo`'s `Display` output is the canonical key string used to join
//! bindings across tools. It depends only on modifiers and key, never on
//! which tool the binding came from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keyboard modifier keys
///
/// The declaration order is the canonical sort order: control first, then
/// alt, shift and finally the OS modifier.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Modifier {
    /// Control key
    Ctrl,
    /// Alt/Option/Meta key (MOD1)
    Alt,
    /// Shift key
    Shift,
    /// Super/Windows/Command key (MOD4)
    Super,
}

impl Modifier {
    /// Maps a modifier name from any tool's vocabulary to a `Modifier`.
    ///
    /// Matching is case-insensitive. Returns `None` for names outside the
    /// known alias table.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "ctrl" | "control" => Some(Modifier::Ctrl),
            "alt" | "meta" | "opt" | "option" | "mod1" => Some(Modifier::Alt),
            "shift" => Some(Modifier::Shift),
            "super" | "cmd" | "command" | "win" | "mod4" | "logo" => Some(Modifier::Super),
            _ => None,
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::Ctrl => write!(f, "ctrl"),
            Modifier::Alt => write!(f, "alt"),
            Modifier::Shift => write!(f, "shift"),
            Modifier::Super => write!(f, "super"),
        }
    }
}

/// A combination of modifier keys and a base key
///
/// Known modifiers are kept sorted and deduplicated. Modifier names that are
/// not in the alias table are kept verbatim (lower-cased) in `extra`, in the
/// order they were first seen, and always render after the known ones.
///
/// # Example
/// ```
/// use keybind_check::core::{KeyCombo, Modifier};
///
/// let combo = KeyCombo::new(vec![Modifier::Shift, Modifier::Ctrl], "K");
/// assert_eq!(combo.to_string(), "ctrl+shift+k");
/// ```
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct KeyCombo {
    /// Recognised modifiers, sorted by canonical order
    pub modifiers: Vec<Modifier>,

    /// Unrecognised modifier names, lower-cased, first-seen order
    pub extra: Vec<String>,

    /// Base key name, always lower-cased
    pub key: String,
}

impl KeyCombo {
    /// Create a new KeyCombo with normalised data
    ///
    /// Normalisation includes:
    /// - Sorting modifiers into canonical order
    /// - Removing duplicate modifiers
    /// - Converting key to lowercase
    pub fn new(mut modifiers: Vec<Modifier>, key: &str) -> Self {
        modifiers.sort();
        modifiers.dedup();

        Self {
            modifiers,
            extra: Vec::new(),
            key: key.to_lowercase(),
        }
    }

    /// Builds a KeyCombo from free-form modifier names.
    ///
    /// Never fails: names outside the alias table are carried along in
    /// `extra` so that identical spellings still group together.
    pub fn from_names<S: AsRef<str>>(names: &[S], key: &str) -> Self {
        let mut modifiers = Vec::new();
        let mut extra: Vec<String> = Vec::new();

        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            match Modifier::from_name(name) {
                Some(modifier) => modifiers.push(modifier),
                None => {
                    let lowered = name.to_lowercase();
                    if !extra.contains(&lowered) {
                        extra.push(lowered);
                    }
                }
            }
        }

        let mut combo = Self::new(modifiers, key);
        combo.extra = extra;
        combo
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{}+", modifier)?;
        }
        for name in &self.extra {
            write!(f, "{}+", name)?;
        }
        write!(f, "{}", self.key)
    }
}

/// Result of parsing a key trigger in bracket notation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParsedKey {
    /// A single key press, possibly with modifiers
    Single(KeyCombo),
    /// Several key presses in order (`gd`, `<Space>f`); never conflicts
    Sequence(String),
}

/// The tools whose keybindings are compared
///
/// The declaration order is the order bindings are collected and listed in.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Terminal emulator; sees every key event first
    Wezterm,
    /// Modal text editor running inside the terminal
    Neovim,
    /// File manager running inside the terminal
    Yazi,
}

impl Tool {
    /// All tools in collection order
    pub const ALL: [Tool; 3] = [Tool::Wezterm, Tool::Neovim, Tool::Yazi];
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tool::Wezterm => write!(f, "WezTerm"),
            Tool::Neovim => write!(f, "Neovim"),
            Tool::Yazi => write!(f, "Yazi"),
        }
    }
}

/// Target platform for the terminal configuration
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    Darwin,
}

impl Platform {
    /// Platform of the running host. Anything that is not macOS counts as linux.
    pub fn host() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Darwin
        } else {
            Platform::Linux
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Linux => "linux",
            Platform::Darwin => "darwin",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux" => Ok(Platform::Linux),
            "darwin" => Ok(Platform::Darwin),
            other => Err(format!("Invalid platform: {} (expected linux or darwin)", other)),
        }
    }
}

/// One concrete keybinding discovered in one tool's configuration
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Keybinding {
    /// Canonical key string; the join key across tools
    pub canonical: String,

    /// Tool-native notation, kept for display only
    pub raw_key: String,

    /// Tool the binding belongs to
    pub tool: Tool,

    /// Mode, key table or keymap section the binding is active in
    pub context: String,

    /// Human-readable purpose, possibly empty
    pub description: String,

    /// Origin path, or `(nvim keymap)` for runtime-derived bindings
    pub source_file: String,

    /// WezTerm forwards this key to the program inside the terminal
    pub is_passthrough: bool,
}

impl fmt::Display for Keybinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} [{}]", self.tool, self.canonical, self.context)?;

        if !self.description.is_empty() {
            write!(f, " {}", self.description)?;
        }

        Ok(())
    }
}

/// How serious an overlap is
///
/// `Critical` sorts before `Info`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// The terminal captures the key before an inner program can see it
    Critical,
    /// Two inner programs share a key; ambiguity only
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "critical"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A detected overlap between two or more tools on one canonical key
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Conflict {
    /// The shared canonical key
    pub canonical: String,

    pub severity: Severity,

    /// Fixed classification string naming the colliding pair
    pub label: String,

    /// Every binding that took part (always 2 or more)
    pub bindings: Vec<Keybinding>,
}
