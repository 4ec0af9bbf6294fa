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

//! src/sources/wezterm.rs
//!
//! WezTerm keybinding source
//!
//! Reads `.config/wezterm/keybinds.lua` and extracts every entry of the form
//!
//! ```lua
//! -- Close the current pane
//! { key = 'w', mods = 'PRIMARY', action = act.CloseCurrentPane { confirm = true } },
//! ```
//!
//! from each named key table. The description is taken from the nearest
//! comment above the entry. Entries whose action forwards the key to the
//! program inside the terminal (`act.SendKey`, `act.SendString`) are marked
//! as passthrough.

use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use tracing::{debug, warn};

use crate::core::normalize::wezterm_combo;
use crate::core::{Keybinding, Platform, Tool};
use crate::sources::lua::{code_braces, extract_lua_tables, find_matching_brace, parse_field, split_top_level, LuaValue};
use crate::sources::{read_config, KeybindingSource, SourceError};

/// Action prefixes that forward the key instead of handling it
pub const PASSTHROUGH_PREFIXES: [&str; 2] = ["act.SendKey", "act.SendString"];

/// Comment annotations for linters and formatters, never descriptions
#[allow(clippy::expect_used)]
static PRAGMA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(selene:|@diagnostic|luacheck:|stylua:)")
        .expect("pragma comment pattern should be valid regex")
});

/// Key tables that only apply to another operating system
fn foreign_tables(platform: Platform) -> &'static [&'static str] {
    match platform {
        Platform::Linux => &["darwin_specific_keys"],
        Platform::Darwin => &["windows_specific_keys"],
    }
}

/// WezTerm entry fields before normalisation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeztermEntry {
    pub key: String,
    pub mods: String,
    pub action: String,
    /// Byte offset of the entry's `{` within its table body
    pub offset: usize,
}

impl WeztermEntry {
    /// True when the action forwards the key to the inner program
    pub fn is_passthrough(&self) -> bool {
        PASSTHROUGH_PREFIXES
            .iter()
            .any(|prefix| self.action.starts_with(prefix))
    }
}

/// Reads WezTerm bindings from a `keybinds.lua` file
#[derive(Clone, Debug)]
pub struct WeztermSource {
    path: PathBuf,
    platform: Platform,
}

impl WeztermSource {
    pub fn new(path: PathBuf, platform: Platform) -> Self {
        Self { path, platform }
    }
}

impl KeybindingSource for WeztermSource {
    fn tool(&self) -> Tool {
        Tool::Wezterm
    }

    fn load(&self) -> Result<Vec<Keybinding>, SourceError> {
        let source = read_config(&self.path)?;
        Ok(parse_wezterm(
            &source,
            self.platform,
            &self.path.display().to_string(),
        ))
    }
}

/// Parses every applicable key table in a WezTerm Lua config.
pub fn parse_wezterm(source: &str, platform: Platform, source_file: &str) -> Vec<Keybinding> {
    let skipped = foreign_tables(platform);
    let mut bindings = Vec::new();

    for table in extract_lua_tables(source) {
        if skipped.contains(&table.name.as_str()) {
            debug!(table = %table.name, %platform, "skipping table for other platform");
            continue;
        }
        if !table.terminated {
            warn!("Table '{}' in {} is not closed, reading to end of file", table.name, source_file);
        }

        for entry in parse_entries(table.body) {
            let description = description_before(&table.body[..entry.offset]);
            let combo = wezterm_combo(&entry.key, &entry.mods, platform);

            bindings.push(Keybinding {
                canonical: combo.to_string(),
                raw_key: format!("key='{}', mods='{}'", entry.key, entry.mods),
                tool: Tool::Wezterm,
                context: table.name.clone(),
                description,
                source_file: source_file.to_string(),
                is_passthrough: entry.is_passthrough(),
            });
        }
    }

    bindings
}

/// Finds every `{ key = ..., mods = ..., action = ... }` entry in a table body.
///
/// Any brace group whose top-level fields include a string `key` and an
/// `action` counts as an entry; `mods` defaults to empty when absent. Brace
/// groups nested inside a recognised entry (the `{ ... }` argument of
/// `act.SendKey { ... }`, say) are not entries themselves, even when the
/// outer entry is skipped.
pub fn parse_entries(body: &str) -> Vec<WeztermEntry> {
    let mut entries = Vec::new();
    let mut covered_to = 0;

    // The first brace is the table itself
    for open in code_braces(body).into_iter().skip(1) {
        if open < covered_to {
            continue;
        }
        let Some(close) = find_matching_brace(body, open) else {
            continue;
        };

        match parse_entry(&body[open + 1..close], open) {
            Group::Entry(entry) => {
                entries.push(entry);
                covered_to = close;
            }
            Group::Skipped => covered_to = close,
            Group::Other => {}
        }
    }

    entries
}

/// What a brace group inside a key table turned out to be
enum Group {
    Entry(WeztermEntry),
    /// A key entry that cannot be read statically
    Skipped,
    Other,
}

/// Reads the fields of one brace group.
///
/// A `mods` field that is not a string literal (`mods = mod.PRIMARY`) cannot
/// be resolved without evaluating Lua, so the entry is skipped rather than
/// read as having no modifiers.
fn parse_entry(inner: &str, offset: usize) -> Group {
    let mut key = None;
    let mut mods = None;
    let mut action = None;
    let mut computed_mods = None;

    for field in split_top_level(inner, b',') {
        let Ok((_, (name, value))) = parse_field(field) else {
            continue;
        };
        match (name, value) {
            ("key", LuaValue::Str(k)) => key = Some(k),
            ("mods", LuaValue::Str(m)) => mods = Some(m),
            ("mods", LuaValue::Expr(expr)) => computed_mods = Some(expr),
            ("action", value) => action = Some(value.text().to_string()),
            _ => {}
        }
    }

    let (Some(key), Some(action)) = (key.filter(|k| !k.is_empty()), action) else {
        return Group::Other;
    };

    if let Some(expr) = computed_mods {
        debug!(key = %key, mods = %expr, "skipping entry with non-literal mods");
        return Group::Skipped;
    }

    Group::Entry(WeztermEntry {
        key,
        mods: mods.unwrap_or_default(),
        action,
        offset,
    })
}

/// Recovers an entry's description from the text preceding it.
///
/// Walks backwards over blank lines, lone separators and empty comments to
/// the nearest comment line, skipping linter pragmas. Any other line means
/// the entry has no description.
pub fn description_before(preceding: &str) -> String {
    for line in preceding.lines().rev() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "," {
            continue;
        }

        let Some(comment) = trimmed.strip_prefix("--") else {
            break;
        };
        let text = comment.trim_start_matches('-').trim();
        if text.is_empty() || PRAGMA_RE.is_match(text) {
            continue;
        }
        return text.to_string();
    }

    String::new()
}
