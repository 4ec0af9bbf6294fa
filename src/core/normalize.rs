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

//! src/core/normalize.rs
//!
//! Key notation normalisation
//!
//! Every tool spells key combinations differently:
//! - WezTerm: `key = 'w', mods = 'CTRL|SHIFT'`, with `PRIMARY`/`SECONDARY`
//!   placeholders and implied shift on uppercase letters
//! - Neovim and Yazi: bracket notation such as `<C-S-w>`, `<A-Enter>`, `<CR>`
//!
//! This module converts all of them to one canonical string of the form
//! `ctrl+alt+shift+super+key` (modifiers in that order, lower-cased), so that
//! the same physical key press groups together regardless of source.

use regex::Regex;
use std::sync::LazyLock;

use crate::core::types::{KeyCombo, ParsedKey, Platform};

/// Matches a whole `<...>` token with no nested `>`
#[allow(clippy::expect_used)]
static BRACKET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^<([^>]+)>$").expect("bracket notation pattern should be valid regex")
});

/// Normalises a modifier set and key name to the canonical string.
///
/// Modifiers are lower-cased, deduplicated and ordered ctrl, alt, shift,
/// super. Unrecognised modifiers come after all known ones, in the order
/// they were given; that relative order carries no meaning. The function is
/// total: unknown names pass through after case-folding.
///
/// # Example
/// ```
/// use keybind_check::core::normalize::normalize;
///
/// assert_eq!(normalize(&["Shift", "ctrl"], "W"), "ctrl+shift+w");
/// assert_eq!(normalize::<&str>(&[], "Enter"), "enter");
/// ```
pub fn normalize<S: AsRef<str>>(modifiers: &[S], key: &str) -> String {
    KeyCombo::from_names(modifiers, key).to_string()
}

// -- WezTerm ---------------------------------------------------------------

/// Verbose WezTerm key names and their canonical identities
const WEZTERM_KEY_ALIASES: &[(&str, &str)] = &[
    ("leftarrow", "left"),
    ("rightarrow", "right"),
    ("uparrow", "up"),
    ("downarrow", "down"),
    ("enter", "enter"),
    ("escape", "escape"),
    ("backspace", "backspace"),
    ("tab", "tab"),
];

/// Resolves WezTerm's logical `PRIMARY`/`SECONDARY` modifiers.
///
/// Both platforms currently resolve to CTRL/ALT. This mirrors the keybinds.lua
/// helpers as they stand today and may be an unfinished platform split; it is
/// kept as-is so reports match what WezTerm actually does with that config.
pub fn resolve_placeholder(modifier: &str, platform: Platform) -> &str {
    match (platform, modifier) {
        (Platform::Darwin, "PRIMARY") => "CTRL",
        (Platform::Darwin, "SECONDARY") => "ALT",
        (Platform::Linux, "PRIMARY") => "CTRL",
        (Platform::Linux, "SECONDARY") => "ALT",
        (_, other) => other,
    }
}

/// Human-readable summary of the placeholder resolution for a platform
pub fn placeholder_summary(platform: Platform) -> String {
    format!(
        "PRIMARY={}, SECONDARY={}",
        resolve_placeholder("PRIMARY", platform),
        resolve_placeholder("SECONDARY", platform)
    )
}

/// Builds the KeyCombo for a WezTerm `{ key = ..., mods = ... }` entry.
///
/// - `mods` is split on `|`; empty parts and `NONE` are ignored
/// - A single uppercase letter implies SHIFT when it is not already present
/// - Verbose key names are shortened through [`WEZTERM_KEY_ALIASES`]
pub fn wezterm_combo(raw_key: &str, raw_mods: &str, platform: Platform) -> KeyCombo {
    let mut mods: Vec<String> = raw_mods
        .split('|')
        .map(str::trim)
        .filter(|m| !m.is_empty() && *m != "NONE")
        .map(|m| resolve_placeholder(m, platform).to_lowercase())
        .collect();

    let mut chars = raw_key.chars();
    let implies_shift = match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_uppercase(),
        _ => false,
    };

    if implies_shift && !mods.iter().any(|m| m == "shift") {
        mods.push("shift".to_string());
    }

    let lowered = raw_key.to_lowercase();
    let key = WEZTERM_KEY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(raw_key);

    KeyCombo::from_names(&mods, key)
}

/// Canonical string for a WezTerm entry. See [`wezterm_combo`].
pub fn normalize_wezterm(raw_key: &str, raw_mods: &str, platform: Platform) -> String {
    wezterm_combo(raw_key, raw_mods, platform).to_string()
}

// -- Bracket notation (Neovim, Yazi) ----------------------------------------

/// Modifier letters used inside `<...>` tokens
fn bracket_modifier(letter: &str) -> Option<&'static str> {
    match letter.to_uppercase().as_str() {
        "C" => Some("ctrl"),
        "M" | "A" => Some("alt"),
        "S" => Some("shift"),
        "D" => Some("super"),
        _ => None,
    }
}

/// Key names used inside `<...>` tokens and their canonical identities
fn bracket_key(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mapped = match lowered.as_str() {
        "cr" | "return" | "enter" => "enter",
        "esc" => "escape",
        "bs" => "backspace",
        "tab" => "tab",
        "space" => "space",
        "lt" => "<",
        "bar" => "|",
        "bslash" => "\\",
        "up" | "down" | "left" | "right" => lowered.as_str(),
        "f1" | "f2" | "f3" | "f4" | "f5" | "f6" | "f7" | "f8" | "f9" | "f10" | "f11" | "f12" => {
            lowered.as_str()
        }
        _ => return name.to_string(),
    };
    mapped.to_string()
}

/// Parses a key trigger written in Vim-style bracket notation.
///
/// - `<C-S-x>`, `<A-Enter>`, `<CR>`: a single key press with modifiers
/// - `x`: a single printable character with no modifiers
/// - anything else (`gd`, `<C-w><C-d>`, `<Space>f`): a multi-key sequence
///
/// Modifier letters outside the table are dropped, so `<T-a>` reads as `a`.
///
/// # Example
/// ```
/// use keybind_check::core::normalize::parse_bracket_key;
/// use keybind_check::core::ParsedKey;
///
/// match parse_bracket_key("<C-a>") {
///     ParsedKey::Single(combo) => assert_eq!(combo.to_string(), "ctrl+a"),
///     ParsedKey::Sequence(_) => unreachable!(),
/// }
/// assert!(matches!(parse_bracket_key("gd"), ParsedKey::Sequence(_)));
/// ```
pub fn parse_bracket_key(lhs: &str) -> ParsedKey {
    let inner = BRACKET_RE
        .captures(lhs)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());

    if let Some(inner) = inner {
        let (mod_part, key_part) = split_bracket_inner(inner);

        let mods: Vec<&str> = mod_part
            .map(|part| part.split('-').filter_map(bracket_modifier).collect())
            .unwrap_or_default();

        return ParsedKey::Single(KeyCombo::from_names(&mods, &bracket_key(key_part)));
    }

    let mut chars = lhs.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let key = if c == ' ' { "space".to_string() } else { c.to_string() };
        return ParsedKey::Single(KeyCombo::new(Vec::new(), &key));
    }

    ParsedKey::Sequence(lhs.to_string())
}

/// Splits `C-S-x` into (`Some("C-S")`, `x`).
///
/// A trailing `--` means the key itself is `-` (`<C-->`).
fn split_bracket_inner(inner: &str) -> (Option<&str>, &str) {
    if inner.len() > 2 && inner.ends_with("--") {
        return (Some(&inner[..inner.len() - 2]), "-");
    }
    match inner.rsplit_once('-') {
        Some((mods, key)) if !mods.is_empty() && !key.is_empty() => (Some(mods), key),
        _ => (None, inner),
    }
}
