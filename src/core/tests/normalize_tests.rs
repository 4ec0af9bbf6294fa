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

//! Normaliser tests
//!
//! Covers the canonical key format, the WezTerm adapter (placeholders,
//! implied shift, aliases) and bracket notation used by Neovim and Yazi.

use proptest::prelude::*;

use crate::core::normalize::{normalize, normalize_wezterm, parse_bracket_key};
use crate::core::{ParsedKey, Platform};

fn single(lhs: &str) -> String {
    match parse_bracket_key(lhs) {
        ParsedKey::Single(combo) => combo.to_string(),
        ParsedKey::Sequence(seq) => panic!("expected single key, got sequence {seq}"),
    }
}

#[test]
fn test_modifier_order_is_canonical() {
    assert_eq!(normalize(&["alt", "ctrl"], "a"), normalize(&["ctrl", "alt"], "a"));
    assert_eq!(normalize(&["alt", "ctrl"], "a"), "ctrl+alt+a");
}

#[test]
fn test_case_insensitive() {
    assert_eq!(normalize(&["Ctrl"], "A"), normalize(&["ctrl"], "a"));
}

#[test]
fn test_duplicate_modifiers_collapse() {
    assert_eq!(normalize(&["ctrl", "CTRL", "control"], "x"), "ctrl+x");
}

#[test]
fn test_unknown_modifiers_sort_last() {
    assert_eq!(normalize(&["hyper", "shift", "ctrl"], "k"), "ctrl+shift+hyper+k");
    assert_eq!(normalize(&["Hyper", "hyper"], "k"), "hyper+k");
}

#[test]
fn test_unknown_key_passes_through() {
    assert_eq!(normalize(&["ctrl"], "PageUp"), "ctrl+pageup");
}

#[test]
fn test_terminal_and_editor_agree() {
    assert_eq!(normalize_wezterm("a", "CTRL", Platform::Linux), "ctrl+a");
    assert_eq!(single("<C-a>"), "ctrl+a");
}

#[test]
fn test_uppercase_letter_implies_shift() {
    assert_eq!(
        normalize_wezterm("A", "NONE", Platform::Linux),
        normalize(&["shift"], "a")
    );
    assert_eq!(normalize_wezterm("A", "SHIFT|CTRL", Platform::Linux), "ctrl+shift+a");
}

#[test]
fn test_non_letters_do_not_imply_shift() {
    assert_eq!(normalize_wezterm("1", "CTRL", Platform::Linux), "ctrl+1");
    assert_eq!(normalize_wezterm("|", "CTRL", Platform::Linux), "ctrl+|");
}

#[test]
fn test_placeholders_resolve_identically_on_both_platforms() {
    for platform in [Platform::Linux, Platform::Darwin] {
        assert_eq!(normalize_wezterm("t", "PRIMARY", platform), "ctrl+t");
        assert_eq!(normalize_wezterm("t", "SECONDARY", platform), "alt+t");
        assert_eq!(normalize_wezterm("t", "PRIMARY|SHIFT", platform), "ctrl+shift+t");
    }
}

#[test]
fn test_wezterm_key_aliases() {
    assert_eq!(normalize_wezterm("LeftArrow", "PRIMARY", Platform::Linux), "ctrl+left");
    assert_eq!(normalize_wezterm("DownArrow", "ALT", Platform::Linux), "alt+down");
    assert_eq!(normalize_wezterm("Enter", "ALT", Platform::Linux), "alt+enter");
    assert_eq!(normalize_wezterm("Escape", "", Platform::Linux), "escape");
}

#[test]
fn test_wezterm_mods_whitespace() {
    assert_eq!(normalize_wezterm("k", " CTRL | SHIFT ", Platform::Linux), "ctrl+shift+k");
}

#[test]
fn test_bracket_modifier_letters() {
    assert_eq!(single("<C-S-x>"), "ctrl+shift+x");
    assert_eq!(single("<M-l>"), "alt+l");
    assert_eq!(single("<A-l>"), "alt+l");
    assert_eq!(single("<D-s>"), "super+s");
    assert_eq!(single("<c-w>"), "ctrl+w");
}

#[test]
fn test_unmapped_bracket_modifiers_are_dropped() {
    assert_eq!(single("<T-a>"), "a");
    assert_eq!(single("<C-T-a>"), "ctrl+a");
    assert_eq!(single("<T-a>"), single("a"));
}

#[test]
fn test_bracket_key_aliases() {
    assert_eq!(single("<CR>"), "enter");
    assert_eq!(single("<Return>"), "enter");
    assert_eq!(single("<A-Enter>"), "alt+enter");
    assert_eq!(single("<Esc>"), "escape");
    assert_eq!(single("<BS>"), "backspace");
    assert_eq!(single("<lt>"), "<");
    assert_eq!(single("<Bar>"), "|");
    assert_eq!(single("<Bslash>"), "\\");
    assert_eq!(single("<C-Space>"), "ctrl+space");
    assert_eq!(single("<F12>"), "f12");
    assert_eq!(single("<S-Up>"), "shift+up");
}

#[test]
fn test_bracket_minus_key() {
    assert_eq!(single("<C-->"), "ctrl+-");
}

#[test]
fn test_single_char_has_no_modifiers() {
    assert_eq!(single("q"), "q");
    assert_eq!(single("~"), "~");
    assert_eq!(single(" "), "space");
}

#[test]
fn test_sequences_are_classified() {
    for lhs in ["gd", "gg", "]]", "<Space>f", "<C-w><C-d>", "<leader>ff"] {
        assert_eq!(parse_bracket_key(lhs), ParsedKey::Sequence(lhs.to_string()), "{lhs}");
    }
}

fn modifier_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["ctrl", "Ctrl", "ALT", "alt", "shift", "Shift", "super", "SUPER", "hyper"])
        .prop_map(str::to_string)
}

proptest! {
    #[test]
    fn prop_reordering_modifiers_is_irrelevant(
        mods in prop::collection::vec(modifier_name(), 0..4),
        key in "[a-zA-Z0-9]{1,6}",
    ) {
        let mut reversed = mods.clone();
        reversed.reverse();
        prop_assert_eq!(normalize(&mods, &key), normalize(&reversed, &key));
    }

    #[test]
    fn prop_case_is_irrelevant(
        mods in prop::collection::vec(modifier_name(), 0..4),
        key in "[a-zA-Z0-9]{1,6}",
    ) {
        let upper: Vec<String> = mods.iter().map(|m| m.to_uppercase()).collect();
        prop_assert_eq!(normalize(&mods, &key), normalize(&upper, &key.to_uppercase()));
    }

    #[test]
    fn prop_output_is_lowercase(
        mods in prop::collection::vec(modifier_name(), 0..4),
        key in "[a-zA-Z]{1,6}",
    ) {
        let canonical = normalize(&mods, &key);
        prop_assert_eq!(canonical.clone(), canonical.to_lowercase());
        let expected_suffix = format!("+{}", key.to_lowercase());
        prop_assert!(canonical.ends_with(&expected_suffix) || canonical == key.to_lowercase());
    }
}
