//! Source module tests
//!
//! Contains test suites for each keybinding source:
//! - Lua scanner tests (brace matching, strings, comments)
//! - WezTerm entry, description and platform tests
//! - Neovim dump decoding with stub queries
//! - Yazi keymap parsing
//!
//! None of these start a real Neovim.

#[cfg(test)]
mod wezterm_tests;
