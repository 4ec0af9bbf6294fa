use std::io::Write;

use crate::core::{Platform, Tool};
use crate::sources::wezterm::*;
use crate::sources::{KeybindingSource, WeztermSource};

const KEYBINDS_LUA: &str = r#"
local wezterm = require 'wezterm'
local act = wezterm.action

local M = {}

local keys = {
  -- Close the current pane
  { key = 'w', mods = 'PRIMARY', action = act.CloseCurrentPane { confirm = true } },

  -- selene: allow(mixed_table)
  -- Toggle fullscreen
  --
  { key = 'Enter', mods = 'SECONDARY', action = act.ToggleFullScreen },
  -- Send Ctrl-A to the program (tmux-style prefix)
  { key = 'a', mods = 'CTRL|SHIFT', action = act.SendKey { key = 'a', mods = 'CTRL' } },
  { key = 'L', mods = 'PRIMARY', action = act.SendString '\x0c' },
  { key = 'p', mods = 'PRIMARY', action = act.ActivateCommandPalette },
}

local copy_mode = {
  -- Yank and exit
  { key = 'y', mods = 'NONE', action = act.Multiple { act.CopyTo 'Clipboard', act.CopyMode 'Close' } },
}

local darwin_specific_keys = {
  { key = 'q', mods = 'SUPER', action = act.QuitApplication },
}

local windows_specific_keys = {
  { key = 'F4', mods = 'ALT', action = act.QuitApplication },
}

return M
"#;

#[test]
fn test_parses_entries_with_context() {
    let bindings = parse_wezterm(KEYBINDS_LUA, Platform::Linux, "keybinds.lua");
    let keys: Vec<(&str, &str)> = bindings
        .iter()
        .map(|b| (b.canonical.as_str(), b.context.as_str()))
        .collect();

    assert_eq!(
        keys,
        vec![
            ("ctrl+w", "keys"),
            ("alt+enter", "keys"),
            ("ctrl+shift+a", "keys"),
            ("ctrl+shift+l", "keys"),
            ("ctrl+p", "keys"),
            ("y", "copy_mode"),
            ("alt+f4", "windows_specific_keys"),
        ]
    );
    assert!(bindings.iter().all(|b| b.tool == Tool::Wezterm));
    assert!(bindings.iter().all(|b| b.source_file == "keybinds.lua"));
}

#[test]
fn test_platform_specific_tables() {
    let linux = parse_wezterm(KEYBINDS_LUA, Platform::Linux, "keybinds.lua");
    assert!(linux.iter().all(|b| b.context != "darwin_specific_keys"));

    let darwin = parse_wezterm(KEYBINDS_LUA, Platform::Darwin, "keybinds.lua");
    assert!(darwin.iter().any(|b| b.context == "darwin_specific_keys" && b.canonical == "super+q"));
    assert!(darwin.iter().all(|b| b.context != "windows_specific_keys"));
}

#[test]
fn test_passthrough_detection() {
    let bindings = parse_wezterm(KEYBINDS_LUA, Platform::Linux, "keybinds.lua");
    let passthrough: Vec<&str> = bindings
        .iter()
        .filter(|b| b.is_passthrough)
        .map(|b| b.canonical.as_str())
        .collect();

    assert_eq!(passthrough, vec!["ctrl+shift+a", "ctrl+shift+l"]);
}

#[test]
fn test_nested_action_tables_are_not_entries() {
    let bindings = parse_wezterm(KEYBINDS_LUA, Platform::Linux, "keybinds.lua");
    // act.SendKey { key = 'a', mods = 'CTRL' } must not show up as ctrl+a
    assert!(bindings.iter().all(|b| b.canonical != "ctrl+a"));
}

#[test]
fn test_descriptions() {
    let bindings = parse_wezterm(KEYBINDS_LUA, Platform::Linux, "keybinds.lua");
    let descriptions: Vec<&str> = bindings.iter().map(|b| b.description.as_str()).collect();

    assert_eq!(
        descriptions,
        vec![
            "Close the current pane",
            "Toggle fullscreen",
            "Send Ctrl-A to the program (tmux-style prefix)",
            "",
            "",
            "Yank and exit",
            "",
        ]
    );
}

#[test]
fn test_raw_key_display() {
    let bindings = parse_wezterm(KEYBINDS_LUA, Platform::Linux, "keybinds.lua");
    assert_eq!(bindings[0].raw_key, "key='w', mods='PRIMARY'");
}

#[test]
fn test_description_skips_pragmas_and_blank_comments() {
    assert_eq!(description_before("-- Real text\n-- @diagnostic disable\n--\n\n  "), "Real text");
    assert_eq!(description_before("--- Doc style\n"), "Doc style");
    assert_eq!(description_before("{ key = 'x', action = act.Nop },\n  "), "");
    assert_eq!(description_before(""), "");
}

#[test]
fn test_entry_without_mods_defaults_to_empty() {
    let entries = parse_entries("{ { key = 'F11', action = act.ToggleFullScreen } }");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].mods, "");
    assert_eq!(entries[0].key, "F11");
}

#[test]
fn test_entry_without_action_is_ignored() {
    assert!(parse_entries("{ { key = 'a', mods = 'CTRL' } }").is_empty());
}

#[test]
fn test_comments_with_braces_inside_table() {
    let src = "local keys = {\n  -- opens { a thing }\n  { key = 'o', mods = 'CTRL', action = act.Nop },\n}\n";
    let bindings = parse_wezterm(src, Platform::Linux, "k.lua");
    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].description, "opens { a thing }");
}

#[test]
fn test_source_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(KEYBINDS_LUA.as_bytes()).unwrap();

    let source = WeztermSource::new(file.path().to_path_buf(), Platform::Linux);
    let bindings = source.load().unwrap();
    assert_eq!(bindings.len(), 7);
    assert_eq!(bindings[0].source_file, file.path().display().to_string());
}

#[test]
fn test_missing_file_degrades_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let source = WeztermSource::new(dir.path().join("keybinds.lua"), Platform::Linux);

    assert!(source.load().is_err());
    assert!(source.collect().is_empty());
}

#[test]
fn test_computed_mods_skip_the_entry() {
    let src = "local keys = {\n  { key = 'w', mods = mod.PRIMARY, action = act.CloseCurrentPane { confirm = true } },\n  { key = 'q', mods = 'CTRL', action = act.QuitApplication },\n}\n";
    let bindings = parse_wezterm(src, Platform::Linux, "keybinds.lua");

    let keys: Vec<&str> = bindings.iter().map(|b| b.canonical.as_str()).collect();
    assert_eq!(keys, vec!["ctrl+q"]);
}

#[test]
fn test_computed_mods_do_not_expose_nested_groups() {
    let src = "local keys = {\n  { key = 'a', mods = keys.SUPER, action = act.SendKey { key = 'b', mods = 'CTRL', action = 'x' } },\n}\n";
    assert!(parse_entries(src.trim_start_matches("local keys = ")).is_empty());
}

#[test]
fn test_computed_mods_never_conflict_as_bare_keys() {
    let src = "local keys = {\n  { key = 'w', mods = mod.PRIMARY, action = act.CloseCurrentPane { confirm = true } },\n}\n";
    let mut bindings = parse_wezterm(src, Platform::Linux, "keybinds.lua");
    bindings.extend(
        crate::sources::yazi::parse_yazi(
            "[mgr]\nprepend_keymap = [ { on = \"w\", run = \"tasks:show\" } ]\n",
            "keymap.toml",
        )
        .unwrap(),
    );

    assert!(crate::core::detect(&bindings).is_empty());
}
