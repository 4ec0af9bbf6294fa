//! Report module tests
//!
//! Contains test suites for both output formats:
//! - Text report sections, grouping and summary
//! - JSON document shape and field names


use crate::core::{Keybinding, Platform, Tool};
use crate::report::Analysis;

/// Helper to create test bindings
pub(super) fn binding(tool: Tool, canonical: &str, context: &str, description: &str) -> Keybinding {
    Keybinding {
        canonical: canonical.to_string(),
        raw_key: canonical.to_string(),
        tool,
        context: context.to_string(),
        description: description.to_string(),
        source_file: match tool {
            Tool::Wezterm => "/dots/.config/wezterm/keybinds.lua".to_string(),
            Tool::Neovim => "(nvim keymap)".to_string(),
            Tool::Yazi => "/dots/.config/yazi/keymap.toml".to_string(),
        },
        is_passthrough: false,
    }
}

/// One critical, one info and one passthrough key
pub(super) fn sample_analysis() -> Analysis {
    let mut passthrough = binding(Tool::Wezterm, "ctrl+shift+a", "keys", "Send Ctrl-A");
    passthrough.is_passthrough = true;

    Analysis::new(
        Platform::Linux,
        vec![
            binding(Tool::Wezterm, "ctrl+w", "keys", "Close pane"),
            passthrough,
            binding(Tool::Neovim, "ctrl+w", "n", ""),
            binding(Tool::Neovim, "ctrl+s", "n", "Save"),
            binding(Tool::Yazi, "ctrl+s", "mgr", "Open shell"),
        ],
    )
}
