use crate::core::types::{KeyCombo, Keybinding, Modifier, Platform, Severity, Tool};

#[test]
fn test_modifier_display() {
    assert_eq!(format!("{}", Modifier::Super), "super");
    assert_eq!(format!("{}", Modifier::Ctrl), "ctrl");
}

#[test]
fn test_modifier_aliases() {
    assert_eq!(Modifier::from_name("CONTROL"), Some(Modifier::Ctrl));
    assert_eq!(Modifier::from_name("opt"), Some(Modifier::Alt));
    assert_eq!(Modifier::from_name("META"), Some(Modifier::Alt));
    assert_eq!(Modifier::from_name("cmd"), Some(Modifier::Super));
    assert_eq!(Modifier::from_name("hyper"), None);
}

#[test]
fn test_modifier_sort_order() {
    let mut mods = vec![Modifier::Super, Modifier::Shift, Modifier::Alt, Modifier::Ctrl];
    mods.sort();
    assert_eq!(mods, vec![Modifier::Ctrl, Modifier::Alt, Modifier::Shift, Modifier::Super]);
}

#[test]
fn test_key_combo_normalization() {
    // Test that order doesn't matter
    let combo1 = KeyCombo::new(vec![Modifier::Super, Modifier::Shift], "k");
    let combo2 = KeyCombo::new(vec![Modifier::Shift, Modifier::Super], "K");

    assert_eq!(combo1, combo2); // Should be equal after normalization
}

#[test]
fn test_key_combo_display() {
    let combo = KeyCombo::new(vec![Modifier::Super, Modifier::Shift, Modifier::Ctrl], "K");
    assert_eq!(format!("{}", combo), "ctrl+shift+super+k");

    let bare = KeyCombo::new(Vec::new(), "Escape");
    assert_eq!(format!("{}", bare), "escape");
}

#[test]
fn test_key_combo_from_names_keeps_unknowns() {
    let combo = KeyCombo::from_names(&["Hyper", "ctrl", "hyper"], "x");
    assert_eq!(combo.modifiers, vec![Modifier::Ctrl]);
    assert_eq!(combo.extra, vec!["hyper".to_string()]);
}

#[test]
fn test_platform_parsing() {
    assert_eq!("linux".parse::<Platform>(), Ok(Platform::Linux));
    assert_eq!("darwin".parse::<Platform>(), Ok(Platform::Darwin));
    assert!("windows".parse::<Platform>().is_err());
    assert_eq!(Platform::Darwin.to_string(), "darwin");
}

#[test]
fn test_severity_ordering() {
    assert!(Severity::Critical < Severity::Info);
}

#[test]
fn test_tool_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&Tool::Wezterm).unwrap(), "\"wezterm\"");
    assert_eq!(Tool::Yazi.to_string(), "Yazi");
}

#[test]
fn test_keybinding_display() {
    let binding = Keybinding {
        canonical: "ctrl+w".to_string(),
        raw_key: "<C-w>".to_string(),
        tool: Tool::Neovim,
        context: "n".to_string(),
        description: "Window commands".to_string(),
        source_file: "(nvim keymap)".to_string(),
        is_passthrough: false,
    };

    let display = format!("{}", binding);
    assert!(display.contains("Neovim"));
    assert!(display.contains("ctrl+w"));
    assert!(display.contains("Window commands"));
}

#[test]
fn test_keybinding_no_description() {
    let binding = Keybinding {
        canonical: "q".to_string(),
        raw_key: "q".to_string(),
        tool: Tool::Yazi,
        context: "mgr".to_string(),
        description: String::new(),
        source_file: "keymap.toml".to_string(),
        is_passthrough: false,
    };

    assert_eq!(format!("{}", binding), "Yazi q [mgr]");
}
