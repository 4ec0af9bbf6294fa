//! Cross-tool keybinding conflict detection
//!
//! Bindings are indexed by canonical key in a HashMap. A key only becomes a
//! conflict when bindings from two or more different tools share it, and the
//! severity depends on capture order: WezTerm sees every key event before
//! the program running inside it.
//!
//! # Rules
//! For each shared key:
//! 1. A WezTerm binding that intercepts the key (not passthrough, not in
//!    `copy_mode`/`search_mode`) plus any Neovim binding → critical
//! 2. The same WezTerm binding plus any Yazi binding → critical
//! 3. Neovim plus Yazi → info (they never receive the same key event)
//!
//! One key can produce several conflicts.

use std::collections::HashMap;

use crate::core::types::{Conflict, Keybinding, Severity, Tool};

/// Label for rule 1
pub const LABEL_WEZTERM_NEOVIM: &str = "WezTerm intercepts before Neovim";
/// Label for rule 2
pub const LABEL_WEZTERM_YAZI: &str = "WezTerm intercepts before Yazi";
/// Label for rule 3
pub const LABEL_NEOVIM_YAZI: &str = "Neovim vs Yazi (different tools, same key)";

/// WezTerm key tables that are only active transiently and own their keys
pub const TRANSIENT_CONTEXTS: [&str; 2] = ["copy_mode", "search_mode"];

/// Detects cross-tool conflicts using HashMap-based indexing.
///
/// Keys are canonical key strings and values are every binding using that
/// key, in insertion order.
pub struct ConflictDetector {
    /// Maps canonical key to all bindings using it.
    bindings: HashMap<String, Vec<Keybinding>>,
}

impl ConflictDetector {
    /// Creates a new empty conflict detector.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Adds a keybinding to the detector.
    ///
    /// Time complexity: O(1) average case
    pub fn add_binding(&mut self, binding: Keybinding) {
        self.bindings
            .entry(binding.canonical.clone())
            .or_default()
            .push(binding);
    }

    /// Finds all conflicts, critical first, then by canonical key.
    ///
    /// Time complexity: O(n log n) where n = number of unique keys.
    pub fn find_conflicts(&self) -> Vec<Conflict> {
        let mut conflicts: Vec<Conflict> = self
            .bindings
            .iter()
            .flat_map(|(canonical, group)| classify(canonical, group))
            .collect();

        conflicts.sort_by(|a, b| {
            a.severity
                .cmp(&b.severity)
                .then_with(|| a.canonical.cmp(&b.canonical))
        });

        conflicts
    }

    /// Checks if a canonical key is bound by two or more tools.
    pub fn has_conflict(&self, canonical: &str) -> bool {
        self.bindings
            .get(canonical)
            .map(|group| distinct_tools(group) > 1)
            .unwrap_or(false)
    }

    /// Returns the total number of bindings tracked.
    pub fn total_bindings(&self) -> usize {
        self.bindings.values().map(|v| v.len()).sum()
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Groups bindings by canonical key and returns every conflict, ordered.
pub fn detect(bindings: &[Keybinding]) -> Vec<Conflict> {
    let mut detector = ConflictDetector::new();
    for binding in bindings {
        detector.add_binding(binding.clone());
    }
    detector.find_conflicts()
}

fn distinct_tools(group: &[Keybinding]) -> usize {
    Tool::ALL
        .iter()
        .filter(|tool| group.iter().any(|b| b.tool == **tool))
        .count()
}

/// True for a WezTerm binding that takes the key away from inner programs
fn intercepts(binding: &Keybinding) -> bool {
    binding.tool == Tool::Wezterm
        && !binding.is_passthrough
        && !TRANSIENT_CONTEXTS.contains(&binding.context.as_str())
}

/// Applies the three rules to one canonical-key group.
fn classify(canonical: &str, group: &[Keybinding]) -> Vec<Conflict> {
    if distinct_tools(group) < 2 {
        return Vec::new();
    }

    let of_tool = |tool: Tool| -> Vec<Keybinding> {
        group.iter().filter(|b| b.tool == tool).cloned().collect()
    };
    let intercepting: Vec<Keybinding> = group.iter().filter(|b| intercepts(b)).cloned().collect();
    let neovim = of_tool(Tool::Neovim);
    let yazi = of_tool(Tool::Yazi);

    let conflict = |severity, label: &str, first: &[Keybinding], second: &[Keybinding]| Conflict {
        canonical: canonical.to_string(),
        severity,
        label: label.to_string(),
        bindings: first.iter().chain(second).cloned().collect(),
    };

    let mut conflicts = Vec::new();

    if !intercepting.is_empty() && !neovim.is_empty() {
        conflicts.push(conflict(Severity::Critical, LABEL_WEZTERM_NEOVIM, &intercepting, &neovim));
    }
    if !intercepting.is_empty() && !yazi.is_empty() {
        conflicts.push(conflict(Severity::Critical, LABEL_WEZTERM_YAZI, &intercepting, &yazi));
    }
    if !neovim.is_empty() && !yazi.is_empty() {
        conflicts.push(conflict(Severity::Info, LABEL_NEOVIM_YAZI, &neovim, &yazi));
    }

    conflicts
}
