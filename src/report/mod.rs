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

//! src/report/mod.rs
//!
//! Conflict reports
//!
//! `Analysis` bundles everything a report needs: every binding that was
//! found, the conflicts detected among them and the WezTerm passthrough
//! keys. It can be rendered two ways:
//! - `text`: grouped, coloured output for people
//! - `json`: a structured document for scripts
//!
//! Rendering only writes to the given writer.

pub mod json;
pub mod text;

use crate::core::{detect, Conflict, Keybinding, Platform, Severity, Tool};

pub use json::{render_json, JsonReport};
pub use text::render_text;

/// Result of one analysis run
#[derive(Clone, Debug)]
pub struct Analysis {
    pub platform: Platform,
    /// Every binding from every tool, in collection order
    pub bindings: Vec<Keybinding>,
    /// Detected conflicts, critical first
    pub conflicts: Vec<Conflict>,
    /// WezTerm bindings that forward their key to the inner program
    pub passthrough: Vec<Keybinding>,
}

impl Analysis {
    /// Runs conflict detection over the collected bindings.
    pub fn new(platform: Platform, bindings: Vec<Keybinding>) -> Self {
        let conflicts = detect(&bindings);
        let passthrough = bindings
            .iter()
            .filter(|b| b.tool == Tool::Wezterm && b.is_passthrough)
            .cloned()
            .collect();

        Self {
            platform,
            bindings,
            conflicts,
            passthrough,
        }
    }

    /// Conflicts of one severity, in report order
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(move |c| c.severity == severity)
    }

    pub fn critical_count(&self) -> usize {
        self.with_severity(Severity::Critical).count()
    }

    pub fn info_count(&self) -> usize {
        self.with_severity(Severity::Info).count()
    }

    /// True when the run should exit with a failure status
    pub fn has_critical(&self) -> bool {
        self.critical_count() > 0
    }
}

/// Formats a canonical key for display: `ctrl+shift+w` → `Ctrl+Shift+W`
pub fn display_key(canonical: &str) -> String {
    canonical
        .split('+')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("+")
}

#[cfg(test)]
mod tests;
