//! Structured report output.
//!
//! The JSON document has four top-level fields:
//! `platform`, `conflicts`, `passthrough` and `summary`.

use serde::Serialize;
use std::io::{self, Write};

use crate::core::{Conflict, Keybinding, Platform, Severity, Tool};
use crate::report::Analysis;

#[derive(Debug, Serialize)]
pub struct JsonReport {
    pub platform: Platform,
    pub conflicts: Vec<JsonConflict>,
    pub passthrough: Vec<JsonPassthrough>,
    pub summary: JsonSummary,
}

#[derive(Debug, Serialize)]
pub struct JsonConflict {
    pub key: String,
    pub severity: Severity,
    pub label: String,
    pub bindings: Vec<JsonBinding>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonBinding {
    pub tool: Tool,
    pub raw_key: String,
    pub context: String,
    pub description: String,
    pub source_file: String,
    pub is_passthrough: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonPassthrough {
    pub key: String,
    pub raw_key: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonSummary {
    pub critical: usize,
    pub info: usize,
    pub passthrough: usize,
    pub total_bindings: usize,
}

impl From<&Keybinding> for JsonBinding {
    fn from(b: &Keybinding) -> Self {
        Self {
            tool: b.tool,
            raw_key: b.raw_key.clone(),
            context: b.context.clone(),
            description: b.description.clone(),
            source_file: b.source_file.clone(),
            is_passthrough: b.is_passthrough,
        }
    }
}

impl From<&Conflict> for JsonConflict {
    fn from(c: &Conflict) -> Self {
        Self {
            key: c.canonical.clone(),
            severity: c.severity,
            label: c.label.clone(),
            bindings: c.bindings.iter().map(JsonBinding::from).collect(),
        }
    }
}

impl From<&Analysis> for JsonReport {
    fn from(analysis: &Analysis) -> Self {
        Self {
            platform: analysis.platform,
            conflicts: analysis.conflicts.iter().map(JsonConflict::from).collect(),
            passthrough: analysis
                .passthrough
                .iter()
                .map(|b| JsonPassthrough {
                    key: b.canonical.clone(),
                    raw_key: b.raw_key.clone(),
                    description: b.description.clone(),
                })
                .collect(),
            summary: JsonSummary {
                critical: analysis.critical_count(),
                info: analysis.info_count(),
                passthrough: analysis.passthrough.len(),
                total_bindings: analysis.bindings.len(),
            },
        }
    }
}

/// Writes the analysis as pretty-printed JSON followed by a newline.
pub fn render_json<W: Write>(analysis: &Analysis, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &JsonReport::from(analysis))?;
    writeln!(out)
}
