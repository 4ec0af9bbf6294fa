//! Human-readable report output.

use colored::*;
use std::io::{self, Write};
use std::path::Path;

use crate::core::normalize::placeholder_summary;
use crate::core::{Conflict, Keybinding, Severity, Tool};
use crate::report::{display_key, Analysis};

const NO_DESCRIPTION: &str = "(no description)";

/// Writes the text report.
///
/// Sections: critical conflicts grouped by label, informational overlaps,
/// passthrough keys and a summary. With `verbose`, every binding is listed
/// per tool after the summary.
pub fn render_text<W: Write>(analysis: &Analysis, verbose: bool, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "=== Keybinding Conflict Report ===".bold())?;
    writeln!(
        out,
        "Platform: {} ({})",
        analysis.platform,
        placeholder_summary(analysis.platform)
    )?;
    writeln!(out)?;

    for (label, items) in group_by_label(analysis.with_severity(Severity::Critical)) {
        writeln!(out, "{}", format!("--- CRITICAL: {} ---", label).red().bold())?;
        write_conflicts(out, &items)?;
        writeln!(out)?;
    }

    for (label, items) in group_by_label(analysis.with_severity(Severity::Info)) {
        writeln!(out, "{}", format!("--- INFO: {} ---", label).yellow().bold())?;
        write_conflicts(out, &items)?;
        writeln!(out)?;
    }

    if !analysis.passthrough.is_empty() {
        writeln!(
            out,
            "{}",
            "--- Passthrough keys (WezTerm forwards to terminal) ---".green()
        )?;
        for b in &analysis.passthrough {
            writeln!(
                out,
                "  {}: {} (passthrough)",
                display_key(&b.canonical).cyan(),
                description_or_default(b)
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", "=== Summary ===".bold())?;
    writeln!(out, "  Critical conflicts: {}", analysis.critical_count())?;
    writeln!(out, "  Informational overlaps: {}", analysis.info_count())?;
    writeln!(out, "  Passthrough keys: {}", analysis.passthrough.len())?;

    if verbose {
        write_all_bindings(out, &analysis.bindings)?;
    }

    Ok(())
}

/// Groups conflicts by label, keeping the order labels first appear in.
fn group_by_label<'a>(conflicts: impl Iterator<Item = &'a Conflict>) -> Vec<(&'a str, Vec<&'a Conflict>)> {
    let mut groups: Vec<(&str, Vec<&Conflict>)> = Vec::new();

    for conflict in conflicts {
        match groups.iter_mut().find(|(label, _)| *label == conflict.label) {
            Some((_, items)) => items.push(conflict),
            None => groups.push((conflict.label.as_str(), vec![conflict])),
        }
    }

    groups
}

fn write_conflicts<W: Write>(out: &mut W, conflicts: &[&Conflict]) -> io::Result<()> {
    for conflict in conflicts {
        writeln!(out, "  {}", display_key(&conflict.canonical).cyan().bold())?;
        for b in &conflict.bindings {
            writeln!(out, "{}", format_binding(b))?;
        }
    }
    Ok(())
}

/// One binding line inside a conflict: tool, description and location
pub fn format_binding(b: &Keybinding) -> String {
    let location = match b.tool {
        Tool::Neovim => format!("{} mode", b.context),
        _ => {
            let file = Path::new(&b.source_file)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| b.source_file.clone());
            format!("{}, {}", file, b.context)
        }
    };

    format!("    {}: {} ({})", b.tool, description_or_default(b), location)
}

fn description_or_default(b: &Keybinding) -> &str {
    if b.description.is_empty() {
        NO_DESCRIPTION
    } else {
        &b.description
    }
}

fn write_all_bindings<W: Write>(out: &mut W, bindings: &[Keybinding]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "=== All Keybindings ===".bold())?;

    for tool in Tool::ALL {
        let of_tool: Vec<&Keybinding> = bindings.iter().filter(|b| b.tool == tool).collect();
        if of_tool.is_empty() {
            continue;
        }

        writeln!(out)?;
        writeln!(out, "--- {} ({} bindings) ---", tool, of_tool.len())?;
        for b in of_tool {
            let marker = if b.is_passthrough { " [passthrough]" } else { "" };
            writeln!(
                out,
                "  {:<24} {:<14} {}{}",
                display_key(&b.canonical),
                b.context,
                description_or_default(b),
                marker
            )?;
        }
    }

    Ok(())
}
