//! CLI entry point for keybind-check
//!
//! Collects keybindings from WezTerm, Neovim and Yazi, then prints a
//! conflict report. Exits with status 1 when any critical conflict exists.

use clap::Parser;
use colored::*;
use keybind_check::config::{resolve_root, ConfigPaths};
use keybind_check::report::{render_json, render_text, Analysis};
use keybind_check::sources::{collect_all, NeovimSource, NvimCommand, WeztermSource, YaziSource};
use keybind_check::Platform;
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "keybind-check")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Platform whose WezTerm bindings are checked (linux or darwin)
    #[arg(long)]
    platform: Option<Platform>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// List every collected binding after the summary
    #[arg(short, long)]
    verbose: bool,

    /// Dotfiles root (default: nearest ancestor containing flake.nix)
    #[arg(long)]
    root: Option<String>,

    /// Neovim binary used to query keymaps
    #[arg(long, default_value = "nvim")]
    nvim: String,

    /// Seconds to wait for Neovim before giving up on it
    #[arg(long, default_value_t = 10)]
    nvim_timeout: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures
            let failed = e.use_stderr();
            let _ = e.print();
            std::process::exit(if failed { 1 } else { 0 });
        }
    };

    init_logging();

    let cwd = std::env::current_dir()?;
    let root = match resolve_root(cli.root.as_deref(), &cwd) {
        Ok(root) => root,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    };

    let platform = cli.platform.unwrap_or_else(Platform::host);
    let paths = ConfigPaths::new(&root);
    debug!(root = %root.display(), %platform, "checking keybindings");

    let wezterm = WeztermSource::new(paths.wezterm, platform);
    let neovim = NeovimSource::new(NvimCommand::new(
        cli.nvim,
        Duration::from_secs(cli.nvim_timeout),
    ));
    let yazi = YaziSource::new(paths.yazi);

    let analysis = Analysis::new(platform, collect_all(&[&wezterm, &neovim, &yazi]));

    let mut out = io::stdout().lock();
    if cli.json {
        render_json(&analysis, &mut out)?;
    } else {
        render_text(&analysis, cli.verbose, &mut out)?;
    }
    out.flush()?;

    if analysis.has_critical() {
        std::process::exit(1);
    }

    Ok(())
}

/// Logs to stderr so reports on stdout stay clean; `RUST_LOG` overrides
/// the default `warn` level.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
