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

//! src/sources/neovim.rs
//!
//! Neovim keybinding source
//!
//! Neovim keymaps are mostly defined by Lua plugins at runtime, so reading
//! config files is not enough. Instead a headless Neovim is started with the
//! user's normal config, asked for `nvim_get_keymap` in every relevant mode,
//! and made to print the result as JSON.
//!
//! # Modes
//!
//! `NvimCommand` does the real process invocation. Anything implementing
//! `KeymapQuery` (including a plain closure) can stand in for it, which is
//! how tests run without a Neovim binary.

use serde::Deserialize;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::core::normalize::parse_bracket_key;
use crate::core::{Keybinding, ParsedKey, Tool};
use crate::sources::{KeybindingSource, SourceError};

/// Marker used as `source_file` for runtime-derived bindings
pub const NVIM_SOURCE_MARKER: &str = "(nvim keymap)";

/// Default limit on how long Neovim may take to print its keymaps
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Lua run inside Neovim; prints a JSON list of `{mode, lhs, desc}`
pub const KEYMAP_DUMP_SCRIPT: &str = "local maps = {} \
for _, mode in ipairs({'n','i','v','x','o','c','s'}) do \
for _, m in ipairs(vim.api.nvim_get_keymap(mode)) do \
table.insert(maps, { mode = m.mode, lhs = m.lhs, desc = m.desc or '' }) \
end end \
print(vim.json.encode(maps))";

/// How often the child is polled while waiting for it to exit
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// One record of the keymap dump
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct KeymapEntry {
    pub mode: String,
    pub lhs: String,
    #[serde(default)]
    pub desc: Option<String>,
}

/// Produces Neovim's active keymaps
pub trait KeymapQuery {
    fn query_keymaps(&self) -> Result<Vec<KeymapEntry>, SourceError>;
}

impl<F> KeymapQuery for F
where
    F: Fn() -> Result<Vec<KeymapEntry>, SourceError>,
{
    fn query_keymaps(&self) -> Result<Vec<KeymapEntry>, SourceError> {
        self()
    }
}

/// Runs `nvim --headless` to dump keymaps, bounded by a timeout
#[derive(Clone, Debug)]
pub struct NvimCommand {
    binary: String,
    timeout: Duration,
}

impl NvimCommand {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    /// Spawns Neovim and returns everything it wrote to stderr.
    ///
    /// stdout and stderr are drained on helper threads so a chatty startup
    /// cannot fill a pipe and stall the child. On timeout the child is
    /// killed.
    fn run(&self) -> Result<String, SourceError> {
        let lua = format!("lua {}", KEYMAP_DUMP_SCRIPT);
        let mut child = Command::new(&self.binary)
            .args(["--headless", "-c", lua.as_str(), "-c", "qa"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SourceError::EditorUnavailable {
                binary: self.binary.clone(),
                reason: e.to_string(),
            })?;

        let stdout = child.stdout.take().map(|pipe| thread::spawn(move || drain(pipe)));
        let stderr = child.stderr.take().map(|pipe| thread::spawn(move || drain(pipe)));

        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                debug!(%status, "nvim exited");
                break;
            }
            if Instant::now() >= deadline {
                // Reader threads finish once the killed child's pipes close
                let _ = child.kill();
                let _ = child.wait();
                return Err(SourceError::EditorTimeout(self.timeout));
            }
            thread::sleep(POLL_INTERVAL);
        }

        if let Some(handle) = stdout {
            let _ = handle.join();
        }
        Ok(stderr
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default())
    }
}

impl Default for NvimCommand {
    fn default() -> Self {
        Self::new("nvim", DEFAULT_TIMEOUT)
    }
}

impl KeymapQuery for NvimCommand {
    fn query_keymaps(&self) -> Result<Vec<KeymapEntry>, SourceError> {
        let stderr = self.run()?;
        let json = extract_keymap_json(&stderr).ok_or(SourceError::NoKeymapOutput)?;
        decode_keymap_dump(&json)
    }
}

fn drain<R: Read>(mut pipe: R) -> String {
    let mut buf = Vec::new();
    let _ = pipe.read_to_end(&mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Finds the JSON list in Neovim's output.
///
/// Carriage returns are stripped and the first line starting with `[` is
/// returned; plugins may print other text around it.
pub fn extract_keymap_json(output: &str) -> Option<String> {
    output
        .replace('\r', "")
        .lines()
        .map(str::trim)
        .find(|line| line.starts_with('['))
        .map(str::to_string)
}

/// Decodes a keymap dump, skipping records that do not have the expected
/// shape. Only a dump that is not a JSON array at all is an error.
pub fn decode_keymap_dump(json: &str) -> Result<Vec<KeymapEntry>, SourceError> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)?;

    Ok(records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<KeymapEntry>(record) {
            Ok(entry) => Some(entry),
            Err(e) => {
                debug!("skipping malformed keymap record: {}", e);
                None
            }
        })
        .collect())
}

/// Converts keymap records to bindings, dropping multi-key sequences.
pub fn entries_to_bindings(entries: Vec<KeymapEntry>) -> Vec<Keybinding> {
    entries
        .into_iter()
        .filter_map(|entry| match parse_bracket_key(&entry.lhs) {
            ParsedKey::Single(combo) => Some(Keybinding {
                canonical: combo.to_string(),
                raw_key: entry.lhs,
                tool: Tool::Neovim,
                context: entry.mode,
                description: entry.desc.unwrap_or_default(),
                source_file: NVIM_SOURCE_MARKER.to_string(),
                is_passthrough: false,
            }),
            ParsedKey::Sequence(_) => None,
        })
        .collect()
}

/// Neovim bindings from any keymap query
pub struct NeovimSource<Q: KeymapQuery> {
    query: Q,
}

impl<Q: KeymapQuery> NeovimSource<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

impl<Q: KeymapQuery> KeybindingSource for NeovimSource<Q> {
    fn tool(&self) -> Tool {
        Tool::Neovim
    }

    fn load(&self) -> Result<Vec<Keybinding>, SourceError> {
        Ok(entries_to_bindings(self.query.query_keymaps()?))
    }
}
