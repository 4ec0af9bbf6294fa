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

//! src/sources/yazi.rs
//!
//! Yazi keybinding source
//!
//! Reads `.config/yazi/keymap.toml`. Every top-level section (`[mgr]`,
//! `[tasks]`, `[input]`, ...) may carry a `prepend_keymap` list:
//!
//! ```toml
//! [mgr]
//! prepend_keymap = [
//!   { on = "<C-s>", run = "shell $SHELL --block", desc = "Open shell here" },
//!   { on = ["g", "r"], run = "cd /", desc = "Go to root" },
//! ]
//! ```
//!
//! `on` is either one key string or a list of keys pressed in order.

use std::path::PathBuf;
use toml::{Table, Value};
use tracing::debug;

use crate::core::normalize::parse_bracket_key;
use crate::core::{Keybinding, ParsedKey, Tool};
use crate::sources::{read_config, KeybindingSource, SourceError};

/// Reads Yazi bindings from a `keymap.toml` file
#[derive(Clone, Debug)]
pub struct YaziSource {
    path: PathBuf,
}

impl YaziSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl KeybindingSource for YaziSource {
    fn tool(&self) -> Tool {
        Tool::Yazi
    }

    fn load(&self) -> Result<Vec<Keybinding>, SourceError> {
        let source = read_config(&self.path)?;
        parse_yazi(&source, &self.path.display().to_string())
    }
}

/// Parses the `prepend_keymap` lists of a Yazi keymap document.
///
/// Entries without a usable `on` are skipped; multi-key sequences are
/// dropped. Only a document that is not valid TOML is an error.
pub fn parse_yazi(source: &str, source_file: &str) -> Result<Vec<Keybinding>, SourceError> {
    let document: Table = source.parse()?;
    let mut bindings = Vec::new();

    for (section_name, section) in &document {
        let Some(keymaps) = section
            .as_table()
            .and_then(|table| table.get("prepend_keymap"))
            .and_then(Value::as_array)
        else {
            continue;
        };

        for entry in keymaps {
            let Some(entry) = entry.as_table() else {
                debug!(section = %section_name, "skipping non-table keymap entry");
                continue;
            };
            let Some((raw_key, parsed)) = entry.get("on").and_then(trigger) else {
                debug!(section = %section_name, "skipping keymap entry without 'on'");
                continue;
            };
            let ParsedKey::Single(combo) = parsed else {
                continue;
            };

            bindings.push(Keybinding {
                canonical: combo.to_string(),
                raw_key,
                tool: Tool::Yazi,
                context: section_name.clone(),
                description: entry
                    .get("desc")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                source_file: source_file.to_string(),
                is_passthrough: false,
            });
        }
    }

    Ok(bindings)
}

/// Reads an `on` value: a key string, or a list of key strings.
///
/// A one-element list is the same as the bare string. Longer lists are
/// sequences.
fn trigger(on: &Value) -> Option<(String, ParsedKey)> {
    match on {
        Value::String(key) => Some((key.clone(), parse_bracket_key(key))),
        Value::Array(keys) => {
            let keys: Vec<&str> = keys.iter().map(Value::as_str).collect::<Option<_>>()?;
            match keys.as_slice() {
                [] => None,
                [single] => Some((single.to_string(), parse_bracket_key(single))),
                many => {
                    let joined = many.concat();
                    Some((joined.clone(), ParsedKey::Sequence(joined)))
                }
            }
        }
        _ => None,
    }
}
