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

//! src/sources/lua.rs
//!
//! Minimal Lua source scanner
//!
//! WezTerm configs are Lua programs, but the keybinding tables inside them
//! are plain table literals. Rather than evaluating Lua, this module scans
//! the source text:
//! - `extract_lua_tables` finds column-0 `local name = { ... }` declarations and
//!   isolates each balanced body
//! - `find_matching_brace` counts brace depth while skipping string literals,
//!   long strings and comments, so a `{` or `}` inside them never moves depth
//! - `split_top_level` splits a table body on separators at depth zero
//! - `parse_field` reads one `name = value` field with nom
//!
//! Everything here is pure text processing; it knows nothing about keys.

use nom::{
    branch::alt,
    bytes::complete::{escaped, tag, take_till, take_while, take_while1},
    character::complete::{anychar, char, multispace1, none_of},
    combinator::{map, opt, recognize},
    multi::many0,
    sequence::{delimited, pair},
    IResult, Parser,
};
use regex::Regex;
use std::sync::LazyLock;

/// Top-level table declaration at column 0: `local keys = {` or `keys = {`
#[allow(clippy::expect_used)]
static TABLE_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:local[ \t]+)?([A-Za-z_][A-Za-z0-9_]*)[ \t]*=[ \t]*\{")
        .expect("table declaration pattern should be valid regex")
});

/// A named table literal found in Lua source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LuaTable<'a> {
    /// Variable name the table is assigned to
    pub name: String,

    /// Table text from the opening `{` through the matching `}` (inclusive)
    pub body: &'a str,

    /// False when the source ended before the closing brace
    pub terminated: bool,
}

/// A value on the right-hand side of a table field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LuaValue {
    /// Quoted string literal, escapes resolved
    Str(String),
    /// Any other expression, kept as trimmed source text
    Expr(String),
}

impl LuaValue {
    /// The string contents, when the value is a string literal
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LuaValue::Str(s) => Some(s),
            LuaValue::Expr(_) => None,
        }
    }

    /// Source text of the value, whatever its kind
    pub fn text(&self) -> &str {
        match self {
            LuaValue::Str(s) | LuaValue::Expr(s) => s,
        }
    }
}

/// Extracts every top-level named table from Lua source.
///
/// Declarations that appear inside an already extracted table are part of
/// that table and are not reported again. A table whose closing brace is
/// missing runs to the end of the input and is marked unterminated.
pub fn extract_lua_tables(source: &str) -> Vec<LuaTable<'_>> {
    let mut tables = Vec::new();
    let mut consumed_to = 0;

    for caps in TABLE_START_RE.captures_iter(source) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };

        let open = whole.end() - 1;
        if open < consumed_to || in_non_code(source, whole.start()) {
            continue;
        }

        let (end, terminated) = match find_matching_brace(source, open) {
            Some(close) => (close + 1, true),
            None => (source.len(), false),
        };

        tables.push(LuaTable {
            name: name.as_str().to_string(),
            body: &source[open..end],
            terminated,
        });
        consumed_to = end;
    }

    tables
}

/// Finds the `}` matching the `{` at byte offset `open`.
///
/// Returns `None` when `open` is not a `{` or the source ends first.
pub fn find_matching_brace(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return None;
    }

    let mut depth = 0usize;
    let mut i = open;

    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    None
}

/// Splits `text` on `sep` wherever it sits outside brackets, strings and
/// comments. Empty trailing pieces (from a trailing separator) are dropped.
pub fn split_top_level(text: &str, sep: u8) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        match bytes[i] {
            b'{' | b'(' | b'[' => depth += 1,
            b'}' | b')' | b']' => depth = depth.saturating_sub(1),
            b if b == sep && depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if !text[start..].trim().is_empty() {
        parts.push(&text[start..]);
    }

    parts
}

/// Yields the byte offset of every `{` in `text` that is real code.
pub fn code_braces(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if let Some(next) = skip_non_code(bytes, i) {
            i = next;
            continue;
        }
        if bytes[i] == b'{' {
            found.push(i);
        }
        i += 1;
    }

    found
}

/// If a string literal or comment starts at `i`, returns the offset just
/// past it. Unterminated constructs run to the end of input.
fn skip_non_code(bytes: &[u8], i: usize) -> Option<usize> {
    match bytes[i] {
        quote @ (b'\'' | b'"') => {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j] != quote {
                if bytes[j] == b'\\' {
                    j += 1;
                }
                j += 1;
            }
            Some((j + 1).min(bytes.len()))
        }
        b'-' if bytes.get(i + 1) == Some(&b'-') => {
            if let Some(end) = skip_long_bracket(bytes, i + 2) {
                return Some(end);
            }
            let mut j = i + 2;
            while j < bytes.len() && bytes[j] != b'\n' {
                j += 1;
            }
            Some(j)
        }
        b'[' => skip_long_bracket(bytes, i),
        _ => None,
    }
}

/// Skips a Lua long bracket (`[[ ... ]]`, `[==[ ... ]==]`) starting at `i`.
fn skip_long_bracket(bytes: &[u8], i: usize) -> Option<usize> {
    if bytes.get(i) != Some(&b'[') {
        return None;
    }
    let mut j = i + 1;
    let mut level = 0;
    while bytes.get(j) == Some(&b'=') {
        level += 1;
        j += 1;
    }
    if bytes.get(j) != Some(&b'[') {
        return None;
    }

    let mut closing = Vec::with_capacity(level + 2);
    closing.push(b']');
    closing.extend(std::iter::repeat_n(b'=', level));
    closing.push(b']');

    let body_start = j + 1;
    let end = bytes[body_start.min(bytes.len())..]
        .windows(closing.len())
        .position(|w| w == closing.as_slice())
        .map(|pos| body_start + pos + closing.len())
        .unwrap_or(bytes.len());

    Some(end)
}

/// True when byte offset `pos` lies inside a comment or string literal.
fn in_non_code(source: &str, pos: usize) -> bool {
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < pos && i < bytes.len() {
        match skip_non_code(bytes, i) {
            Some(next) if next > pos => return true,
            Some(next) => i = next,
            None => i += 1,
        }
    }
    false
}

// -- Field parsing -----------------------------------------------------------

/// Whitespace and `--` line comments
fn trivia(input: &str) -> IResult<&str, ()> {
    map(
        many0(alt((
            multispace1,
            recognize(pair(tag("--"), take_till(|c| c == '\n'))),
        ))),
        |_| (),
    )
    .parse(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))
    .parse(input)
}

/// Single- or double-quoted string literal, raw contents (escapes intact)
fn string_literal(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(
            char('\''),
            map(opt(escaped(none_of("\\'"), '\\', anychar)), |s| s.unwrap_or("")),
            char('\''),
        ),
        delimited(
            char('"'),
            map(opt(escaped(none_of("\\\""), '\\', anychar)), |s| s.unwrap_or("")),
            char('"'),
        ),
    ))
    .parse(input)
}

/// Resolves the common Lua escapes in a string literal body.
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Parses one `name = value` table field.
///
/// Leading whitespace and comments are skipped. A value that is a lone
/// string literal (optionally followed by a comment) becomes
/// `LuaValue::Str`; anything else is kept verbatim as `LuaValue::Expr`.
/// Positional fields without `name =` are rejected.
pub fn parse_field(input: &str) -> IResult<&str, (&str, LuaValue)> {
    let (input, _) = trivia(input)?;
    let (input, name) = identifier(input)?;
    let (input, _) = (trivia, char('='), trivia).parse(input)?;

    let string_value = (string_literal, trivia).parse(input);
    if let Ok((rest, (raw, _))) = string_value {
        if rest.trim().is_empty() {
            return Ok(("", (name, LuaValue::Str(unescape(raw)))));
        }
    }

    Ok(("", (name, LuaValue::Expr(strip_trailing_comment(input).trim().to_string()))))
}

/// Drops a trailing `--` comment that is outside any string literal.
fn strip_trailing_comment(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'-' && bytes.get(i + 1) == Some(&b'-') {
            return &text[..i];
        }
        match skip_non_code(bytes, i) {
            Some(next) => i = next,
            None => i += 1,
        }
    }
    text
}
