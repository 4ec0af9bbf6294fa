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

//! src/core/mod.rs
//!
//! Core analysis logic
//!
//! This module contains the fundamental data structures and algorithms
//! for cross-tool keybinding analysis, including:
//! - Type definitions for keybindings, key combinations and conflicts
//! - Key notation normalisation for every supported tool
//! - Conflict detection using HashMap-based O(1) lookup
//!
//! All logic here is pure: no file, process or terminal I/O, so it can be
//! tested exhaustively without any of the tools installed.

pub mod conflict;
pub mod normalize;
pub mod types;

pub use conflict::{detect, ConflictDetector};
pub use normalize::normalize;
pub use types::*;

#[cfg(test)]
mod tests;
