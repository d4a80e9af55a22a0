// Carrot - A three-pass compiler backend for the Carrot teaching language
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Per-compilation state shared by the three passes.
//!
//! Everything that would otherwise be process-wide (the running frame
//! offset, the label counter and the string-literal pool) lives here, so
//! independent compilation units never interfere.

use crate::analyzer::symbol::{Symbol, SymbolArena, SymbolId};
use crate::CompileOptions;
use std::collections::HashMap;

/// Deduplicating pool of string literals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringPool {
    labels: HashMap<String, String>,
    entries: Vec<(String, String)>,
}

impl StringPool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// The label already minted for this literal text.
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.labels.get(text).map(String::as_str)
    }

    /// Record a freshly minted label for a literal.
    pub fn insert(&mut self, text: &str, label: String) {
        self.labels.insert(text.to_string(), label.clone());
        self.entries.push((label, text.to_string()));
    }

    /// `(label, text)` pairs in the order they were first used.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Number of distinct literals.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no literal was pooled.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// State of a single compilation unit.
#[derive(Debug, Clone, Default)]
pub struct CompilationContext {
    /// Every symbol created by name resolution.
    pub symbols: SymbolArena,
    /// Running frame offset used while resolving a function.
    pub frame_offset: i32,
    /// Pooled string literals.
    pub strings: StringPool,
    /// Compiler options.
    pub options: CompileOptions,
    label_counter: usize,
}

impl CompilationContext {
    /// Create a context with the given options.
    pub fn new(options: CompileOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Mint a label that is unique within this compilation unit.
    pub fn next_label(&mut self) -> String {
        let label = format!(".L{}", self.label_counter);
        self.label_counter += 1;
        label
    }

    /// Get a symbol by handle.
    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id]
    }

    /// Check if the name is the configured entry point.
    pub fn is_entry_point(&self, name: &str) -> bool {
        name == self.options.entry_point
    }
}
