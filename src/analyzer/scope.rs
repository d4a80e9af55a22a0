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

//! Scope management for the semantic analyzer.
//!
//! A scope represents a lexical region where symbols are defined.
//! Scopes are nested to support function bodies and statement blocks.

use super::symbol::SymbolId;
use std::collections::HashMap;

/// A scope in the symbol table.
#[derive(Debug, Clone, Default)]
pub struct Scope {
    /// Symbols defined in this scope.
    symbols: HashMap<String, SymbolId>,
}

impl Scope {
    /// Create a new empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a symbol in this scope.
    ///
    /// Returns the already present symbol if the name is taken.
    pub fn define(&mut self, name: &str, symbol: SymbolId) -> Result<(), SymbolId> {
        if let Some(existing) = self.symbols.get(name) {
            return Err(*existing);
        }
        self.symbols.insert(name.to_string(), symbol);
        Ok(())
    }

    /// Look up a symbol in this scope.
    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.symbols.get(name).copied()
    }

    /// Number of names defined here.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if nothing is defined here.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
