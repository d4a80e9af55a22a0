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

//! Symbol table for the semantic analyzer.
//!
//! The symbol table manages a stack of scopes. The outermost scope is the
//! global scope and lives as long as the table.

use super::scope::Scope;
use super::symbol::SymbolId;
use crate::error::SymbolTableError;

/// A stack of scopes, innermost last.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// Create a new symbol table with a global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }

    /// Enter a new innermost scope.
    pub fn add_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Leave the innermost scope.
    ///
    /// The global scope can never be removed.
    pub fn remove_scope(&mut self) -> Result<(), SymbolTableError> {
        if self.scopes.len() <= 1 {
            return Err(SymbolTableError::EmptySymbolTable);
        }
        self.scopes.pop();
        Ok(())
    }

    /// Insert a declaration into the innermost scope.
    pub fn add_decl(&mut self, name: &str, symbol: SymbolId) -> Result<(), SymbolTableError> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or(SymbolTableError::EmptySymbolTable)?;
        scope
            .define(name, symbol)
            .map_err(|_| SymbolTableError::DuplicateSymbol(name.to_string()))
    }

    /// Look a name up in the innermost scope only.
    pub fn lookup_local(&self, name: &str) -> Option<SymbolId> {
        self.scopes.last().and_then(|scope| scope.lookup(name))
    }

    /// Look a name up from the innermost to the outermost scope.
    pub fn lookup_global(&self, name: &str) -> Option<SymbolId> {
        self.scopes.iter().rev().find_map(|scope| scope.lookup(name))
    }

    /// Check if only the global scope is active.
    pub fn is_global_scope(&self) -> bool {
        self.scopes.len() == 1
    }

    /// Get the current scope depth.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
