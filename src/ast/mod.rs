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

//! Abstract Syntax Tree (AST) definitions for the Carrot compiler.
//!
//! The tree is built by an external parser. The passes only ever change the
//! symbol links of identifier nodes.

mod decl;
mod expr;
mod stmt;

pub use decl::*;
pub use expr::*;
pub use stmt::*;

/// A complete Carrot compilation unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    /// Top-level declarations in source order.
    pub decls: Vec<Decl>,
}

impl Program {
    /// Create a new empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a program from its declarations.
    pub fn with_decls(decls: Vec<Decl>) -> Self {
        Self { decls }
    }

    /// Add a top-level declaration.
    pub fn add_decl(&mut self, decl: Decl) {
        self.decls.push(decl);
    }

    /// Find a function definition by name.
    pub fn function(&self, name: &str) -> Option<&FnDecl> {
        self.decls.iter().find_map(|decl| match decl {
            Decl::Fn(func) if func.id.name == name => Some(func),
            _ => None,
        })
    }
}

impl std::fmt::Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, decl) in self.decls.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", decl)?;
        }
        Ok(())
    }
}
