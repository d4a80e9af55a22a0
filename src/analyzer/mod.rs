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

//! Semantic analyzer module for the Carrot compiler.
//!
//! Analysis runs two independent passes over the tree:
//! - name resolution ([`resolve`]), which links identifiers and lays out frames;
//! - type checking ([`type_check`]), which validates every expression and statement.
//!
//! Both report problems through a [`DiagnosticSink`] and never stop early.

pub mod operators;
pub mod resolve;
pub mod scope;
pub mod symbol;
pub mod symbol_table;
pub mod type_check;

pub use operators::OperatorChecker;
pub use resolve::{resolve_names, NameResolver};
pub use symbol::{FunctionInfo, Symbol, SymbolArena, SymbolId, SymbolKind};
pub use symbol_table::SymbolTable;
pub use type_check::TypeChecker;

use crate::ast::{Decl, Ident, Program};
use crate::context::CompilationContext;
use crate::error::{DiagnosticSink, ErrorCode, SourcePos};
use crate::types::Type;

/// The type-checking pass.
///
/// Reads the symbol links left by name resolution; never changes the
/// symbol table or the tree.
pub struct Analyzer<'a> {
    ctx: &'a CompilationContext,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> Analyzer<'a> {
    /// Create a new type checker.
    pub fn new(ctx: &'a CompilationContext, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self { ctx, sink }
    }

    /// Type check every function body of a resolved program.
    pub fn check_program(&mut self, program: &Program) {
        log::debug!("type checking {} declaration(s)", program.decls.len());
        for decl in &program.decls {
            if let Decl::Fn(func) = decl {
                self.check_function(func);
            }
        }
        log::debug!("type checking done");
    }

    pub(crate) fn report(&mut self, code: ErrorCode, pos: SourcePos) {
        self.sink.report(pos.line, pos.column, code.message());
    }

    /// The type of an identifier occurrence. Unresolved names are `Error`.
    pub(crate) fn ident_type(&self, id: &Ident) -> Type {
        match id.symbol() {
            Some(symbol) => self.ctx.symbol(symbol).ty.clone(),
            None => Type::Error,
        }
    }
}

/// Run type checking over a resolved program.
pub fn type_check(program: &Program, ctx: &CompilationContext, sink: &mut dyn DiagnosticSink) {
    Analyzer::new(ctx, sink).check_program(program);
}

/// Run both analysis passes.
///
/// Type checking runs even after resolution problems; unresolved names
/// type as `Error` and stay quiet.
pub fn analyze(
    program: &mut Program,
    ctx: &mut CompilationContext,
    sink: &mut dyn DiagnosticSink,
) -> SymbolTable {
    let table = resolve_names(program, ctx, sink);
    type_check(program, ctx, sink);
    table
}
