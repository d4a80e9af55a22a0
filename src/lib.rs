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

//! Carrot Compiler Library
//!
//! This library provides the back half of the Carrot compiler: it takes a
//! parsed program and lowers it to MIPS assembly for a stack machine.
//!
//! # Modules
//!
//! - [`error`] - Diagnostics, error codes and error reporting
//! - [`ast`] - Abstract Syntax Tree definitions
//! - [`types`] - The type model
//! - [`context`] - Per-compilation state shared by the passes
//! - [`analyzer`] - Name resolution and type checking
//! - [`codegen`] - MIPS code generation
//!
//! # Example
//!
//! ```
//! use carrot::ast::{Block, Decl, Expr, FnDecl, Program, Stmt, TypeNode};
//! use carrot::error::SourcePos;
//! use carrot::CompileOptions;
//!
//! let pos = SourcePos::new(1, 1);
//! let mut program = Program::with_decls(vec![Decl::Fn(FnDecl::new(
//!     TypeNode::Void,
//!     "main",
//!     pos,
//!     vec![],
//!     Block::of(vec![Stmt::Write(Expr::string("hello", pos))]),
//! ))]);
//!
//! let assembly = carrot::compile(&mut program, CompileOptions::default()).unwrap();
//! assert!(assembly.to_string().contains(".asciiz \"hello\""));
//! ```

pub mod analyzer;
pub mod ast;
pub mod codegen;
pub mod context;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use ast::Program;
pub use codegen::Assembly;
pub use context::CompilationContext;
pub use error::{
    format_diagnostic, CodegenError, CompileError, Diagnostic, DiagnosticSink, Diagnostics,
    ErrorCode, Result, SourcePos,
};
pub use types::Type;

/// The version of the Carrot compiler.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The name of the compiler.
pub const NAME: &str = "Carrot";

/// Options controlling a compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Emit `#` annotation lines and trailing comments into the assembly.
    pub emit_comments: bool,
    /// Name of the function the program starts in.
    pub entry_point: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            emit_comments: true,
            entry_point: "main".to_string(),
        }
    }
}

/// Compile an already parsed program to assembly.
///
/// This is the main entry point of the library. It runs name resolution
/// and type checking, and generates code only if neither pass reported a
/// diagnostic.
///
/// Resolution links the identifiers of `program` to their symbols, so the
/// tree is mutated even when compilation fails.
///
/// # Example
///
/// ```
/// use carrot::ast::{Block, Decl, Expr, FnDecl, Program, Stmt, TypeNode};
/// use carrot::error::SourcePos;
/// use carrot::{CompileOptions, ErrorCode};
///
/// let pos = SourcePos::new(2, 13);
/// let mut program = Program::with_decls(vec![Decl::Fn(FnDecl::new(
///     TypeNode::Void,
///     "main",
///     SourcePos::new(1, 6),
///     vec![],
///     Block::of(vec![Stmt::Write(Expr::id("missing", pos))]),
/// ))]);
///
/// let err = carrot::compile(&mut program, CompileOptions::default()).unwrap_err();
/// let codes = err.diagnostics().map(|d| d.codes()).unwrap_or_default();
/// assert_eq!(codes, vec![ErrorCode::UndeclaredIdentifier]);
/// ```
pub fn compile(
    program: &mut Program,
    options: CompileOptions,
) -> std::result::Result<Assembly, CompileError> {
    let mut ctx = CompilationContext::new(options);
    let mut diagnostics = Diagnostics::new();

    analyzer::analyze(program, &mut ctx, &mut diagnostics);
    if diagnostics.has_errors() {
        log::debug!("analysis reported {} diagnostic(s)", diagnostics.len());
        return Err(CompileError::Semantic(diagnostics));
    }

    Ok(codegen::generate(program, ctx)?)
}
