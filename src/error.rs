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

//! Error and diagnostic types for the Carrot compiler.
//!
//! Semantic problems in the user's program are *diagnostics*: they are
//! reported through a [`DiagnosticSink`] and never abort a pass. Errors that
//! stop compilation altogether are collected into [`CompileError`].

use std::fmt;
use thiserror::Error;

/// A position in the source code (1-indexed line and column).
///
/// Program-level diagnostics, such as a missing entry point, use
/// [`SourcePos::NONE`] (line 0, column 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SourcePos {
    /// Line number (1-indexed, 0 for "no position").
    pub line: usize,
    /// Column number (1-indexed, 0 for "no position").
    pub column: usize,
}

impl SourcePos {
    /// Position used for diagnostics that are not tied to a node.
    pub const NONE: SourcePos = SourcePos { line: 0, column: 0 };

    /// Create a new source position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Error codes for semantic diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Name resolution (E200-E206)
    UndeclaredIdentifier,
    MultiplyDeclared,
    NonFunctionVoid,
    InvalidStructType,
    DotAccessNonStruct,
    InvalidStructField,
    NoMainFunction,

    // Operators (E210-E220)
    ArithmeticOperand,
    LogicalOperand,
    RelationalOperand,
    EqualityVoidFunctions,
    EqualityFunctions,
    EqualityStructNames,
    EqualityStructVariables,
    TypeMismatch,
    FunctionAssignment,
    StructNameAssignment,
    StructVariableAssignment,

    // Calls (E221-E223)
    CallNonFunction,
    WrongNumberOfArgs,
    ActualFormalMismatch,

    // Statements (E224-E236)
    NonBoolIfCondition,
    NonBoolWhileCondition,
    NonIntRepeatClause,
    ReadFunction,
    ReadStructName,
    ReadStructVariable,
    WriteFunction,
    WriteStructName,
    WriteStructVariable,
    WriteVoid,
    ReturnValueInVoid,
    BadReturnValue,
    MissingReturnValue,
}

impl ErrorCode {
    /// Every error code, in code order.
    pub const ALL: &'static [ErrorCode] = &[
        ErrorCode::UndeclaredIdentifier,
        ErrorCode::MultiplyDeclared,
        ErrorCode::NonFunctionVoid,
        ErrorCode::InvalidStructType,
        ErrorCode::DotAccessNonStruct,
        ErrorCode::InvalidStructField,
        ErrorCode::NoMainFunction,
        ErrorCode::ArithmeticOperand,
        ErrorCode::LogicalOperand,
        ErrorCode::RelationalOperand,
        ErrorCode::EqualityVoidFunctions,
        ErrorCode::EqualityFunctions,
        ErrorCode::EqualityStructNames,
        ErrorCode::EqualityStructVariables,
        ErrorCode::TypeMismatch,
        ErrorCode::FunctionAssignment,
        ErrorCode::StructNameAssignment,
        ErrorCode::StructVariableAssignment,
        ErrorCode::CallNonFunction,
        ErrorCode::WrongNumberOfArgs,
        ErrorCode::ActualFormalMismatch,
        ErrorCode::NonBoolIfCondition,
        ErrorCode::NonBoolWhileCondition,
        ErrorCode::NonIntRepeatClause,
        ErrorCode::ReadFunction,
        ErrorCode::ReadStructName,
        ErrorCode::ReadStructVariable,
        ErrorCode::WriteFunction,
        ErrorCode::WriteStructName,
        ErrorCode::WriteStructVariable,
        ErrorCode::WriteVoid,
        ErrorCode::ReturnValueInVoid,
        ErrorCode::BadReturnValue,
        ErrorCode::MissingReturnValue,
    ];

    /// Get the numeric code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::UndeclaredIdentifier => "E200",
            ErrorCode::MultiplyDeclared => "E201",
            ErrorCode::NonFunctionVoid => "E202",
            ErrorCode::InvalidStructType => "E203",
            ErrorCode::DotAccessNonStruct => "E204",
            ErrorCode::InvalidStructField => "E205",
            ErrorCode::NoMainFunction => "E206",

            ErrorCode::ArithmeticOperand => "E210",
            ErrorCode::LogicalOperand => "E211",
            ErrorCode::RelationalOperand => "E212",
            ErrorCode::EqualityVoidFunctions => "E213",
            ErrorCode::EqualityFunctions => "E214",
            ErrorCode::EqualityStructNames => "E215",
            ErrorCode::EqualityStructVariables => "E216",
            ErrorCode::TypeMismatch => "E217",
            ErrorCode::FunctionAssignment => "E218",
            ErrorCode::StructNameAssignment => "E219",
            ErrorCode::StructVariableAssignment => "E220",

            ErrorCode::CallNonFunction => "E221",
            ErrorCode::WrongNumberOfArgs => "E222",
            ErrorCode::ActualFormalMismatch => "E223",

            ErrorCode::NonBoolIfCondition => "E224",
            ErrorCode::NonBoolWhileCondition => "E225",
            ErrorCode::NonIntRepeatClause => "E226",
            ErrorCode::ReadFunction => "E227",
            ErrorCode::ReadStructName => "E228",
            ErrorCode::ReadStructVariable => "E229",
            ErrorCode::WriteFunction => "E230",
            ErrorCode::WriteStructName => "E231",
            ErrorCode::WriteStructVariable => "E232",
            ErrorCode::WriteVoid => "E233",
            ErrorCode::ReturnValueInVoid => "E234",
            ErrorCode::BadReturnValue => "E235",
            ErrorCode::MissingReturnValue => "E236",
        }
    }

    /// The message reported to the diagnostic sink.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::UndeclaredIdentifier => "Undeclared identifier",
            ErrorCode::MultiplyDeclared => "Multiply declared identifier",
            ErrorCode::NonFunctionVoid => "Non-function declared void",
            ErrorCode::InvalidStructType => "Invalid name of struct type",
            ErrorCode::DotAccessNonStruct => "Dot-access of non-struct type",
            ErrorCode::InvalidStructField => "Invalid struct field name",
            ErrorCode::NoMainFunction => "No main function",

            ErrorCode::ArithmeticOperand => "Arithmetic operator applied to non-numeric operand",
            ErrorCode::LogicalOperand => "Logical operator applied to non-bool operand",
            ErrorCode::RelationalOperand => "Relational operator applied to non-numeric operand",
            ErrorCode::EqualityVoidFunctions => "Equality operator applied to void functions",
            ErrorCode::EqualityFunctions => "Equality operator applied to functions",
            ErrorCode::EqualityStructNames => "Equality operator applied to struct names",
            ErrorCode::EqualityStructVariables => "Equality operator applied to struct variables",
            ErrorCode::TypeMismatch => "Type mismatch",
            ErrorCode::FunctionAssignment => "Function assignment",
            ErrorCode::StructNameAssignment => "Struct name assignment",
            ErrorCode::StructVariableAssignment => "Struct variable assignment",

            ErrorCode::CallNonFunction => "Attempt to call a non-function",
            ErrorCode::WrongNumberOfArgs => "Function call with wrong number of args",
            ErrorCode::ActualFormalMismatch => "Type of actual does not match type of formal",

            ErrorCode::NonBoolIfCondition => "Non-bool expression used as an if condition",
            ErrorCode::NonBoolWhileCondition => "Non-bool expression used as a while condition",
            ErrorCode::NonIntRepeatClause => "Non-integer expression used as a repeat clause",
            ErrorCode::ReadFunction => "Attempt to read a function",
            ErrorCode::ReadStructName => "Attempt to read a struct name",
            ErrorCode::ReadStructVariable => "Attempt to read a struct variable",
            ErrorCode::WriteFunction => "Attempt to write a function",
            ErrorCode::WriteStructName => "Attempt to write a struct name",
            ErrorCode::WriteStructVariable => "Attempt to write a struct variable",
            ErrorCode::WriteVoid => "Attempt to write void",
            ErrorCode::ReturnValueInVoid => "Return with a value in a void function",
            ErrorCode::BadReturnValue => "Bad return value",
            ErrorCode::MissingReturnValue => "Missing return value",
        }
    }

    /// Recover the error code from a reported message.
    pub fn from_message(message: &str) -> Option<ErrorCode> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.message() == message)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Receiver of semantic diagnostics.
///
/// Reports arrive in source traversal order. The sink never influences the
/// passes; it is an append-only destination.
pub trait DiagnosticSink {
    /// Report a diagnostic at the given line and column.
    fn report(&mut self, line: usize, column: usize, message: &str);
}

/// A single reported diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where the diagnostic was reported.
    pub pos: SourcePos,
    /// The reported message.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic from an error code.
    pub fn new(code: ErrorCode, pos: SourcePos) -> Self {
        Self {
            pos,
            message: code.message().to_string(),
        }
    }

    /// The error code matching this diagnostic's message, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        ErrorCode::from_message(&self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ***ERROR*** {}", self.pos, self.message)
    }
}

/// A collection of diagnostics; the default sink.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Get the number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get an iterator over the diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    /// The error codes of all diagnostics, in report order.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.diagnostics.iter().filter_map(Diagnostic::code).collect()
    }

    /// Convert into a vector of diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for Diagnostics {
    fn report(&mut self, line: usize, column: usize, message: &str) {
        log::trace!("diagnostic at {}:{}: {}", line, column, message);
        self.diagnostics.push(Diagnostic {
            pos: SourcePos::new(line, column),
            message: message.to_string(),
        });
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{}", diagnostic)?;
        }
        Ok(())
    }
}

/// Errors raised while lowering an analyzed program to instructions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// The construct has no lowering in the stack-machine target.
    #[error("{construct} at {pos} is not supported by the code generator")]
    Unsupported {
        /// What could not be lowered.
        construct: &'static str,
        /// Where it appears.
        pos: SourcePos,
    },
}

/// Misuse of the symbol table. These are contract violations, not user errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SymbolTableError {
    /// A name was inserted twice into the same scope.
    #[error("symbol '{0}' is already declared in this scope")]
    DuplicateSymbol(String),
    /// An operation needed a scope but only the global scope (or none) was left.
    #[error("no scope left to remove")]
    EmptySymbolTable,
}

/// A failed compilation.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Analysis reported one or more diagnostics.
    #[error("compilation failed with {} diagnostic(s)", .0.len())]
    Semantic(Diagnostics),
    /// Code generation could not lower the program.
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

impl CompileError {
    /// The diagnostics behind a semantic failure.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            CompileError::Semantic(diagnostics) => Some(diagnostics),
            CompileError::Codegen(_) => None,
        }
    }
}

/// Result type for compiler operations.
pub type Result<T> = std::result::Result<T, CompileError>;

/// Format a diagnostic with source context.
pub fn format_diagnostic(diagnostic: &Diagnostic, source: &str, filename: Option<&str>) -> String {
    let filename = filename.unwrap_or("<input>");
    let mut output = String::new();

    match diagnostic.code() {
        Some(code) => output.push_str(&format!("error[{}]: {}\n", code, diagnostic.message)),
        None => output.push_str(&format!("error: {}\n", diagnostic.message)),
    }

    if diagnostic.pos == SourcePos::NONE {
        output.push_str(&format!("  --> {}\n", filename));
        return output;
    }

    output.push_str(&format!(
        "  --> {}:{}:{}\n",
        filename, diagnostic.pos.line, diagnostic.pos.column
    ));

    let line_content = source
        .lines()
        .nth(diagnostic.pos.line.saturating_sub(1))
        .unwrap_or("");

    let line_num_width = diagnostic.pos.line.to_string().len();
    output.push_str(&format!("{:>width$} |\n", "", width = line_num_width));
    output.push_str(&format!(
        "{:>width$} | {}\n",
        diagnostic.pos.line,
        line_content,
        width = line_num_width
    ));
    output.push_str(&format!(
        "{:>width$} | {:>start$}^\n",
        "",
        "",
        width = line_num_width,
        start = diagnostic.pos.column.saturating_sub(1)
    ));

    output
}
