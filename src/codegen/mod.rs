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

//! Code generation module for the Carrot compiler.
//!
//! This module lowers an analyzed program to MIPS assembly for a stack
//! machine. It handles:
//! - Frame layout (prologue and epilogue)
//! - Operand-stack evaluation of expressions
//! - Control flow and short-circuit logic
//! - Global storage and the string-literal pool
//!
//! Every expression leaves exactly one word on the operand stack and
//! every statement leaves the stack as it found it. The generator tracks
//! the depth of the operand stack to check this in debug builds.

pub mod mips;

mod control_flow;
mod emit;
mod expressions;
mod functions;
mod labels;
mod statements;
mod strings;
mod type_inference;
mod variables;

pub use control_flow::ControlFlowEmitter;
pub use emit::EmitHelpers;
pub use expressions::ExpressionEmitter;
pub use functions::FunctionEmitter;
pub use labels::LabelManager;
pub use statements::StatementEmitter;
pub use strings::StringManager;
pub use type_inference::TypeInference;
pub use variables::{Location, VariableManager};

use crate::analyzer::Symbol;
use crate::ast::{Decl, Ident, Program};
use crate::context::CompilationContext;
use crate::error::CodegenError;
use mips::Instruction;
use std::fmt;

/// The code generator for the stack machine.
pub struct CodeGenerator {
    /// Per-compilation state left by analysis.
    ctx: CompilationContext,
    /// The generated instruction stream.
    instructions: Vec<Instruction>,
    /// Words currently on the operand stack.
    stack_depth: usize,
    /// Deepest operand stack seen so far.
    max_stack_depth: usize,
    /// Exit label of the function being generated.
    current_exit: String,
}

impl CodeGenerator {
    /// Create a generator over an analyzed compilation context.
    pub fn new(ctx: CompilationContext) -> Self {
        Self {
            ctx,
            instructions: Vec::new(),
            stack_depth: 0,
            max_stack_depth: 0,
            current_exit: String::new(),
        }
    }

    /// The compilation context.
    pub fn context(&self) -> &CompilationContext {
        &self.ctx
    }

    /// Instructions emitted so far.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Current operand stack depth in words.
    pub fn stack_depth(&self) -> usize {
        self.stack_depth
    }

    /// Generate code for a whole program.
    ///
    /// Declarations are lowered in source order. Struct declarations
    /// produce no code.
    pub fn generate(mut self, program: &Program) -> Result<Assembly, CodegenError> {
        log::debug!("generating code for {} declaration(s)", program.decls.len());

        for decl in &program.decls {
            match decl {
                Decl::Var(var) => self.generate_global(var),
                Decl::Fn(func) => self.generate_function(func)?,
                Decl::Struct(_) => {}
            }
        }

        log::debug!(
            "emitted {} instruction(s), max operand stack depth {}",
            self.instructions.len(),
            self.max_stack_depth
        );

        Ok(Assembly {
            instructions: self.instructions,
            strings: self.ctx.strings.entries().to_vec(),
            max_stack_depth: self.max_stack_depth,
        })
    }

    /// The symbol an identifier was linked to during name resolution.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is unresolved. Code generation only runs
    /// on programs that analyzed without diagnostics.
    pub(crate) fn symbol_of(&self, id: &Ident) -> &Symbol {
        match id.symbol() {
            Some(symbol) => self.ctx.symbol(symbol),
            None => panic!("identifier '{}' reached code generation unresolved", id.name),
        }
    }
}

/// Generate code for an analyzed program.
pub fn generate(program: &Program, ctx: CompilationContext) -> Result<Assembly, CodegenError> {
    CodeGenerator::new(ctx).generate(program)
}

/// A generated program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    /// Instructions in emission order.
    pub instructions: Vec<Instruction>,
    /// `(label, text)` of every pooled string literal.
    pub strings: Vec<(String, String)>,
    /// Deepest operand stack reached, in words.
    pub max_stack_depth: usize,
}

impl Assembly {
    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if nothing was emitted.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Every label defined in the stream, in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.instructions.iter().filter_map(Instruction::label)
    }

    /// Every operation with the given mnemonic, in order.
    pub fn ops<'a>(&'a self, opcode: &'a str) -> impl Iterator<Item = &'a mips::Op> + 'a {
        self.instructions
            .iter()
            .filter_map(Instruction::op)
            .filter(move |op| op.opcode == opcode)
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}
