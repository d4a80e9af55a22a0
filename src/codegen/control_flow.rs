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

//! Control flow code generation.
//!
//! This module provides code generation for:
//! - If statements (with and without else)
//! - While loops
//! - Repeat loops, whose counter stays on the operand stack

use super::expressions::ExpressionEmitter;
use super::labels::LabelManager;
use super::mips::{encodings, indexed, opcodes, registers};
use super::statements::StatementEmitter;
use super::CodeGenerator;
use super::EmitHelpers;
use crate::analyzer::symbol::WORD_SIZE;
use crate::ast::{Block, Expr};
use crate::error::CodegenError;

/// Extension trait for control flow code generation.
pub trait ControlFlowEmitter {
    /// Evaluate a condition and branch to `label` when it is false.
    fn generate_branch_if_false(&mut self, cond: &Expr, label: &str) -> Result<(), CodegenError>;

    /// Generate an if statement without else.
    fn generate_if(&mut self, cond: &Expr, body: &Block) -> Result<(), CodegenError>;

    /// Generate an if statement with an else branch.
    fn generate_if_else(
        &mut self,
        cond: &Expr,
        then_body: &Block,
        else_body: &Block,
    ) -> Result<(), CodegenError>;

    /// Generate a while loop.
    fn generate_while(&mut self, cond: &Expr, body: &Block) -> Result<(), CodegenError>;

    /// Generate a repeat loop running `count` times.
    fn generate_repeat(&mut self, count: &Expr, body: &Block) -> Result<(), CodegenError>;
}

impl ControlFlowEmitter for CodeGenerator {
    fn generate_branch_if_false(&mut self, cond: &Expr, label: &str) -> Result<(), CodegenError> {
        self.generate_expr(cond)?;
        self.pop(registers::T0);
        self.emit_branch_if_equal(registers::T0, encodings::FALSE, label);
        Ok(())
    }

    fn generate_if(&mut self, cond: &Expr, body: &Block) -> Result<(), CodegenError> {
        self.emit_comment("IF STMT");
        let false_label = self.make_label();

        self.generate_branch_if_false(cond, &false_label)?;
        self.generate_block(body)?;
        self.define_label(&false_label);
        Ok(())
    }

    fn generate_if_else(
        &mut self,
        cond: &Expr,
        then_body: &Block,
        else_body: &Block,
    ) -> Result<(), CodegenError> {
        self.emit_comment("IF ELSE STMT");
        let else_label = self.make_label();
        let done_label = self.make_label();

        self.generate_branch_if_false(cond, &else_label)?;
        self.generate_block(then_body)?;
        self.emit_branch(&done_label);
        self.define_label(&else_label);
        self.generate_block(else_body)?;
        self.define_label(&done_label);
        Ok(())
    }

    fn generate_while(&mut self, cond: &Expr, body: &Block) -> Result<(), CodegenError> {
        self.emit_comment("WHILE STMT");
        let loop_label = self.make_label();
        let done_label = self.make_label();

        self.define_label(&loop_label);
        self.generate_branch_if_false(cond, &done_label)?;
        self.generate_block(body)?;
        self.emit_branch(&loop_label);
        self.define_label(&done_label);
        Ok(())
    }

    fn generate_repeat(&mut self, count: &Expr, body: &Block) -> Result<(), CodegenError> {
        self.emit_comment("REPEAT STMT");
        let loop_label = self.make_label();
        let done_label = self.make_label();
        let counter = indexed(WORD_SIZE, registers::SP);

        // The remaining count is the top operand while the body runs.
        self.generate_expr(count)?;
        self.define_label(&loop_label);
        self.emit_op(opcodes::LW, &[registers::T0, &counter]);
        self.emit_op(opcodes::BLE, &[registers::T0, "0", &done_label]);
        self.emit_op(opcodes::SUB, &[registers::T0, registers::T0, "1"]);
        self.emit_op(opcodes::SW, &[registers::T0, &counter]);
        self.generate_block(body)?;
        self.emit_branch(&loop_label);
        self.define_label(&done_label);
        self.pop(registers::T0);
        Ok(())
    }
}
