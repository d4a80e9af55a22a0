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

//! Emit helper methods for code generation.
//!
//! This module provides the low-level emission utilities every other
//! generator module builds on:
//! - Plain and commented operations
//! - Section switches and comment lines
//! - Operand-stack push and pop with depth tracking

use super::mips::{indexed, opcodes, registers, Instruction, Op, Section};
use super::CodeGenerator;
use crate::analyzer::symbol::WORD_SIZE;

/// Extension trait for low-level instruction emission.
pub trait EmitHelpers {
    /// Append an instruction to the stream.
    fn emit(&mut self, instruction: Instruction);

    /// Emit an operation.
    fn emit_op(&mut self, opcode: &'static str, operands: &[&str]);

    /// Emit an operation with a trailing comment (dropped when comments are off).
    fn emit_op_commented(&mut self, opcode: &'static str, operands: &[&str], comment: &str);

    /// Emit a whole-line comment (dropped when comments are off).
    fn emit_comment(&mut self, text: &str);

    /// Switch to the text or data region.
    fn emit_section(&mut self, section: Section);

    /// Store a register below the stack pointer and move the stack pointer
    /// down one word, without counting it as an operand.
    fn emit_store_word(&mut self, register: &str);

    /// Push a register onto the operand stack.
    fn push(&mut self, register: &str);

    /// Pop the top of the operand stack into a register.
    ///
    /// # Panics
    ///
    /// Panics if the operand stack is empty.
    fn pop(&mut self, register: &str);

    /// Forget `words` operands that were removed by other means (a callee
    /// discarding its arguments).
    fn release(&mut self, words: usize);

    /// Emit an unconditional branch.
    fn emit_branch(&mut self, label: &str);

    /// Emit a branch taken when `register` equals `value`.
    fn emit_branch_if_equal(&mut self, register: &str, value: i32, label: &str);
}

impl EmitHelpers for CodeGenerator {
    fn emit(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    fn emit_op(&mut self, opcode: &'static str, operands: &[&str]) {
        self.emit(Instruction::Op(Op::new(opcode, operands)));
    }

    fn emit_op_commented(&mut self, opcode: &'static str, operands: &[&str], comment: &str) {
        let mut op = Op::new(opcode, operands);
        if self.ctx.options.emit_comments {
            op = op.with_comment(comment);
        }
        self.emit(Instruction::Op(op));
    }

    fn emit_comment(&mut self, text: &str) {
        if self.ctx.options.emit_comments {
            self.emit(Instruction::Comment(text.to_string()));
        }
    }

    fn emit_section(&mut self, section: Section) {
        self.emit(Instruction::Section(section));
    }

    fn emit_store_word(&mut self, register: &str) {
        let word = WORD_SIZE.to_string();
        self.emit_op(opcodes::SW, &[register, &indexed(0, registers::SP)]);
        self.emit_op(opcodes::SUBU, &[registers::SP, registers::SP, &word]);
    }

    fn push(&mut self, register: &str) {
        self.emit_store_word(register);
        self.stack_depth += 1;
        self.max_stack_depth = self.max_stack_depth.max(self.stack_depth);
    }

    fn pop(&mut self, register: &str) {
        assert!(self.stack_depth > 0, "operand stack underflow");
        let word = WORD_SIZE.to_string();
        self.emit_op(opcodes::LW, &[register, &indexed(WORD_SIZE, registers::SP)]);
        self.emit_op(opcodes::ADDU, &[registers::SP, registers::SP, &word]);
        self.stack_depth -= 1;
    }

    fn release(&mut self, words: usize) {
        assert!(self.stack_depth >= words, "operand stack underflow");
        self.stack_depth -= words;
    }

    fn emit_branch(&mut self, label: &str) {
        self.emit_op(opcodes::B, &[label]);
    }

    fn emit_branch_if_equal(&mut self, register: &str, value: i32, label: &str) {
        self.emit_op(opcodes::BEQ, &[register, &value.to_string(), label]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::tests::quiet;
    use crate::context::CompilationContext;
    use crate::CompileOptions;

    fn lines(codegen: &CodeGenerator) -> Vec<String> {
        codegen.instructions().iter().map(|i| i.to_string()).collect()
    }

    #[test]
    fn test_push_and_pop() {
        let mut codegen = CodeGenerator::new(CompilationContext::new(quiet()));
        codegen.push(registers::T0);
        codegen.push(registers::T1);
        assert_eq!(codegen.stack_depth(), 2);
        codegen.pop(registers::A0);
        assert_eq!(codegen.stack_depth(), 1);

        assert_eq!(
            lines(&codegen),
            vec![
                "    sw     $t0, 0($sp)",
                "    subu   $sp, $sp, 4",
                "    sw     $t1, 0($sp)",
                "    subu   $sp, $sp, 4",
                "    lw     $a0, 4($sp)",
                "    addu   $sp, $sp, 4",
            ]
        );
        assert_eq!(codegen.max_stack_depth, 2);
    }

    #[test]
    #[should_panic(expected = "operand stack underflow")]
    fn test_pop_on_empty_stack_panics() {
        let mut codegen = CodeGenerator::new(CompilationContext::default());
        codegen.pop(registers::T0);
    }

    #[test]
    fn test_store_word_is_not_an_operand() {
        let mut codegen = CodeGenerator::new(CompilationContext::default());
        codegen.emit_store_word(registers::RA);
        assert_eq!(codegen.stack_depth(), 0);
        assert_eq!(codegen.instructions().len(), 2);
    }

    #[test]
    fn test_comments_follow_options() {
        let mut loud = CodeGenerator::new(CompilationContext::new(CompileOptions::default()));
        loud.emit_comment("WRITE");
        loud.emit_op_commented(opcodes::LI, &[registers::T0, "1"], "load value into T0");
        assert_eq!(
            lines(&loud),
            vec!["    # WRITE", "    li     $t0, 1  # load value into T0"]
        );

        let mut silent = CodeGenerator::new(CompilationContext::new(quiet()));
        silent.emit_comment("WRITE");
        silent.emit_op_commented(opcodes::LI, &[registers::T0, "1"], "load value into T0");
        assert_eq!(lines(&silent), vec!["    li     $t0, 1"]);
    }

    #[test]
    fn test_branches() {
        let mut codegen = CodeGenerator::new(CompilationContext::default());
        codegen.emit_branch(".L3");
        codegen.emit_branch_if_equal(registers::T0, 0, ".L4");
        assert_eq!(lines(&codegen), vec!["    b      .L3", "    beq    $t0, 0, .L4"]);
    }
}
