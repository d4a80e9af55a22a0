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

//! Function code generation.
//!
//! A call pushes its arguments, so on entry the first parameter sits
//! `params_frame_size` bytes above the stack pointer. The prologue saves
//! `$ra` and the caller's `$fp` below the arguments and points `$fp` at
//! the first parameter:
//!
//! ```text
//!   0($fp)                      parameter 1
//!  -4($fp)                      parameter 2 ...
//!  -params($fp)                 saved $ra
//!  -(params + 4)($fp)           saved $fp (control link)
//!  -(params + 8)($fp) and down  locals
//! ```
//!
//! The epilogue resets `$sp` to the old `$fp`, which also discards the
//! arguments.

use super::labels::LabelManager;
use super::mips::{directives, indexed, opcodes, registers, syscalls, Section};
use super::statements::StatementEmitter;
use super::CodeGenerator;
use super::EmitHelpers;
use crate::analyzer::symbol::WORD_SIZE;
use crate::analyzer::FunctionInfo;
use crate::ast::FnDecl;
use crate::error::CodegenError;

/// Extension trait for function code generation.
pub trait FunctionEmitter {
    /// Generate a whole function: prologue, body and epilogue.
    fn generate_function(&mut self, func: &FnDecl) -> Result<(), CodegenError>;

    /// Emit the entry label and frame setup.
    fn emit_prologue(&mut self, name: &str, info: &FunctionInfo);

    /// Emit the exit label, frame teardown and return.
    fn emit_epilogue(&mut self, name: &str, info: &FunctionInfo);
}

impl FunctionEmitter for CodeGenerator {
    fn generate_function(&mut self, func: &FnDecl) -> Result<(), CodegenError> {
        let name = func.id.name.as_str();
        let info = match self.symbol_of(&func.id).function_info() {
            Some(info) => info.clone(),
            None => panic!("function '{}' is not linked to a function symbol", name),
        };
        log::debug!(
            "generating function {} (params {} bytes, locals {} bytes)",
            name,
            info.params_frame_size,
            info.locals_frame_size
        );

        self.current_exit = self.exit_label(name);
        self.emit_prologue(name, &info);

        debug_assert_eq!(self.stack_depth, 0, "operand stack must be empty at function entry");
        self.generate_block(&func.body)?;

        self.emit_epilogue(name, &info);
        Ok(())
    }

    fn emit_prologue(&mut self, name: &str, info: &FunctionInfo) {
        let label = self.function_label(name);

        self.emit_section(Section::Text);
        if self.ctx.is_entry_point(name) {
            self.emit_op(directives::GLOBL, &[&label]);
        }
        self.emit_comment("FUNCTION ENTRY");
        self.define_label(&label);

        self.emit_store_word(registers::RA);
        self.emit_store_word(registers::FP);
        self.emit_op_commented(
            opcodes::ADDU,
            &[
                registers::FP,
                registers::SP,
                &(info.params_frame_size + 2 * WORD_SIZE).to_string(),
            ],
            "set the FP",
        );
        if info.locals_frame_size > 0 {
            self.emit_op_commented(
                opcodes::SUBU,
                &[registers::SP, registers::SP, &info.locals_frame_size.to_string()],
                "push space for locals",
            );
        }
    }

    fn emit_epilogue(&mut self, name: &str, info: &FunctionInfo) {
        let exit = self.current_exit.clone();
        let params = info.params_frame_size;

        self.emit_comment("FUNCTION EXIT");
        self.define_label(&exit);
        self.emit_op_commented(
            opcodes::LW,
            &[registers::RA, &indexed(-params, registers::FP)],
            "load return address",
        );
        self.emit_op_commented(
            opcodes::MOVE,
            &[registers::T0, registers::FP],
            "save control link",
        );
        self.emit_op_commented(
            opcodes::LW,
            &[registers::FP, &indexed(-(params + WORD_SIZE), registers::FP)],
            "restore FP",
        );
        self.emit_op_commented(opcodes::MOVE, &[registers::SP, registers::T0], "restore SP");

        if self.ctx.is_entry_point(name) {
            self.emit_op_commented(
                opcodes::LI,
                &[registers::V0, &syscalls::EXIT.to_string()],
                "load exit code for syscall",
            );
            self.emit_op_commented(opcodes::SYSCALL, &[], "only for main exit");
        } else {
            self.emit_op_commented(opcodes::JR, &[registers::RA], "return");
        }
    }
}
