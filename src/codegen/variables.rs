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

//! Variable access for code generation.
//!
//! The sign of a symbol's resolved offset decides how it is addressed:
//! non-positive offsets are frame-relative locals and parameters, positive
//! offsets are globals addressed by label.

use super::labels::LabelManager;
use super::mips::{directives, indexed, opcodes, registers, Instruction, Op, Section};
use super::CodeGenerator;
use super::EmitHelpers;
use crate::analyzer::symbol::WORD_SIZE;
use crate::ast::{Ident, VarDecl};

/// Where a variable lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Frame-relative, at the given offset from `$fp`.
    Frame(i32),
    /// In the data region, under the given label.
    Global(String),
}

/// Extension trait for variable storage and access.
pub trait VariableManager {
    /// Where the variable behind `id` lives.
    fn location(&self, id: &Ident) -> Location;

    /// Reserve one aligned word of data for a global variable.
    fn generate_global(&mut self, var: &VarDecl);

    /// Push the value of a variable.
    fn emit_load(&mut self, id: &Ident);

    /// Push the address of a variable.
    fn emit_address(&mut self, id: &Ident);
}

impl VariableManager for CodeGenerator {
    fn location(&self, id: &Ident) -> Location {
        let symbol = self.symbol_of(id);
        if symbol.is_global() {
            Location::Global(self.global_label(&id.name))
        } else {
            Location::Frame(symbol.offset)
        }
    }

    fn generate_global(&mut self, var: &VarDecl) {
        let label = self.global_label(&var.id.name);
        log::trace!("global {} at {}", var.id.name, label);

        self.emit_section(Section::Data);
        self.emit_op_commented(directives::ALIGN, &["2"], "align on a word boundary");
        self.emit(Instruction::Labeled {
            label,
            op: Some(Op::new(directives::SPACE, &[&WORD_SIZE.to_string()])),
        });
    }

    fn emit_load(&mut self, id: &Ident) {
        match self.location(id) {
            Location::Frame(offset) => self.emit_op_commented(
                opcodes::LW,
                &[registers::T0, &indexed(offset, registers::FP)],
                "load the value of local into T0",
            ),
            Location::Global(label) => self.emit_op_commented(
                opcodes::LW,
                &[registers::T0, &label],
                "load the value of global into T0",
            ),
        }
        self.push(registers::T0);
    }

    fn emit_address(&mut self, id: &Ident) {
        match self.location(id) {
            Location::Frame(offset) => self.emit_op_commented(
                opcodes::LA,
                &[registers::T0, &indexed(offset, registers::FP)],
                "load the address of local into T0",
            ),
            Location::Global(label) => self.emit_op(opcodes::LA, &[registers::T0, &label]),
        }
        self.push(registers::T0);
    }
}
