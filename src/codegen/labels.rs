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

//! Label management for code generation.
//!
//! Synthetic labels (`.L0`, `.L1`, ...) come from the compilation
//! context's counter, so they are unique across the whole unit. User
//! functions and globals are prefixed with `_`; the entry point keeps its
//! own name.

use super::mips::Instruction;
use super::CodeGenerator;
use super::EmitHelpers;

/// Extension trait for label creation and placement.
pub trait LabelManager {
    /// Mint a fresh synthetic label.
    fn make_label(&mut self) -> String;

    /// Place a label at the current position.
    fn define_label(&mut self, label: &str);

    /// The code label of a function.
    fn function_label(&self, name: &str) -> String;

    /// The exit label of a function. Non-entry functions get a fresh one.
    fn exit_label(&mut self, name: &str) -> String;

    /// The data label of a global variable.
    fn global_label(&self, name: &str) -> String;
}

impl LabelManager for CodeGenerator {
    fn make_label(&mut self) -> String {
        let label = self.ctx.next_label();
        log::trace!("minted label {}", label);
        label
    }

    fn define_label(&mut self, label: &str) {
        self.emit(Instruction::Labeled {
            label: label.to_string(),
            op: None,
        });
    }

    fn function_label(&self, name: &str) -> String {
        if self.ctx.is_entry_point(name) {
            name.to_string()
        } else {
            format!("_{}", name)
        }
    }

    fn exit_label(&mut self, name: &str) -> String {
        if self.ctx.is_entry_point(name) {
            format!("{}_Exit", name)
        } else {
            self.make_label()
        }
    }

    fn global_label(&self, name: &str) -> String {
        format!("_{}", name)
    }
}
