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

//! String literal management for code generation.
//!
//! Literals are pooled per compilation unit. The first use of a literal
//! text emits its `.asciiz` storage into the data region; later uses only
//! reference the label minted then.

use super::labels::LabelManager;
use super::mips::{directives, Instruction, Op, Section};
use super::CodeGenerator;
use super::EmitHelpers;

/// Extension trait for string literal pooling.
pub trait StringManager {
    /// The label holding `text`, emitting its storage on first use.
    ///
    /// Storage goes into the data region, after which the text region is
    /// resumed. Later uses emit nothing.
    fn string_label(&mut self, text: &str) -> String;
}

impl StringManager for CodeGenerator {
    fn string_label(&mut self, text: &str) -> String {
        if let Some(label) = self.ctx.strings.lookup(text) {
            return label.to_string();
        }

        let label = self.make_label();
        self.ctx.strings.insert(text, label.clone());
        self.emit_section(Section::Data);
        let literal = format!("\"{}\"", text);
        self.emit(Instruction::Labeled {
            label: label.clone(),
            op: Some(Op::new(directives::ASCIIZ, &[&literal])),
        });
        self.emit_section(Section::Text);
        label
    }
}
