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

//! MIPS instruction model for the Carrot code generator.
//!
//! The generator targets the subset of MIPS assembly accepted by SPIM.
//! Instructions are kept symbolic (opcode mnemonics, register names and
//! labels) and only turned into text when an [`super::Assembly`] is
//! displayed.

use std::fmt;

/// Register names.
pub mod registers {
    /// Frame pointer.
    pub const FP: &str = "$fp";
    /// Stack pointer.
    pub const SP: &str = "$sp";
    /// Return address.
    pub const RA: &str = "$ra";
    /// Function result and syscall selector.
    pub const V0: &str = "$v0";
    /// Syscall argument.
    pub const A0: &str = "$a0";
    /// Scratch register 0.
    pub const T0: &str = "$t0";
    /// Scratch register 1.
    pub const T1: &str = "$t1";
}

/// Instruction mnemonics.
pub mod opcodes {
    // Loads and stores
    pub const LI: &str = "li";
    pub const LA: &str = "la";
    pub const LW: &str = "lw";
    pub const SW: &str = "sw";
    pub const MOVE: &str = "move";

    // Arithmetic
    pub const ADD: &str = "add";
    pub const ADDU: &str = "addu";
    pub const SUB: &str = "sub";
    pub const SUBU: &str = "subu";
    pub const MUL: &str = "mul";
    pub const DIV: &str = "div";
    pub const NEG: &str = "neg";

    // Comparisons
    pub const SEQ: &str = "seq";
    pub const SNE: &str = "sne";
    pub const SLT: &str = "slt";
    pub const SGT: &str = "sgt";
    pub const SLE: &str = "sle";
    pub const SGE: &str = "sge";

    // Control flow
    pub const B: &str = "b";
    pub const BEQ: &str = "beq";
    pub const BLE: &str = "ble";
    pub const JAL: &str = "jal";
    pub const JR: &str = "jr";
    pub const SYSCALL: &str = "syscall";
}

/// Assembler directives that appear in operation position.
pub mod directives {
    pub const GLOBL: &str = ".globl";
    pub const ALIGN: &str = ".align";
    pub const SPACE: &str = ".space";
    pub const ASCIIZ: &str = ".asciiz";
}

/// SPIM syscall numbers (loaded into `$v0`).
pub mod syscalls {
    pub const PRINT_INT: i32 = 1;
    pub const PRINT_STRING: i32 = 4;
    pub const READ_INT: i32 = 5;
    pub const EXIT: i32 = 10;
}

/// Run-time encodings of boolean values.
pub mod encodings {
    pub const TRUE: i32 = 1;
    pub const FALSE: i32 = 0;
}

/// Output region selected by a section directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Text,
    Data,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Text => write!(f, ".text"),
            Section::Data => write!(f, ".data"),
        }
    }
}

/// An opcode with its operands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Op {
    pub opcode: &'static str,
    pub operands: Vec<String>,
    pub comment: Option<String>,
}

impl Op {
    /// Create an operation without a comment.
    pub fn new(opcode: &'static str, operands: &[&str]) -> Self {
        Self {
            opcode,
            operands: operands.iter().map(|s| s.to_string()).collect(),
            comment: None,
        }
    }

    /// Attach a trailing comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    fn fmt_bare(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operands.is_empty() {
            write!(f, "{}", self.opcode)?;
        } else {
            write!(f, "{:<6} {}", self.opcode, self.operands.join(", "))?;
        }
        if let Some(comment) = &self.comment {
            write!(f, "  # {}", comment)?;
        }
        Ok(())
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_bare(f)
    }
}

/// One line of generated assembly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// A plain operation.
    Op(Op),
    /// A label definition, optionally followed by an operation on the same line.
    Labeled { label: String, op: Option<Op> },
    /// A `.text` or `.data` switch.
    Section(Section),
    /// A whole-line comment.
    Comment(String),
}

impl Instruction {
    /// The label this line defines, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Instruction::Labeled { label, .. } => Some(label),
            _ => None,
        }
    }

    /// The operation on this line, if any.
    pub fn op(&self) -> Option<&Op> {
        match self {
            Instruction::Op(op) => Some(op),
            Instruction::Labeled { op, .. } => op.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Op(op) => write!(f, "    {}", op),
            Instruction::Labeled { label, op: None } => write!(f, "{}:", label),
            Instruction::Labeled {
                label,
                op: Some(op),
            } => {
                write!(f, "{}: ", label)?;
                op.fmt_bare(f)
            }
            Instruction::Section(section) => write!(f, "    {}", section),
            Instruction::Comment(text) => write!(f, "    # {}", text),
        }
    }
}

/// Format a base-plus-offset memory operand, e.g. `-4($fp)`.
pub fn indexed(offset: i32, base: &str) -> String {
    format!("{}({})", offset, base)
}
