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

//! Expression code generation.
//!
//! Each expression pushes exactly one word: its value, or for
//! [`ExpressionEmitter::generate_address`] the address of a location.
//! Operands are evaluated left to right, then popped into `$t0`/`$t1`.

use super::labels::LabelManager;
use super::mips::{encodings, indexed, opcodes, registers};
use super::strings::StringManager;
use super::type_inference::TypeInference;
use super::variables::VariableManager;
use super::CodeGenerator;
use super::EmitHelpers;
use crate::ast::{AssignExpr, BinaryOp, CallExpr, Expr, UnaryOp};
use crate::error::CodegenError;

/// Extension trait for expression code generation.
pub trait ExpressionEmitter {
    /// Generate code that pushes the value of an expression.
    fn generate_expr(&mut self, expr: &Expr) -> Result<(), CodegenError>;

    /// Generate code that pushes the address of an assignable location.
    fn generate_address(&mut self, expr: &Expr) -> Result<(), CodegenError>;

    /// Generate an assignment, pushing the assigned value.
    fn generate_assign(&mut self, assign: &AssignExpr) -> Result<(), CodegenError>;

    /// Generate a call. The result is pushed only for non-void callees.
    fn generate_call(&mut self, call: &CallExpr) -> Result<(), CodegenError>;

    /// Generate `&&` or `||`, skipping the right operand when the left one
    /// decides the result.
    fn generate_short_circuit(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<(), CodegenError>;
}

impl ExpressionEmitter for CodeGenerator {
    fn generate_expr(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        let depth = self.stack_depth;

        match expr {
            Expr::IntLit { value, .. } => {
                self.emit_op_commented(
                    opcodes::LI,
                    &[registers::T0, &value.to_string()],
                    "load value into T0",
                );
                self.push(registers::T0);
            }
            Expr::StrLit { value, .. } => {
                let label = self.string_label(value);
                self.emit_op_commented(opcodes::LA, &[registers::T0, &label], "load addr into $t0");
                self.push(registers::T0);
            }
            Expr::True { .. } | Expr::False { .. } => {
                let value = if matches!(expr, Expr::True { .. }) {
                    encodings::TRUE
                } else {
                    encodings::FALSE
                };
                self.emit_op_commented(
                    opcodes::LI,
                    &[registers::T0, &value.to_string()],
                    "load value into T0",
                );
                self.push(registers::T0);
            }
            Expr::Id(id) => self.emit_load(id),
            Expr::DotAccess { .. } => {
                return Err(CodegenError::Unsupported {
                    construct: "struct field access",
                    pos: expr.pos(),
                });
            }
            Expr::Assign(assign) => self.generate_assign(assign)?,
            Expr::Call(call) => self.generate_call(call)?,
            Expr::Unary { op, operand } => {
                self.emit_comment(match op {
                    UnaryOp::Neg => "UNARY MINUS",
                    UnaryOp::Not => "NOT",
                });
                self.generate_expr(operand)?;
                self.pop(registers::T0);
                match op {
                    UnaryOp::Neg => self.emit_op(opcodes::NEG, &[registers::T0, registers::T0]),
                    UnaryOp::Not => self.emit_op(
                        opcodes::SEQ,
                        &[registers::T0, registers::T0, &encodings::FALSE.to_string()],
                    ),
                }
                self.push(registers::T0);
            }
            Expr::Binary { op, left, right } if op.is_short_circuit() => {
                self.generate_short_circuit(*op, left, right)?;
            }
            Expr::Binary { op, left, right } => {
                let (opcode, comment) = binary_opcode(*op);
                self.emit_comment(comment);
                self.generate_expr(left)?;
                self.generate_expr(right)?;
                self.pop(registers::T1);
                self.pop(registers::T0);
                self.emit_op(opcode, &[registers::T0, registers::T0, registers::T1]);
                self.push(registers::T0);
            }
        }

        debug_assert_eq!(
            self.stack_depth,
            depth + 1,
            "expression must push exactly one word: {}",
            expr
        );
        Ok(())
    }

    fn generate_address(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        match expr {
            Expr::Id(id) => {
                self.emit_address(id);
                Ok(())
            }
            Expr::DotAccess { .. } => Err(CodegenError::Unsupported {
                construct: "assignment to a struct field",
                pos: expr.pos(),
            }),
            other => panic!("expression '{}' is not an assignable location", other),
        }
    }

    fn generate_assign(&mut self, assign: &AssignExpr) -> Result<(), CodegenError> {
        if self.expr_type(&assign.lhs).is_struct() {
            return Err(CodegenError::Unsupported {
                construct: "struct assignment",
                pos: assign.pos(),
            });
        }

        self.emit_comment("ASSIGN");
        self.generate_expr(&assign.rhs)?;
        self.generate_address(&assign.lhs)?;
        self.pop(registers::T0);
        self.pop(registers::T1);
        self.emit_op(opcodes::SW, &[registers::T1, &indexed(0, registers::T0)]);
        self.push(registers::T1);
        Ok(())
    }

    fn generate_call(&mut self, call: &CallExpr) -> Result<(), CodegenError> {
        self.emit_comment("FUNCTION CALL");
        for arg in &call.args {
            self.generate_expr(arg)?;
        }

        let label = self.function_label(&call.callee.name);
        self.emit_op(opcodes::JAL, &[&label]);
        // The callee's epilogue discards the arguments.
        self.release(call.args.len());

        if self.returns_value(call) {
            self.push(registers::V0);
        }
        Ok(())
    }

    fn generate_short_circuit(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<(), CodegenError> {
        let (decided_by, comment) = match op {
            BinaryOp::And => (encodings::FALSE, "AND"),
            BinaryOp::Or => (encodings::TRUE, "OR"),
            other => panic!("'{}' does not short-circuit", other),
        };
        let done = self.make_label();

        self.emit_comment(comment);
        self.generate_expr(left)?;
        self.pop(registers::T0);
        self.emit_branch_if_equal(registers::T0, decided_by, &done);
        self.generate_expr(right)?;
        self.pop(registers::T0);
        self.define_label(&done);
        self.push(registers::T0);
        Ok(())
    }
}

/// The `$t0 = $t0 op $t1` opcode for a strict binary operator.
fn binary_opcode(op: BinaryOp) -> (&'static str, &'static str) {
    match op {
        BinaryOp::Add => (opcodes::ADDU, "ADDITION"),
        BinaryOp::Sub => (opcodes::SUBU, "SUBTRACTION"),
        BinaryOp::Mul => (opcodes::MUL, "MULTIPLICATION"),
        BinaryOp::Div => (opcodes::DIV, "DIVISION"),
        BinaryOp::Equal => (opcodes::SEQ, "EQUALS"),
        BinaryOp::NotEqual => (opcodes::SNE, "NOT EQUALS"),
        BinaryOp::Less => (opcodes::SLT, "LESS THAN"),
        BinaryOp::Greater => (opcodes::SGT, "GREATER THAN"),
        BinaryOp::LessEqual => (opcodes::SLE, "LESS OR EQUAL"),
        BinaryOp::GreaterEqual => (opcodes::SGE, "GREATER OR EQUAL"),
        BinaryOp::And | BinaryOp::Or => panic!("'{}' is lowered with branches", op),
    }
}
