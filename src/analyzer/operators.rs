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

//! Operator checking for the type checker.
//!
//! Every operator rule goes through [`OperatorChecker::check_operand`] or
//! the comparison chain in [`OperatorChecker::check_same_kind`], which are
//! the only places that decide whether an operand is worth a diagnostic.
//! An operand that is already `Error` is never reported again.

use super::Analyzer;
use crate::ast::{BinaryOp, OpFamily, UnaryOp};
use crate::error::{ErrorCode, SourcePos};
use crate::types::Type;

/// A typed operand and where to report problems with it.
#[derive(Debug, Clone, Copy)]
pub struct Operand<'t> {
    pub ty: &'t Type,
    pub pos: SourcePos,
}

impl<'t> Operand<'t> {
    pub fn new(ty: &'t Type, pos: SourcePos) -> Self {
        Self { ty, pos }
    }
}

/// How two operands of the same operator are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `==` and `!=`.
    Equality,
    /// `=`.
    Assignment,
}

/// Extension trait for operator type checking.
pub trait OperatorChecker {
    /// Check one operand against an operator's requirement.
    ///
    /// Returns `true` if the operand is acceptable. An `Error` operand is
    /// rejected without a report.
    fn check_operand(
        &mut self,
        operand: Operand<'_>,
        accepts: fn(&Type) -> bool,
        code: ErrorCode,
    ) -> bool;

    /// Check a unary operator and return the result type.
    fn check_unary_op(&mut self, op: UnaryOp, operand: Operand<'_>) -> Type;

    /// Check a binary operator and return the result type.
    fn check_binary_op(&mut self, op: BinaryOp, left: Operand<'_>, right: Operand<'_>) -> Type;

    /// Check two operands that must have the same, comparable type.
    ///
    /// Reports at most one diagnostic at `pos`. Returns `false` if the
    /// operands are rejected or either is already `Error`.
    fn check_same_kind(
        &mut self,
        comparison: Comparison,
        left: &Type,
        right: &Type,
        pos: SourcePos,
    ) -> bool;
}

impl OperatorChecker for Analyzer<'_> {
    fn check_operand(
        &mut self,
        operand: Operand<'_>,
        accepts: fn(&Type) -> bool,
        code: ErrorCode,
    ) -> bool {
        if operand.ty.is_error() {
            return false;
        }
        if accepts(operand.ty) {
            return true;
        }
        self.report(code, operand.pos);
        false
    }

    fn check_unary_op(&mut self, op: UnaryOp, operand: Operand<'_>) -> Type {
        let (accepts, code, result): (fn(&Type) -> bool, _, _) = match op {
            UnaryOp::Neg => (Type::is_int, ErrorCode::ArithmeticOperand, Type::Int),
            UnaryOp::Not => (Type::is_bool, ErrorCode::LogicalOperand, Type::Bool),
        };

        if self.check_operand(operand, accepts, code) {
            result
        } else {
            Type::Error
        }
    }

    fn check_binary_op(&mut self, op: BinaryOp, left: Operand<'_>, right: Operand<'_>) -> Type {
        let (accepts, code, result): (fn(&Type) -> bool, _, _) = match op.family() {
            OpFamily::Arithmetic => (Type::is_int, ErrorCode::ArithmeticOperand, Type::Int),
            OpFamily::Logical => (Type::is_bool, ErrorCode::LogicalOperand, Type::Bool),
            OpFamily::Relational => (Type::is_int, ErrorCode::RelationalOperand, Type::Bool),
            OpFamily::Equality => {
                return if self.check_same_kind(Comparison::Equality, left.ty, right.ty, left.pos) {
                    Type::Bool
                } else {
                    Type::Error
                };
            }
        };

        // Both sides are checked so each bad operand gets its own report.
        let left_ok = self.check_operand(left, accepts, code);
        let right_ok = self.check_operand(right, accepts, code);
        if left_ok && right_ok {
            result
        } else {
            Type::Error
        }
    }

    fn check_same_kind(
        &mut self,
        comparison: Comparison,
        left: &Type,
        right: &Type,
        pos: SourcePos,
    ) -> bool {
        if left.is_error() || right.is_error() {
            return false;
        }

        let code = match comparison {
            Comparison::Equality if left.is_void() && right.is_void() => {
                Some(ErrorCode::EqualityVoidFunctions)
            }
            Comparison::Equality if left.is_fn() && right.is_fn() => {
                Some(ErrorCode::EqualityFunctions)
            }
            Comparison::Equality if left.is_struct_def() && right.is_struct_def() => {
                Some(ErrorCode::EqualityStructNames)
            }
            Comparison::Equality if left.is_struct() && right.is_struct() => {
                Some(ErrorCode::EqualityStructVariables)
            }
            Comparison::Assignment if left.is_fn() && right.is_fn() => {
                Some(ErrorCode::FunctionAssignment)
            }
            Comparison::Assignment if left.is_struct_def() && right.is_struct_def() => {
                Some(ErrorCode::StructNameAssignment)
            }
            Comparison::Assignment if left.is_struct() && right.is_struct() => {
                Some(ErrorCode::StructVariableAssignment)
            }
            _ if left != right => Some(ErrorCode::TypeMismatch),
            _ => None,
        };

        match code {
            Some(code) => {
                self.report(code, pos);
                false
            }
            None => true,
        }
    }
}
