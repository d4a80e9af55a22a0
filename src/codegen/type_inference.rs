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

//! Type utilities for code generation.
//!
//! Analysis has already validated every expression, so the generator only
//! needs to recover types where they change the emitted code: the syscall
//! chosen by `write` and whether a call leaves a result on the stack.

use super::CodeGenerator;
use crate::ast::{CallExpr, Expr, OpFamily, UnaryOp};
use crate::types::Type;

/// Extension trait for recovering expression types during code generation.
pub trait TypeInference {
    /// The type of an analyzed expression.
    fn expr_type(&self, expr: &Expr) -> Type;

    /// The declared return type of the called function.
    fn call_return_type(&self, call: &CallExpr) -> Type;

    /// Check if the call pushes a result.
    fn returns_value(&self, call: &CallExpr) -> bool {
        !self.call_return_type(call).is_void()
    }
}

impl TypeInference for CodeGenerator {
    fn expr_type(&self, expr: &Expr) -> Type {
        match expr {
            Expr::IntLit { .. } => Type::Int,
            Expr::StrLit { .. } => Type::String,
            Expr::True { .. } | Expr::False { .. } => Type::Bool,
            Expr::Id(id) => self.symbol_of(id).ty.clone(),
            Expr::DotAccess { field, .. } => self.symbol_of(field).ty.clone(),
            Expr::Assign(assign) => self.expr_type(&assign.lhs),
            Expr::Call(call) => self.call_return_type(call),
            Expr::Unary { op: UnaryOp::Neg, .. } => Type::Int,
            Expr::Unary { op: UnaryOp::Not, .. } => Type::Bool,
            Expr::Binary { op, .. } => match op.family() {
                OpFamily::Arithmetic => Type::Int,
                OpFamily::Logical | OpFamily::Relational | OpFamily::Equality => Type::Bool,
            },
        }
    }

    fn call_return_type(&self, call: &CallExpr) -> Type {
        let symbol = self.symbol_of(&call.callee);
        match symbol.function_info() {
            Some(info) => info.return_type.clone(),
            None => panic!("call of non-function '{}' reached code generation", call.callee.name),
        }
    }
}
