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

//! Type checking of expressions and statements.
//!
//! This module provides the per-node typing rules. Operator rules are
//! delegated to [`OperatorChecker`] so that `Error` suppression lives in
//! one place.

use super::operators::{Comparison, Operand, OperatorChecker};
use super::Analyzer;
use crate::ast::{AssignExpr, Block, CallExpr, Expr, FnDecl, Stmt};
use crate::error::ErrorCode;
use crate::types::Type;

/// Extension trait for type checking tree nodes.
pub trait TypeChecker {
    /// Check a function body against its declared return type.
    fn check_function(&mut self, func: &FnDecl);

    /// Check every statement of a block.
    fn check_block(&mut self, block: &Block, return_type: &Type);

    /// Check a statement inside a function returning `return_type`.
    fn check_stmt(&mut self, stmt: &Stmt, return_type: &Type);

    /// Compute the type of an expression.
    fn check_expr(&mut self, expr: &Expr) -> Type;

    /// Compute the type of an assignment.
    fn check_assign(&mut self, assign: &AssignExpr) -> Type;

    /// Compute the type of a call.
    ///
    /// A wrong argument count is reported, but the declared return type is
    /// still the result so the surrounding expression can be checked.
    fn check_call(&mut self, call: &CallExpr) -> Type;
}

impl TypeChecker for Analyzer<'_> {
    fn check_function(&mut self, func: &FnDecl) {
        let return_type = func.return_type.to_type();
        self.check_block(&func.body, &return_type);
    }

    fn check_block(&mut self, block: &Block, return_type: &Type) {
        for stmt in &block.stmts {
            self.check_stmt(stmt, return_type);
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt, return_type: &Type) {
        match stmt {
            Stmt::Assign(assign) => {
                self.check_assign(assign);
            }
            Stmt::PostInc(loc) | Stmt::PostDec(loc) => {
                let ty = self.check_expr(loc);
                self.check_operand(
                    Operand::new(&ty, loc.pos()),
                    Type::is_int,
                    ErrorCode::ArithmeticOperand,
                );
            }
            Stmt::Read(loc) => {
                let ty = self.check_expr(loc);
                let code = if ty.is_fn() {
                    Some(ErrorCode::ReadFunction)
                } else if ty.is_struct_def() {
                    Some(ErrorCode::ReadStructName)
                } else if ty.is_struct() {
                    Some(ErrorCode::ReadStructVariable)
                } else {
                    None
                };
                if let Some(code) = code {
                    self.report(code, loc.pos());
                }
            }
            Stmt::Write(expr) => {
                let ty = self.check_expr(expr);
                let code = if ty.is_fn() {
                    Some(ErrorCode::WriteFunction)
                } else if ty.is_struct_def() {
                    Some(ErrorCode::WriteStructName)
                } else if ty.is_struct() {
                    Some(ErrorCode::WriteStructVariable)
                } else if ty.is_void() {
                    Some(ErrorCode::WriteVoid)
                } else {
                    None
                };
                if let Some(code) = code {
                    self.report(code, expr.pos());
                }
            }
            Stmt::If { cond, body } => {
                let ty = self.check_expr(cond);
                self.check_operand(
                    Operand::new(&ty, cond.pos()),
                    Type::is_bool,
                    ErrorCode::NonBoolIfCondition,
                );
                self.check_block(body, return_type);
            }
            Stmt::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                let ty = self.check_expr(cond);
                self.check_operand(
                    Operand::new(&ty, cond.pos()),
                    Type::is_bool,
                    ErrorCode::NonBoolIfCondition,
                );
                self.check_block(then_body, return_type);
                self.check_block(else_body, return_type);
            }
            Stmt::While { cond, body } => {
                let ty = self.check_expr(cond);
                self.check_operand(
                    Operand::new(&ty, cond.pos()),
                    Type::is_bool,
                    ErrorCode::NonBoolWhileCondition,
                );
                self.check_block(body, return_type);
            }
            Stmt::Repeat { count, body } => {
                let ty = self.check_expr(count);
                self.check_operand(
                    Operand::new(&ty, count.pos()),
                    Type::is_int,
                    ErrorCode::NonIntRepeatClause,
                );
                self.check_block(body, return_type);
            }
            Stmt::Call(call) => {
                self.check_call(call);
            }
            Stmt::Return { value: Some(value), .. } => {
                let ty = self.check_expr(value);
                if return_type.is_void() {
                    self.report(ErrorCode::ReturnValueInVoid, value.pos());
                } else if !return_type.is_error() && !ty.is_error() && ty != *return_type {
                    self.report(ErrorCode::BadReturnValue, value.pos());
                }
            }
            Stmt::Return { value: None, pos } => {
                if !return_type.is_void() {
                    self.report(ErrorCode::MissingReturnValue, *pos);
                }
            }
        }
    }

    fn check_expr(&mut self, expr: &Expr) -> Type {
        match expr {
            Expr::IntLit { .. } => Type::Int,
            Expr::StrLit { .. } => Type::String,
            Expr::True { .. } | Expr::False { .. } => Type::Bool,
            Expr::Id(id) => self.ident_type(id),
            Expr::DotAccess { field, .. } => self.ident_type(field),
            Expr::Assign(assign) => self.check_assign(assign),
            Expr::Call(call) => self.check_call(call),
            Expr::Unary { op, operand } => {
                let ty = self.check_expr(operand);
                self.check_unary_op(*op, Operand::new(&ty, operand.pos()))
            }
            Expr::Binary { op, left, right } => {
                let left_ty = self.check_expr(left);
                let right_ty = self.check_expr(right);
                self.check_binary_op(
                    *op,
                    Operand::new(&left_ty, left.pos()),
                    Operand::new(&right_ty, right.pos()),
                )
            }
        }
    }

    fn check_assign(&mut self, assign: &AssignExpr) -> Type {
        let lhs = self.check_expr(&assign.lhs);
        let rhs = self.check_expr(&assign.rhs);
        if self.check_same_kind(Comparison::Assignment, &lhs, &rhs, assign.pos()) {
            lhs
        } else {
            Type::Error
        }
    }

    fn check_call(&mut self, call: &CallExpr) -> Type {
        let callee = self.ident_type(&call.callee);
        if callee.is_error() {
            return Type::Error;
        }

        let ctx = self.ctx;
        let info = call
            .callee
            .symbol()
            .and_then(|id| ctx.symbol(id).function_info());
        let Some(info) = info else {
            self.report(ErrorCode::CallNonFunction, call.callee.pos);
            return Type::Error;
        };

        if call.args.len() != info.num_params {
            self.report(ErrorCode::WrongNumberOfArgs, call.callee.pos);
            return info.return_type.clone();
        }

        for (arg, formal) in call.args.iter().zip(&info.param_types) {
            let actual = self.check_expr(arg);
            if !actual.is_error() && actual != *formal {
                self.report(ErrorCode::ActualFormalMismatch, arg.pos());
            }
        }

        info.return_type.clone()
    }
}
