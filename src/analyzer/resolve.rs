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

//! Name resolution.
//!
//! Walks the program once, fills the symbol table, links every identifier
//! to its declaring symbol and assigns frame offsets. Offsets follow the
//! order in which declarations are met:
//!
//! - formals get `0, -4, -8, ...`;
//! - the next two words hold the saved return address and control link;
//! - locals (including those of nested blocks) continue downwards from there.
//!
//! Globals keep the positive [`GLOBAL_OFFSET`].

use super::symbol::{Symbol, SymbolId, SymbolKind, GLOBAL_OFFSET, WORD_SIZE};
use super::symbol_table::SymbolTable;
use crate::ast::{
    Block, CallExpr, Decl, Expr, FnDecl, FormalDecl, Ident, Program, Stmt, StructDecl, TypeNode,
    VarDecl,
};
use crate::context::CompilationContext;
use crate::error::{DiagnosticSink, ErrorCode, SourcePos};
use crate::types::Type;

/// Outcome of resolving a dot access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Access {
    /// Something went wrong further left; stay quiet.
    Bad,
    /// The field resolved. Carries the field's struct definition, if any.
    Field(Option<SymbolId>),
}

/// The name-resolution pass.
pub struct NameResolver<'a> {
    ctx: &'a mut CompilationContext,
    sink: &'a mut dyn DiagnosticSink,
    table: SymbolTable,
    /// Locals declared so far in the current function.
    local_words: i32,
}

impl<'a> NameResolver<'a> {
    /// Create a resolver with a fresh symbol table.
    pub fn new(ctx: &'a mut CompilationContext, sink: &'a mut dyn DiagnosticSink) -> Self {
        Self {
            ctx,
            sink,
            table: SymbolTable::new(),
            local_words: 0,
        }
    }

    /// Resolve a whole program and return the global symbol table.
    pub fn resolve_program(mut self, program: &mut Program) -> SymbolTable {
        log::debug!(
            "name resolution: {} top-level declaration(s)",
            program.decls.len()
        );

        for decl in &mut program.decls {
            match decl {
                Decl::Var(var) => {
                    self.declare_variable(var, None, GLOBAL_OFFSET);
                }
                Decl::Fn(func) => self.resolve_fn_decl(func),
                Decl::Struct(def) => self.resolve_struct_decl(def),
            }
        }

        let has_entry = self
            .table
            .lookup_global(&self.ctx.options.entry_point)
            .map(|id| self.ctx.symbol(id).function_info().is_some())
            .unwrap_or(false);
        if !has_entry {
            self.report(ErrorCode::NoMainFunction, SourcePos::NONE);
        }

        log::debug!(
            "name resolution done: {} symbol(s)",
            self.ctx.symbols.len()
        );
        self.table
    }

    fn report(&mut self, code: ErrorCode, pos: SourcePos) {
        self.sink.report(pos.line, pos.column, code.message());
    }

    fn insert(table: &mut SymbolTable, name: &str, id: SymbolId) {
        if let Err(err) = table.add_decl(name, id) {
            panic!("name resolution inserted after a failed check: {}", err);
        }
    }

    fn enter_scope(&mut self) {
        self.table.add_scope();
    }

    fn leave_scope(&mut self) {
        if let Err(err) = self.table.remove_scope() {
            panic!("unbalanced scopes during name resolution: {}", err);
        }
    }

    /// Link a struct type name to its global definition, reporting E203 if
    /// no struct of that name is visible.
    fn resolve_struct_type(&mut self, type_id: &mut Ident) -> Option<SymbolId> {
        let found = self
            .table
            .lookup_global(&type_id.name)
            .filter(|id| self.ctx.symbol(*id).fields().is_some());
        match found {
            Some(def) => type_id.link(def),
            None => self.report(ErrorCode::InvalidStructType, type_id.pos),
        }
        found
    }

    /// Declare a variable in the current scope, or in `fields` for struct
    /// bodies. Returns the new symbol if the declaration was accepted.
    fn declare_variable(
        &mut self,
        decl: &mut VarDecl,
        fields: Option<&mut SymbolTable>,
        offset: i32,
    ) -> Option<SymbolId> {
        let mut bad = false;
        let mut definition = None;

        match &mut decl.ty {
            TypeNode::Void => {
                self.report(ErrorCode::NonFunctionVoid, decl.id.pos);
                bad = true;
            }
            TypeNode::Struct(type_id) => match self.resolve_struct_type(type_id) {
                Some(def) => definition = Some(def),
                None => bad = true,
            },
            TypeNode::Int | TypeNode::Bool => {}
        }

        let duplicate = match &fields {
            Some(table) => table.lookup_local(&decl.id.name),
            None => self.table.lookup_local(&decl.id.name),
        }
        .is_some();
        if duplicate {
            self.report(ErrorCode::MultiplyDeclared, decl.id.pos);
            bad = true;
        }

        if bad {
            return None;
        }

        let mut symbol = match (&decl.ty, definition) {
            (TypeNode::Struct(type_id), Some(def)) => {
                Symbol::struct_instance(&decl.id.name, &type_id.name, def, decl.id.pos)
            }
            (ty, _) => Symbol::variable(&decl.id.name, ty.to_type(), decl.id.pos),
        };
        symbol.offset = offset;

        let id = self.ctx.symbols.alloc(symbol);
        match fields {
            Some(table) => Self::insert(table, &decl.id.name, id),
            None => Self::insert(&mut self.table, &decl.id.name, id),
        }
        decl.id.link(id);
        log::trace!("declared '{}' at offset {}", decl.id.name, offset);
        Some(id)
    }

    fn declare_local(&mut self, decl: &mut VarDecl) {
        let offset = self.ctx.frame_offset;
        if self.declare_variable(decl, None, offset).is_some() {
            self.ctx.frame_offset -= WORD_SIZE;
            self.local_words += 1;
        }
    }

    fn declare_formal(&mut self, formal: &mut FormalDecl) -> Option<(SymbolId, Type)> {
        let mut bad = false;
        let mut definition = None;

        match &mut formal.ty {
            TypeNode::Void => {
                self.report(ErrorCode::NonFunctionVoid, formal.id.pos);
                bad = true;
            }
            TypeNode::Struct(type_id) => match self.resolve_struct_type(type_id) {
                Some(def) => definition = Some(def),
                None => bad = true,
            },
            TypeNode::Int | TypeNode::Bool => {}
        }
        if self.table.lookup_local(&formal.id.name).is_some() {
            self.report(ErrorCode::MultiplyDeclared, formal.id.pos);
            bad = true;
        }
        if bad {
            return None;
        }

        let ty = formal.ty.to_type();
        let mut symbol = match (&formal.ty, definition) {
            (TypeNode::Struct(type_id), Some(def)) => {
                Symbol::struct_instance(&formal.id.name, &type_id.name, def, formal.id.pos)
            }
            _ => Symbol::variable(&formal.id.name, ty.clone(), formal.id.pos),
        };
        symbol.offset = self.ctx.frame_offset;
        let id = self.ctx.symbols.alloc(symbol);
        Self::insert(&mut self.table, &formal.id.name, id);
        formal.id.link(id);
        log::trace!(
            "declared formal '{}' at offset {}",
            formal.id.name,
            self.ctx.frame_offset
        );
        self.ctx.frame_offset -= WORD_SIZE;
        Some((id, ty))
    }

    fn resolve_fn_decl(&mut self, decl: &mut FnDecl) {
        let name = decl.id.name.clone();
        if let TypeNode::Struct(type_id) = &mut decl.return_type {
            self.resolve_struct_type(type_id);
        }
        let return_type = decl.return_type.to_type();

        let function = if self.table.lookup_local(&name).is_some() {
            self.report(ErrorCode::MultiplyDeclared, decl.id.pos);
            None
        } else {
            let id = self.ctx.symbols.alloc(Symbol::function(
                &name,
                return_type.clone(),
                decl.formals.len(),
                decl.id.pos,
            ));
            Self::insert(&mut self.table, &name, id);
            decl.id.link(id);
            Some(id)
        };

        self.enter_scope();
        self.ctx.frame_offset = 0;
        self.local_words = 0;

        let mut param_types = Vec::with_capacity(decl.formals.len());
        for formal in &mut decl.formals {
            if let Some((_, ty)) = self.declare_formal(formal) {
                param_types.push(ty);
            }
        }

        let params_frame_size = WORD_SIZE * param_types.len() as i32;
        self.ctx.frame_offset -= 2 * WORD_SIZE;

        self.resolve_block_contents(&mut decl.body);
        self.leave_scope();

        let locals_frame_size = WORD_SIZE * self.local_words;
        log::debug!(
            "function '{}': params {} bytes, locals {} bytes",
            name,
            params_frame_size,
            locals_frame_size
        );

        if let Some(id) = function {
            let symbol = &mut self.ctx.symbols[id];
            symbol.ty = Type::function(param_types.clone(), return_type);
            if let SymbolKind::Function(info) = &mut symbol.kind {
                info.param_types = param_types;
                info.params_frame_size = params_frame_size;
                info.locals_frame_size = locals_frame_size;
            }
        }
    }

    fn resolve_struct_decl(&mut self, decl: &mut StructDecl) {
        let duplicate = self.table.lookup_local(&decl.id.name).is_some();
        if duplicate {
            self.report(ErrorCode::MultiplyDeclared, decl.id.pos);
        }

        let mut fields = SymbolTable::new();
        let mut offset = 0;
        for field in &mut decl.fields {
            if self
                .declare_variable(field, Some(&mut fields), offset)
                .is_some()
            {
                offset -= WORD_SIZE;
            }
        }

        if !duplicate {
            let id = self
                .ctx
                .symbols
                .alloc(Symbol::struct_def(&decl.id.name, fields, decl.id.pos));
            Self::insert(&mut self.table, &decl.id.name, id);
            decl.id.link(id);
        }
    }

    /// Declarations then statements, in the current scope.
    fn resolve_block_contents(&mut self, block: &mut Block) {
        for decl in &mut block.decls {
            self.declare_local(decl);
        }
        for stmt in &mut block.stmts {
            self.resolve_stmt(stmt);
        }
    }

    fn resolve_nested_block(&mut self, block: &mut Block) {
        self.enter_scope();
        self.resolve_block_contents(block);
        self.leave_scope();
    }

    fn resolve_stmt(&mut self, stmt: &mut Stmt) {
        match stmt {
            Stmt::Assign(assign) => {
                self.resolve_location(&mut assign.lhs);
                self.resolve_expr(&mut assign.rhs);
            }
            Stmt::PostInc(expr) | Stmt::PostDec(expr) | Stmt::Read(expr) => {
                self.resolve_location(expr)
            }
            Stmt::Write(expr) => self.resolve_expr(expr),
            Stmt::If { cond, body } | Stmt::While { cond, body } => {
                self.resolve_expr(cond);
                self.resolve_nested_block(body);
            }
            Stmt::Repeat { count, body } => {
                self.resolve_expr(count);
                self.resolve_nested_block(body);
            }
            Stmt::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                self.resolve_expr(cond);
                self.resolve_nested_block(then_body);
                self.resolve_nested_block(else_body);
            }
            Stmt::Call(call) => self.resolve_call(call),
            Stmt::Return { value, .. } => {
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
        }
    }

    fn resolve_ident(&mut self, id: &mut Ident) {
        match self.table.lookup_global(&id.name) {
            Some(symbol) => id.link(symbol),
            None => self.report(ErrorCode::UndeclaredIdentifier, id.pos),
        }
    }

    fn resolve_call(&mut self, call: &mut CallExpr) {
        self.resolve_ident(&mut call.callee);
        for arg in &mut call.args {
            self.resolve_expr(arg);
        }
    }

    /// Resolve the target of an assignment, `read`, `++` or `--`.
    fn resolve_location(&mut self, expr: &mut Expr) {
        if !expr.is_location() {
            panic!("'{}' at {} is not an assignable location", expr, expr.pos());
        }
        self.resolve_expr(expr);
    }

    fn resolve_expr(&mut self, expr: &mut Expr) {
        match expr {
            Expr::IntLit { .. } | Expr::StrLit { .. } | Expr::True { .. } | Expr::False { .. } => {}
            Expr::Id(id) => self.resolve_ident(id),
            Expr::DotAccess { loc, field } => {
                self.resolve_dot_access(loc, field);
            }
            Expr::Assign(assign) => {
                self.resolve_location(&mut assign.lhs);
                self.resolve_expr(&mut assign.rhs);
            }
            Expr::Call(call) => self.resolve_call(call),
            Expr::Unary { operand, .. } => self.resolve_expr(operand),
            Expr::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
        }
    }

    fn resolve_dot_access(&mut self, loc: &mut Expr, field: &mut Ident) -> Access {
        let definition = match loc {
            Expr::Id(id) => {
                self.resolve_ident(id);
                match id.symbol() {
                    None => None,
                    Some(symbol) => match self.ctx.symbol(symbol).struct_definition() {
                        Some(def) => Some(def),
                        None => {
                            self.report(ErrorCode::DotAccessNonStruct, id.pos);
                            None
                        }
                    },
                }
            }
            Expr::DotAccess {
                loc: inner,
                field: inner_field,
            } => match self.resolve_dot_access(inner, inner_field) {
                Access::Bad => None,
                Access::Field(None) => {
                    self.report(ErrorCode::DotAccessNonStruct, inner_field.pos);
                    None
                }
                Access::Field(Some(def)) => Some(def),
            },
            other => panic!(
                "dot access on '{}' at {} is outside the grammar",
                other,
                other.pos()
            ),
        };

        let Some(definition) = definition else {
            return Access::Bad;
        };

        let found = self
            .ctx
            .symbol(definition)
            .fields()
            .and_then(|fields| fields.lookup_global(&field.name));
        match found {
            Some(symbol) => {
                field.link(symbol);
                Access::Field(self.ctx.symbol(symbol).struct_definition())
            }
            None => {
                self.report(ErrorCode::InvalidStructField, field.pos);
                Access::Bad
            }
        }
    }
}

/// Run name resolution over a program.
pub fn resolve_names(
    program: &mut Program,
    ctx: &mut CompilationContext,
    sink: &mut dyn DiagnosticSink,
) -> SymbolTable {
    NameResolver::new(ctx, sink).resolve_program(program)
}
