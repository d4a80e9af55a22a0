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

//! Shared helpers for building Carrot programs in integration tests.

#![allow(dead_code)]

use carrot::analyzer::{analyze, SymbolTable};
use carrot::ast::{Block, Decl, Expr, FnDecl, FormalDecl, Program, Stmt, StructDecl, TypeNode, VarDecl};
use carrot::{CompilationContext, CompileOptions, Diagnostics, ErrorCode, SourcePos};

/// Position at `line:column`.
pub fn at(line: usize, column: usize) -> SourcePos {
    SourcePos::new(line, column)
}

/// A position for tests that do not care about positions.
pub fn nowhere() -> SourcePos {
    SourcePos::NONE
}

/// Options with annotation comments turned off.
pub fn quiet() -> CompileOptions {
    CompileOptions {
        emit_comments: false,
        ..CompileOptions::default()
    }
}

pub fn int_var(name: &str, pos: SourcePos) -> VarDecl {
    VarDecl::new(TypeNode::Int, name, pos)
}

pub fn bool_var(name: &str, pos: SourcePos) -> VarDecl {
    VarDecl::new(TypeNode::Bool, name, pos)
}

pub fn struct_var(type_name: &str, type_pos: SourcePos, name: &str, pos: SourcePos) -> VarDecl {
    VarDecl::new(TypeNode::named_struct(type_name, type_pos), name, pos)
}

pub fn int_formal(name: &str, pos: SourcePos) -> FormalDecl {
    FormalDecl::new(TypeNode::Int, name, pos)
}

/// `void main() { decls stmts }` declared at line 1.
pub fn main_fn(decls: Vec<VarDecl>, stmts: Vec<Stmt>) -> Decl {
    Decl::Fn(FnDecl::new(TypeNode::Void, "main", at(1, 6), vec![], Block::new(decls, stmts)))
}

pub fn function(
    ret: TypeNode,
    name: &str,
    pos: SourcePos,
    formals: Vec<FormalDecl>,
    decls: Vec<VarDecl>,
    stmts: Vec<Stmt>,
) -> Decl {
    Decl::Fn(FnDecl::new(ret, name, pos, formals, Block::new(decls, stmts)))
}

pub fn structure(name: &str, pos: SourcePos, fields: Vec<VarDecl>) -> Decl {
    Decl::Struct(StructDecl::new(name, pos, fields))
}

pub fn global(var: VarDecl) -> Decl {
    Decl::Var(var)
}

pub fn write(expr: Expr) -> Stmt {
    Stmt::Write(expr)
}

pub fn call_stmt(name: &str, pos: SourcePos, args: Vec<Expr>) -> Stmt {
    Stmt::call(Expr::call(name, pos, args)).expect("call expression")
}

/// Run both analysis passes and collect every diagnostic.
pub fn analyze_program(program: &mut Program) -> (CompilationContext, SymbolTable, Diagnostics) {
    let mut ctx = CompilationContext::default();
    let mut diagnostics = Diagnostics::new();
    let table = analyze(program, &mut ctx, &mut diagnostics);
    (ctx, table, diagnostics)
}

/// `(code, position)` of every diagnostic the program produces.
pub fn diagnose(mut program: Program) -> Vec<(ErrorCode, SourcePos)> {
    let (_, _, diagnostics) = analyze_program(&mut program);
    diagnostics
        .iter()
        .map(|d| (d.code().expect("known message"), d.pos))
        .collect()
}

/// Codes of every diagnostic the program produces.
pub fn codes(program: Program) -> Vec<ErrorCode> {
    diagnose(program).into_iter().map(|(code, _)| code).collect()
}

/// Compile and render without comments.
pub fn assemble(mut program: Program) -> String {
    carrot::compile(&mut program, quiet())
        .expect("program should compile")
        .to_string()
}
