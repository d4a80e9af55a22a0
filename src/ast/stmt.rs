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

//! Statement AST nodes.

use super::decl::VarDecl;
use super::expr::{AssignExpr, CallExpr, Expr};
use crate::error::SourcePos;
use std::fmt;

/// A statement body: local declarations followed by statements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    /// Local variable declarations.
    pub decls: Vec<VarDecl>,
    /// The statements in this block.
    pub stmts: Vec<Stmt>,
}

impl Block {
    /// Create a new block.
    pub fn new(decls: Vec<VarDecl>, stmts: Vec<Stmt>) -> Self {
        Self { decls, stmts }
    }

    /// Create a block without declarations.
    pub fn of(stmts: Vec<Stmt>) -> Self {
        Self {
            decls: Vec::new(),
            stmts,
        }
    }

    /// Check if this block is empty.
    pub fn is_empty(&self) -> bool {
        self.decls.is_empty() && self.stmts.is_empty()
    }

    pub(crate) fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        for decl in &self.decls {
            writeln!(f, "{:indent$}{}", "", decl, indent = indent)?;
        }
        for stmt in &self.stmts {
            stmt.fmt_indented(f, indent)?;
        }
        Ok(())
    }
}

/// A statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    /// `lhs = rhs;`
    Assign(AssignExpr),
    /// `loc++;`
    PostInc(Expr),
    /// `loc--;`
    PostDec(Expr),
    /// `cin >> loc;`
    Read(Expr),
    /// `cout << expr;`
    Write(Expr),
    /// `if (cond) { ... }`
    If { cond: Expr, body: Block },
    /// `if (cond) { ... } else { ... }`
    IfElse {
        cond: Expr,
        then_body: Block,
        else_body: Block,
    },
    /// `while (cond) { ... }`
    While { cond: Expr, body: Block },
    /// `repeat (count) { ... }`
    Repeat { count: Expr, body: Block },
    /// `callee(args);`
    Call(CallExpr),
    /// `return;` or `return value;`
    Return { value: Option<Expr>, pos: SourcePos },
}

impl Stmt {
    /// Create an assignment statement.
    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        Stmt::Assign(AssignExpr::new(lhs, rhs))
    }

    /// Create a call statement.
    ///
    /// Any expression other than a call is rejected with `None`.
    pub fn call(expr: Expr) -> Option<Self> {
        match expr {
            Expr::Call(call) => Some(Stmt::Call(call)),
            _ => None,
        }
    }

    /// Create a return statement.
    pub fn ret(value: Option<Expr>, pos: SourcePos) -> Self {
        Stmt::Return { value, pos }
    }

    pub(crate) fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "";
        match self {
            Stmt::Assign(assign) => writeln!(f, "{:indent$}{};", pad, assign, indent = indent),
            Stmt::PostInc(loc) => writeln!(f, "{:indent$}{}++;", pad, loc, indent = indent),
            Stmt::PostDec(loc) => writeln!(f, "{:indent$}{}--;", pad, loc, indent = indent),
            Stmt::Read(loc) => writeln!(f, "{:indent$}cin >> {};", pad, loc, indent = indent),
            Stmt::Write(expr) => writeln!(f, "{:indent$}cout << {};", pad, expr, indent = indent),
            Stmt::If { cond, body } => {
                writeln!(f, "{:indent$}if ({}) {{", pad, cond, indent = indent)?;
                body.fmt_indented(f, indent + 4)?;
                writeln!(f, "{:indent$}}}", pad, indent = indent)
            }
            Stmt::IfElse {
                cond,
                then_body,
                else_body,
            } => {
                writeln!(f, "{:indent$}if ({}) {{", pad, cond, indent = indent)?;
                then_body.fmt_indented(f, indent + 4)?;
                writeln!(f, "{:indent$}}}", pad, indent = indent)?;
                writeln!(f, "{:indent$}else {{", pad, indent = indent)?;
                else_body.fmt_indented(f, indent + 4)?;
                writeln!(f, "{:indent$}}}", pad, indent = indent)
            }
            Stmt::While { cond, body } => {
                writeln!(f, "{:indent$}while ({}) {{", pad, cond, indent = indent)?;
                body.fmt_indented(f, indent + 4)?;
                writeln!(f, "{:indent$}}}", pad, indent = indent)
            }
            Stmt::Repeat { count, body } => {
                writeln!(f, "{:indent$}repeat ({}) {{", pad, count, indent = indent)?;
                body.fmt_indented(f, indent + 4)?;
                writeln!(f, "{:indent$}}}", pad, indent = indent)
            }
            Stmt::Call(call) => writeln!(f, "{:indent$}{};", pad, call, indent = indent),
            Stmt::Return { value: Some(value), .. } => {
                writeln!(f, "{:indent$}return {};", pad, value, indent = indent)
            }
            Stmt::Return { value: None, .. } => {
                writeln!(f, "{:indent$}return;", pad, indent = indent)
            }
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, TypeNode};

    #[test]
    fn test_call_statement_requires_call() {
        let p = SourcePos::NONE;
        assert!(Stmt::call(Expr::call("f", p, vec![])).is_some());
        assert!(Stmt::call(Expr::int(1, p)).is_none());
    }

    #[test]
    fn test_display_simple_statements() {
        let p = SourcePos::NONE;
        assert_eq!(
            Stmt::assign(Expr::id("x", p), Expr::int(1, p)).to_string(),
            "x = 1;\n"
        );
        assert_eq!(Stmt::PostInc(Expr::id("i", p)).to_string(), "i++;\n");
        assert_eq!(Stmt::PostDec(Expr::id("i", p)).to_string(), "i--;\n");
        assert_eq!(Stmt::Read(Expr::id("x", p)).to_string(), "cin >> x;\n");
        assert_eq!(
            Stmt::Write(Expr::string("hi", p)).to_string(),
            "cout << \"hi\";\n"
        );
        assert_eq!(Stmt::ret(None, p).to_string(), "return;\n");
        assert_eq!(
            Stmt::ret(Some(Expr::int(0, p)), p).to_string(),
            "return 0;\n"
        );
    }

    #[test]
    fn test_display_nested_blocks() {
        let p = SourcePos::NONE;
        let stmt = Stmt::IfElse {
            cond: Expr::binary(BinaryOp::Less, Expr::id("x", p), Expr::int(3, p)),
            then_body: Block::new(
                vec![VarDecl::new(TypeNode::Int, "y", p)],
                vec![Stmt::PostInc(Expr::id("y", p))],
            ),
            else_body: Block::of(vec![Stmt::While {
                cond: Expr::bool(true, p),
                body: Block::of(vec![Stmt::Write(Expr::id("x", p))]),
            }]),
        };

        assert_eq!(
            stmt.to_string(),
            "if ((x < 3)) {\n    int y;\n    y++;\n}\nelse {\n    while (true) {\n        cout << x;\n    }\n}\n"
        );
    }

    #[test]
    fn test_block_is_empty() {
        assert!(Block::default().is_empty());
        assert!(!Block::of(vec![Stmt::ret(None, SourcePos::NONE)]).is_empty());
    }
}
