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

//! Expression AST nodes.

use crate::analyzer::symbol::SymbolId;
use crate::error::SourcePos;
use std::fmt;

/// An identifier occurrence.
///
/// The symbol link is empty until name resolution sets it, and it is set at
/// most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    /// The identifier text.
    pub name: String,
    /// Where the identifier appears.
    pub pos: SourcePos,
    symbol: Option<SymbolId>,
}

impl Ident {
    /// Create an unresolved identifier.
    pub fn new(name: impl Into<String>, pos: SourcePos) -> Self {
        Self {
            name: name.into(),
            pos,
            symbol: None,
        }
    }

    /// The symbol this identifier resolved to.
    pub fn symbol(&self) -> Option<SymbolId> {
        self.symbol
    }

    /// Check if name resolution linked this identifier.
    pub fn is_linked(&self) -> bool {
        self.symbol.is_some()
    }

    /// Link the identifier to its symbol.
    ///
    /// # Panics
    ///
    /// Panics if the identifier is already linked.
    pub fn link(&mut self, symbol: SymbolId) {
        if let Some(existing) = self.symbol {
            panic!(
                "identifier '{}' at {} is already linked to symbol #{}",
                self.name,
                self.pos,
                existing.index()
            );
        }
        self.symbol = Some(symbol);
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Arithmetic negation (-).
    Neg,
    /// Logical not (!).
    Not,
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,

    // Logical
    And,
    Or,

    // Equality
    Equal,
    NotEqual,

    // Relational
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

/// Operator families sharing one typing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpFamily {
    Arithmetic,
    Logical,
    Equality,
    Relational,
}

impl BinaryOp {
    /// The typing family of this operator.
    pub fn family(&self) -> OpFamily {
        match self {
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => OpFamily::Arithmetic,
            BinaryOp::And | BinaryOp::Or => OpFamily::Logical,
            BinaryOp::Equal | BinaryOp::NotEqual => OpFamily::Equality,
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEqual | BinaryOp::GreaterEqual => {
                OpFamily::Relational
            }
        }
    }

    /// Check if the right operand may be skipped at run time.
    pub fn is_short_circuit(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Equal => "==",
            BinaryOp::NotEqual => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEqual => "<=",
            BinaryOp::GreaterEqual => ">=",
        };
        write!(f, "{}", s)
    }
}

/// An assignment `lhs = rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignExpr {
    /// The assigned location.
    pub lhs: Box<Expr>,
    /// The assigned value.
    pub rhs: Box<Expr>,
}

impl AssignExpr {
    /// Create an assignment.
    pub fn new(lhs: Expr, rhs: Expr) -> Self {
        Self {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    /// Position of the assignment (its left operand).
    pub fn pos(&self) -> SourcePos {
        self.lhs.pos()
    }
}

impl fmt::Display for AssignExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}

/// A function call `callee(args...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr {
    /// The called name.
    pub callee: Ident,
    /// Actual arguments, left to right.
    pub args: Vec<Expr>,
}

impl CallExpr {
    /// Create a call.
    pub fn new(callee: Ident, args: Vec<Expr>) -> Self {
        Self { callee, args }
    }

    /// Position of the call (its callee).
    pub fn pos(&self) -> SourcePos {
        self.callee.pos
    }
}

impl fmt::Display for CallExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.callee)?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// Integer literal.
    IntLit { value: i32, pos: SourcePos },
    /// String literal, stored without the surrounding quotes.
    StrLit { value: String, pos: SourcePos },
    /// The literal `true`.
    True { pos: SourcePos },
    /// The literal `false`.
    False { pos: SourcePos },
    /// A name use.
    Id(Ident),
    /// Field access `loc.field`.
    DotAccess { loc: Box<Expr>, field: Ident },
    /// Assignment used as a value.
    Assign(AssignExpr),
    /// Call used as a value.
    Call(CallExpr),
    /// Unary operation.
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Binary operation.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    /// Create an integer literal.
    pub fn int(value: i32, pos: SourcePos) -> Self {
        Expr::IntLit { value, pos }
    }

    /// Create a string literal from its unquoted text.
    pub fn string(value: impl Into<String>, pos: SourcePos) -> Self {
        Expr::StrLit {
            value: value.into(),
            pos,
        }
    }

    /// Create a boolean literal.
    pub fn bool(value: bool, pos: SourcePos) -> Self {
        if value {
            Expr::True { pos }
        } else {
            Expr::False { pos }
        }
    }

    /// Create a name use.
    pub fn id(name: impl Into<String>, pos: SourcePos) -> Self {
        Expr::Id(Ident::new(name, pos))
    }

    /// Create a field access.
    pub fn dot(loc: Expr, field: impl Into<String>, pos: SourcePos) -> Self {
        Expr::DotAccess {
            loc: Box::new(loc),
            field: Ident::new(field, pos),
        }
    }

    /// Create an assignment expression.
    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        Expr::Assign(AssignExpr::new(lhs, rhs))
    }

    /// Create a call expression.
    pub fn call(callee: impl Into<String>, pos: SourcePos, args: Vec<Expr>) -> Self {
        Expr::Call(CallExpr::new(Ident::new(callee, pos), args))
    }

    /// Create a unary expression.
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Create a binary expression.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The position diagnostics about this expression point at.
    ///
    /// Composite expressions report at a child: the left operand for binary
    /// operators and assignments, the operand for unary operators, the
    /// callee for calls and the field for dot accesses.
    pub fn pos(&self) -> SourcePos {
        match self {
            Expr::IntLit { pos, .. }
            | Expr::StrLit { pos, .. }
            | Expr::True { pos }
            | Expr::False { pos } => *pos,
            Expr::Id(id) => id.pos,
            Expr::DotAccess { field, .. } => field.pos,
            Expr::Assign(assign) => assign.pos(),
            Expr::Call(call) => call.pos(),
            Expr::Unary { operand, .. } => operand.pos(),
            Expr::Binary { left, .. } => left.pos(),
        }
    }

    /// The identifier, if this expression is a plain name use.
    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Id(id) => Some(id),
            _ => None,
        }
    }

    /// Check if this expression names a storage location (`id` or `loc.id`).
    pub fn is_location(&self) -> bool {
        matches!(self, Expr::Id(_) | Expr::DotAccess { .. })
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::IntLit { value, .. } => write!(f, "{}", value),
            Expr::StrLit { value, .. } => write!(f, "\"{}\"", value),
            Expr::True { .. } => write!(f, "true"),
            Expr::False { .. } => write!(f, "false"),
            Expr::Id(id) => write!(f, "{}", id),
            Expr::DotAccess { loc, field } => write!(f, "{}.{}", loc, field),
            Expr::Assign(assign) => write!(f, "({})", assign),
            Expr::Call(call) => write!(f, "{}", call),
            Expr::Unary { op, operand } => write!(f, "({}{})", op, operand),
            Expr::Binary { op, left, right } => write!(f, "({} {} {})", left, op, right),
        }
    }
}
