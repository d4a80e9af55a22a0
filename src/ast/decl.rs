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

//! Declaration AST nodes.

use super::expr::Ident;
use super::stmt::Block;
use crate::error::SourcePos;
use crate::types::Type;
use std::fmt;

/// A written type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    Int,
    Bool,
    Void,
    /// `struct Name`
    Struct(Ident),
}

impl TypeNode {
    /// Create a struct type reference.
    pub fn named_struct(name: impl Into<String>, pos: SourcePos) -> Self {
        TypeNode::Struct(Ident::new(name, pos))
    }

    /// The type this node denotes.
    pub fn to_type(&self) -> Type {
        match self {
            TypeNode::Int => Type::Int,
            TypeNode::Bool => Type::Bool,
            TypeNode::Void => Type::Void,
            TypeNode::Struct(id) => Type::Struct(id.name.clone()),
        }
    }
}

impl fmt::Display for TypeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeNode::Int => write!(f, "int"),
            TypeNode::Bool => write!(f, "bool"),
            TypeNode::Void => write!(f, "void"),
            TypeNode::Struct(id) => write!(f, "struct {}", id),
        }
    }
}

/// A variable (or struct field) declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDecl {
    pub ty: TypeNode,
    pub id: Ident,
}

impl VarDecl {
    /// Create a variable declaration.
    pub fn new(ty: TypeNode, name: impl Into<String>, pos: SourcePos) -> Self {
        Self {
            ty,
            id: Ident::new(name, pos),
        }
    }
}

impl fmt::Display for VarDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {};", self.ty, self.id)
    }
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormalDecl {
    pub ty: TypeNode,
    pub id: Ident,
}

impl FormalDecl {
    /// Create a formal parameter.
    pub fn new(ty: TypeNode, name: impl Into<String>, pos: SourcePos) -> Self {
        Self {
            ty,
            id: Ident::new(name, pos),
        }
    }
}

impl fmt::Display for FormalDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.id)
    }
}

/// A function definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FnDecl {
    pub return_type: TypeNode,
    pub id: Ident,
    pub formals: Vec<FormalDecl>,
    pub body: Block,
}

impl FnDecl {
    /// Create a function definition.
    pub fn new(
        return_type: TypeNode,
        name: impl Into<String>,
        pos: SourcePos,
        formals: Vec<FormalDecl>,
        body: Block,
    ) -> Self {
        Self {
            return_type,
            id: Ident::new(name, pos),
            formals,
            body,
        }
    }
}

impl fmt::Display for FnDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}(", self.return_type, self.id)?;
        for (i, formal) in self.formals.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", formal)?;
        }
        writeln!(f, ") {{")?;
        self.body.fmt_indented(f, 4)?;
        writeln!(f, "}}")
    }
}

/// A struct definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDecl {
    pub id: Ident,
    pub fields: Vec<VarDecl>,
}

impl StructDecl {
    /// Create a struct definition.
    pub fn new(name: impl Into<String>, pos: SourcePos, fields: Vec<VarDecl>) -> Self {
        Self {
            id: Ident::new(name, pos),
            fields,
        }
    }
}

impl fmt::Display for StructDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "struct {} {{", self.id)?;
        for field in &self.fields {
            writeln!(f, "    {}", field)?;
        }
        writeln!(f, "}};")
    }
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    Var(VarDecl),
    Fn(FnDecl),
    Struct(StructDecl),
}

impl Decl {
    /// The declared identifier.
    pub fn id(&self) -> &Ident {
        match self {
            Decl::Var(decl) => &decl.id,
            Decl::Fn(decl) => &decl.id,
            Decl::Struct(decl) => &decl.id,
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decl::Var(decl) => writeln!(f, "{}", decl),
            Decl::Fn(decl) => write!(f, "{}", decl),
            Decl::Struct(decl) => write!(f, "{}", decl),
        }
    }
}
