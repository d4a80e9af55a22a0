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

//! Type definitions for the Carrot compiler.

use std::fmt;

/// A type in the Carrot language.
///
/// `Error` is the sentinel produced once a problem has been reported. It
/// never compares equal to anything, itself included, so rules that check
/// for a mismatch must test [`Type::is_error`] first.
#[derive(Debug, Clone, Eq)]
pub enum Type {
    /// 32-bit integer.
    Int,
    /// Boolean value.
    Bool,
    /// No value (function results only).
    Void,
    /// String literal.
    String,
    /// An instance of the named struct.
    Struct(String),
    /// The name of a struct definition.
    StructDef(String),
    /// A function signature.
    Function {
        /// Formal parameter types in declaration order.
        params: Vec<Type>,
        /// Declared return type.
        ret: Box<Type>,
    },
    /// A previously diagnosed failure.
    Error,
}

impl Type {
    /// Create a function type.
    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Type::Function {
            params,
            ret: Box::new(ret),
        }
    }

    /// Check if this is the integer type.
    pub fn is_int(&self) -> bool {
        matches!(self, Type::Int)
    }

    /// Check if this is the boolean type.
    pub fn is_bool(&self) -> bool {
        matches!(self, Type::Bool)
    }

    /// Check if this is the void type.
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }

    /// Check if this is the string type.
    pub fn is_string(&self) -> bool {
        matches!(self, Type::String)
    }

    /// Check if this is a function type.
    pub fn is_fn(&self) -> bool {
        matches!(self, Type::Function { .. })
    }

    /// Check if this is a struct instance type.
    pub fn is_struct(&self) -> bool {
        matches!(self, Type::Struct(_))
    }

    /// Check if this is a struct definition (struct name) type.
    pub fn is_struct_def(&self) -> bool {
        matches!(self, Type::StructDef(_))
    }

    /// Check if this is the error sentinel.
    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    /// The return type, for function types.
    pub fn return_type(&self) -> Option<&Type> {
        match self {
            Type::Function { ret, .. } => Some(ret),
            _ => None,
        }
    }

    /// The parameter types, for function types.
    pub fn param_types(&self) -> Option<&[Type]> {
        match self {
            Type::Function { params, .. } => Some(params),
            _ => None,
        }
    }
}

impl PartialEq for Type {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Type::Int, Type::Int)
            | (Type::Bool, Type::Bool)
            | (Type::Void, Type::Void)
            | (Type::String, Type::String) => true,
            (Type::Struct(a), Type::Struct(b)) => a == b,
            (Type::StructDef(a), Type::StructDef(b)) => a == b,
            (
                Type::Function { params: pa, ret: ra },
                Type::Function { params: pb, ret: rb },
            ) => pa == pb && ra == rb,
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Bool => write!(f, "bool"),
            Type::Void => write!(f, "void"),
            Type::String => write!(f, "String"),
            Type::Struct(name) => write!(f, "{}", name),
            Type::StructDef(_) => write!(f, "struct"),
            Type::Function { params, ret } => {
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", param)?;
                }
                write!(f, "->{}", ret)
            }
            Type::Error => write!(f, "error"),
        }
    }
}
