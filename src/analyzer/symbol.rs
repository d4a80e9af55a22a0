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

//! Symbol definitions for the semantic analyzer.
//!
//! Symbols live in a [`SymbolArena`] owned by the compilation context.
//! Identifier nodes and scopes refer to them through [`SymbolId`] handles,
//! so a struct instance can point back at its definition without owning it.

use super::symbol_table::SymbolTable;
use crate::error::SourcePos;
use crate::types::Type;
use std::ops::{Index, IndexMut};

/// Size of one machine word in bytes.
pub const WORD_SIZE: i32 = 4;

/// Offset given to every global symbol. Positive offsets mean "global".
pub const GLOBAL_OFFSET: i32 = 1;

/// Handle to a symbol stored in a [`SymbolArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(usize);

impl SymbolId {
    /// Index of the symbol within its arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Symbol table entry.
#[derive(Debug, Clone)]
pub struct Symbol {
    /// The declared name.
    pub name: String,
    /// The symbol type.
    pub ty: Type,
    /// Frame-relative offset for locals and parameters, [`GLOBAL_OFFSET`] for globals.
    pub offset: i32,
    /// What kind of entity this symbol names.
    pub kind: SymbolKind,
    /// Where the symbol was declared.
    pub pos: SourcePos,
}

impl Symbol {
    /// Create a plain variable symbol.
    pub fn variable(name: impl Into<String>, ty: Type, pos: SourcePos) -> Self {
        Self {
            name: name.into(),
            ty,
            offset: GLOBAL_OFFSET,
            kind: SymbolKind::Variable,
            pos,
        }
    }

    /// Create a function symbol whose formals have not been processed yet.
    pub fn function(
        name: impl Into<String>,
        return_type: Type,
        num_params: usize,
        pos: SourcePos,
    ) -> Self {
        Self {
            name: name.into(),
            ty: Type::function(Vec::new(), return_type.clone()),
            offset: GLOBAL_OFFSET,
            kind: SymbolKind::Function(FunctionInfo {
                param_types: Vec::new(),
                return_type,
                num_params,
                params_frame_size: 0,
                locals_frame_size: 0,
            }),
            pos,
        }
    }

    /// Create a struct definition symbol owning its field table.
    pub fn struct_def(name: impl Into<String>, fields: SymbolTable, pos: SourcePos) -> Self {
        let name = name.into();
        Self {
            ty: Type::StructDef(name.clone()),
            name,
            offset: GLOBAL_OFFSET,
            kind: SymbolKind::StructDef { fields },
            pos,
        }
    }

    /// Create a struct instance symbol linked to its definition.
    pub fn struct_instance(
        name: impl Into<String>,
        struct_name: impl Into<String>,
        definition: SymbolId,
        pos: SourcePos,
    ) -> Self {
        Self {
            name: name.into(),
            ty: Type::Struct(struct_name.into()),
            offset: GLOBAL_OFFSET,
            kind: SymbolKind::StructInstance { definition },
            pos,
        }
    }

    /// Check if this symbol lives in the global data region.
    pub fn is_global(&self) -> bool {
        self.offset > 0
    }

    /// Function details, if this is a function symbol.
    pub fn function_info(&self) -> Option<&FunctionInfo> {
        match &self.kind {
            SymbolKind::Function(info) => Some(info),
            _ => None,
        }
    }

    /// The field table, if this is a struct definition symbol.
    pub fn fields(&self) -> Option<&SymbolTable> {
        match &self.kind {
            SymbolKind::StructDef { fields } => Some(fields),
            _ => None,
        }
    }

    /// The linked definition, if this is a struct instance symbol.
    pub fn struct_definition(&self) -> Option<SymbolId> {
        match &self.kind {
            SymbolKind::StructInstance { definition } => Some(*definition),
            _ => None,
        }
    }
}

/// The kind of a symbol.
#[derive(Debug, Clone)]
pub enum SymbolKind {
    /// A variable, parameter or struct field of scalar type.
    Variable,
    /// A function.
    Function(FunctionInfo),
    /// A struct definition with its own field scope.
    StructDef {
        /// Field symbols, filled once when the struct is declared.
        fields: SymbolTable,
    },
    /// A variable of struct type.
    StructInstance {
        /// Back-reference to the struct definition symbol.
        definition: SymbolId,
    },
}

/// Frame and signature data of a function symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    /// Types of the successfully declared formals, in order.
    pub param_types: Vec<Type>,
    /// Declared return type.
    pub return_type: Type,
    /// Number of formals written in the declaration.
    pub num_params: usize,
    /// Bytes occupied by the parameters.
    pub params_frame_size: i32,
    /// Bytes reserved for locals in the prologue.
    pub locals_frame_size: i32,
}

/// Owner of every symbol created during one compilation.
#[derive(Debug, Clone, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a symbol and return its handle.
    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len());
        log::trace!("allocated symbol '{}' as #{}", symbol.name, id.0);
        self.symbols.push(symbol);
        id
    }

    /// Get a symbol by handle.
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.0)
    }

    /// Get a symbol by handle (mutable).
    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.0)
    }

    /// Number of symbols allocated so far.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Check if no symbol was allocated.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterate over all symbols with their handles.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (SymbolId(i), symbol))
    }
}

impl Index<SymbolId> for SymbolArena {
    type Output = Symbol;

    fn index(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }
}

impl IndexMut<SymbolId> for SymbolArena {
    fn index_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0]
    }
}
