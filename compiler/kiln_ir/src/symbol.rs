//! Variable and parameter symbols.

use crate::name::Name;
use crate::span::Span;
use crate::types::TypeId;

/// Index of a symbol in the [`SymbolTable`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        SymbolId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What kind of binding a symbol is.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum SymbolKind {
    /// Formal parameter of a function.
    Param,
    /// Function-local variable (including compiler temporaries).
    Local,
    /// Module-level variable.
    Global,
}

/// A resolved symbol: name, type, binding kind, declaration site.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SymbolData {
    pub name: Name,
    pub ty: TypeId,
    pub kind: SymbolKind,
    pub span: Span,
}

impl SymbolData {
    /// Is this a function-local binding (local variable or formal parameter)?
    #[inline]
    pub fn is_local_or_param(&self) -> bool {
        matches!(self.kind, SymbolKind::Param | SymbolKind::Local)
    }
}

/// Arena of all symbols in a program.
pub struct SymbolTable {
    symbols: Vec<SymbolData>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable {
            symbols: Vec::new(),
        }
    }

    pub fn add(&mut self, data: SymbolData) -> SymbolId {
        let id = u32::try_from(self.symbols.len())
            .unwrap_or_else(|_| panic!("symbol count exceeds u32::MAX"));
        self.symbols.push(data);
        SymbolId::new(id)
    }

    pub fn get(&self, id: SymbolId) -> &SymbolData {
        &self.symbols[id.index()]
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
