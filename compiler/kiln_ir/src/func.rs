//! Functions and the whole-program container.

use crate::ir::Body;
use crate::name::{Interner, Name};
use crate::symbol::{SymbolId, SymbolTable};
use crate::types::{TypeId, TypeTable};

/// Index of a function in [`Program::fns`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct FnId(u32);

impl FnId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        FnId(raw)
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

/// Function-level flags set during resolution.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FnFlags {
    /// Declaration only; the function has no body to analyze.
    pub prototype: bool,
    /// This function is a record destructor. Its first argument is the
    /// record being destroyed.
    pub destructor: bool,
}

/// A resolved function.
#[derive(Clone, Debug)]
pub struct FnData {
    pub name: Name,
    /// Formal parameters, in declaration order.
    pub params: Vec<SymbolId>,
    pub return_type: TypeId,
    pub flags: FnFlags,
    /// `None` for prototypes and extern declarations.
    pub body: Option<Body>,
}

/// A fully resolved program: all tables plus every function.
///
/// The tables are separate fields so passes can split-borrow: a pass may
/// hold `&mut` to one function's body while reading the symbol and type
/// tables.
pub struct Program {
    pub interner: Interner,
    pub types: TypeTable,
    pub symbols: SymbolTable,
    pub fns: Vec<FnData>,
}

impl Program {
    pub fn new() -> Self {
        Program {
            interner: Interner::new(),
            types: TypeTable::new(),
            symbols: SymbolTable::new(),
            fns: Vec::new(),
        }
    }

    pub fn add_fn(&mut self, data: FnData) -> FnId {
        let id = u32::try_from(self.fns.len())
            .unwrap_or_else(|_| panic!("function count exceeds u32::MAX"));
        self.fns.push(data);
        FnId::new(id)
    }

    pub fn fn_data(&self, id: FnId) -> &FnData {
        &self.fns[id.index()]
    }
}

impl Default for Program {
    fn default() -> Self {
        Self::new()
    }
}
