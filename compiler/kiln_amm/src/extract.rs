//! Tracked-symbol extraction.
//!
//! Ownership analysis tracks locals and formal parameters of record
//! type. Each tracked symbol gets a dense index so the flow sets can be
//! bit-vectors; the index is fixed for the duration of one function's
//! analysis.
//!
//! Excluded, and why:
//!
//! - **class-typed variables** — the referent is managed elsewhere; the
//!   variable itself is a plain pointer with no destructor obligation;
//! - **primitive-typed variables** — no heap state;
//! - **extern record types** — no constructor/destructor contract is
//!   exposed to the compiler.

use rustc_hash::FxHashMap;

use kiln_ir::{FnData, Stmt, SymbolId, SymbolTable, TypeTable};

use crate::alias::AliasMap;

/// Dense index over one function's tracked symbols.
///
/// `symbols[i]` and `index_of` are inverse: bit position `i` in every
/// flow set refers to `symbols(i)`.
pub struct SymbolIndex {
    symbols: Vec<SymbolId>,
    index: FxHashMap<SymbolId, usize>,
}

impl SymbolIndex {
    /// Number of tracked symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The symbol at dense index `i`.
    pub fn symbol(&self, i: usize) -> SymbolId {
        self.symbols[i]
    }

    /// Dense index of `sym`, or `None` if it is not tracked.
    pub fn lookup(&self, sym: SymbolId) -> Option<usize> {
        self.index.get(&sym).copied()
    }

    /// Dense index of `sym`.
    ///
    /// # Panics
    ///
    /// Panics if `sym` is not tracked; callers that may see untracked
    /// symbols use [`lookup`](Self::lookup).
    pub fn index_of(&self, sym: SymbolId) -> usize {
        self.lookup(sym)
            .unwrap_or_else(|| panic!("symbol #{} is not tracked by this analysis", sym.raw()))
    }

    /// Tracked symbols in dense-index order.
    pub fn iter(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.symbols.iter().copied()
    }

    fn insert(&mut self, sym: SymbolId) {
        let dense = self.symbols.len();
        let previous = self.index.insert(sym, dense);
        assert!(
            previous.is_none(),
            "symbol #{} is defined twice in one function",
            sym.raw()
        );
        self.symbols.push(sym);
        // The two views must stay inverse.
        assert!(self.symbols[self.index[&sym]] == sym);
    }
}

/// Select the tracked symbols of `func` and initialize their alias map.
///
/// Walks the formal parameters, then every `Def` in the body, admitting
/// each local-or-parameter symbol whose type is a non-extern record
/// aggregate. Returns the dense index and an alias map with every
/// tracked symbol in its own singleton clique.
pub fn extract_symbols(
    func: &FnData,
    symbols: &SymbolTable,
    types: &TypeTable,
) -> (SymbolIndex, AliasMap) {
    let mut index = SymbolIndex {
        symbols: Vec::new(),
        index: FxHashMap::default(),
    };

    let mut admit = |sym: SymbolId| {
        let data = symbols.get(sym);
        if !data.is_local_or_param() {
            return;
        }
        if types.is_extern(data.ty) {
            return;
        }
        if !types.is_record_aggregate(data.ty) {
            return;
        }
        index.insert(sym);
    };

    for &param in &func.params {
        admit(param);
    }
    if let Some(body) = func.body.as_ref() {
        for &stmt_id in body.order() {
            if let Stmt::Def(sym) = body.stmt(stmt_id) {
                admit(*sym);
            }
        }
    }

    let aliases = AliasMap::new(index.len());
    (index, aliases)
}
