//! Per-block ownership transitions.
//!
//! For every basic block this module computes:
//!
//! - `GEN` — symbols whose ownership transitions to true in the block
//!   (constructed, or bitwise-copied from an owned source);
//! - `KILL` — symbols whose ownership transitions to false in the block
//!   (destroyed, or returned out of the function).
//!
//! Three recognizers run on every tracked symbol reference, in order and
//! with no early exit; each is independently additive:
//!
//! 1. **Construction** — `move`/`assign` whose left operand is the
//!    reference and whose right operand is a call yielding a
//!    fully-constructed record value.
//! 2. **Bitwise move** — `move`/`assign` whose right operand is a bare
//!    reference to another tracked symbol. Duplicates pointer fields
//!    verbatim, so the two symbols join one alias clique.
//! 3. **Destruction** — a call to a destructor-flagged function with the
//!    reference as receiver, or a `return` primitive taking the
//!    reference. Returns consume ownership exactly like destruction.
//!
//! The recognizers are structurally disjoint; a debug assertion checks
//! that at most one fires per reference.
//!
//! When a constructor and a destructor for the same symbol land in one
//! block, both bits end up set and the flow equation's GEN precedence
//! resolves the exit state. In the opposite order, destruction followed
//! by reconstruction, the construction recognizer undoes the kill: the
//! block's net effect is that the symbol is owned again.

use kiln_ir::{
    Body, Call, DiagnosticQueue, Expr, FnData, Interner, SymbolId, SymbolTable, TypeTable,
};

use crate::alias::AliasMap;
use crate::bitvec::BitVec;
use crate::cfg::Cfg;
use crate::extract::SymbolIndex;
use crate::AnalysisOptions;

/// Per-block `GEN`/`KILL` sets, indexed by block.
pub struct Transitions {
    pub gen: Vec<BitVec>,
    pub kill: Vec<BitVec>,
}

/// Scan every block of `body` and classify ownership transitions.
///
/// Alias cliques accumulate across the whole function as the scan
/// proceeds in block order; `aliases` is updated in place.
///
/// # Panics
///
/// Panics on ill-formed input: a symbol constructed twice in one block
/// without an intervening destruction, a symbol destroyed twice in one
/// block, or a tracked symbol passed to a destructor in a non-receiver
/// position. These indicate upstream bugs.
#[expect(clippy::too_many_arguments, reason = "pass context is threaded explicitly")]
pub fn compute_transitions(
    body: &Body,
    cfg: &Cfg,
    fns: &[FnData],
    types: &TypeTable,
    symbols: &SymbolTable,
    interner: &Interner,
    index: &SymbolIndex,
    aliases: &mut AliasMap,
    options: &AnalysisOptions,
    queue: &mut DiagnosticQueue,
) -> Transitions {
    let num_symbols = index.len();
    let mut gen_sets: Vec<BitVec> = Vec::with_capacity(cfg.num_blocks());
    let mut kill_sets: Vec<BitVec> = Vec::with_capacity(cfg.num_blocks());

    for block in &cfg.blocks {
        let mut gen = BitVec::new(num_symbols);
        let mut kill = BitVec::new(num_symbols);

        for &stmt_id in &block.stmts {
            kiln_ir::walk::for_each_call_sym_ref(body.stmt(stmt_id), &mut |call, pos, sym_ref| {
                // Only tracked symbols participate.
                let Some(sym_idx) = index.lookup(sym_ref.sym) else {
                    return;
                };

                let mut fired = 0u32;
                fired += u32::from(recognize_construction(
                    call, pos, sym_idx, fns, types, symbols, interner, index, &mut gen, &mut kill,
                ));
                fired += u32::from(recognize_bitwise_move(
                    call, pos, sym_idx, symbols, interner, index, aliases, &mut gen, options,
                    queue,
                ));
                fired += u32::from(recognize_destruction(
                    call, pos, sym_idx, fns, symbols, interner, index, aliases, &mut kill,
                ));
                debug_assert!(
                    fired <= 1,
                    "multiple ownership recognizers fired for one reference to {}",
                    describe(sym_ref.sym, symbols, interner)
                );
            });
        }

        gen_sets.push(gen);
        kill_sets.push(kill);
    }

    Transitions {
        gen: gen_sets,
        kill: kill_sets,
    }
}

/// Does this call yield a fully-constructed record value?
///
/// True unless the call resolves to a function returning a class type,
/// or is a primitive whose result type is a class type. Any call
/// producing a value counts as a constructor for ownership purposes.
fn yields_constructed_value(call: &Call, fns: &[FnData], types: &TypeTable) -> bool {
    match call.resolved_fn() {
        Some(f) => !types.is_class_aggregate(fns[f.index()].return_type),
        None => !types.is_class_aggregate(call.ty),
    }
}

/// Recognizer 1: `move lhs, ctor(...)`.
#[expect(clippy::too_many_arguments, reason = "pass context is threaded explicitly")]
fn recognize_construction(
    call: &Call,
    pos: usize,
    sym_idx: usize,
    fns: &[FnData],
    types: &TypeTable,
    symbols: &SymbolTable,
    interner: &Interner,
    index: &SymbolIndex,
    gen: &mut BitVec,
    kill: &mut BitVec,
) -> bool {
    if !(call.is_move() || call.is_assign()) || pos != 0 {
        return false;
    }
    let [_, Expr::Call(rhs)] = call.args.as_slice() else {
        return false;
    };
    if !yields_constructed_value(rhs, fns, types) {
        return false;
    }

    if kill.get(sym_idx) {
        // Reconstruction after a destruction earlier in this block:
        // the net effect of the block is that the symbol is owned
        // again, so the earlier kill is undone.
        kill.clear(sym_idx);
    } else {
        // Otherwise a symbol is constructed at most once per block;
        // reconstruction without an intervening destruction is
        // ill-formed input.
        assert!(
            !gen.get(sym_idx),
            "symbol {} is constructed twice in one block without an intervening destruction",
            describe(index.symbol(sym_idx), symbols, interner)
        );
        gen.set(sym_idx);
    }
    true
}

/// Recognizer 2: `move lhs, rhs` with a bare tracked symbol on the right.
#[expect(clippy::too_many_arguments, reason = "pass context is threaded explicitly")]
fn recognize_bitwise_move(
    call: &Call,
    pos: usize,
    sym_idx: usize,
    symbols: &SymbolTable,
    interner: &Interner,
    index: &SymbolIndex,
    aliases: &mut AliasMap,
    gen: &mut BitVec,
    options: &AnalysisOptions,
    queue: &mut DiagnosticQueue,
) -> bool {
    if !(call.is_move() || call.is_assign()) || pos != 0 {
        return false;
    }
    let [_, Expr::Sym(rhs_ref)] = call.args.as_slice() else {
        return false;
    };
    let Some(rhs_idx) = index.lookup(rhs_ref.sym) else {
        return false;
    };

    assert!(
        !gen.get(sym_idx),
        "symbol {} is constructed twice in one block",
        describe(index.symbol(sym_idx), symbols, interner)
    );

    // Ownership state is copied from the source. Copying from an
    // unowned source leaves the destination unowned.
    if gen.get(rhs_idx) {
        gen.set(sym_idx);
    } else if options.warn_on_uninit_copy {
        queue.warn(rhs_ref.span, "uninitialized symbol is copied here");
    }

    // Merge whether or not the source is owned: the pointer fields are
    // identical either way. For an unowned source this leaves a clique
    // whose shared heap state never existed.
    aliases.merge(rhs_idx, sym_idx);
    true
}

/// Recognizer 3: destructor call or `return` primitive.
#[expect(clippy::too_many_arguments, reason = "pass context is threaded explicitly")]
fn recognize_destruction(
    call: &Call,
    pos: usize,
    sym_idx: usize,
    fns: &[FnData],
    symbols: &SymbolTable,
    interner: &Interner,
    index: &SymbolIndex,
    aliases: &AliasMap,
    kill: &mut BitVec,
) -> bool {
    let is_destructor_call = call
        .resolved_fn()
        .is_some_and(|f| fns[f.index()].flags.destructor);

    if is_destructor_call {
        // The tracked symbol must be the thing being destroyed.
        assert!(
            pos == 0,
            "symbol {} appears in a destructor call but is not the receiver",
            describe(index.symbol(sym_idx), symbols, interner)
        );
    } else if !call.is_return() {
        return false;
    }

    // Destroying any member of an alias clique ends ownership for the
    // whole clique.
    for member in aliases.members(sym_idx) {
        assert!(
            !kill.get(member),
            "symbol {} is destroyed twice in one block",
            describe(index.symbol(member), symbols, interner)
        );
        kill.set(member);
    }
    true
}

fn describe(sym: SymbolId, symbols: &SymbolTable, interner: &Interner) -> String {
    format!("`{}` (#{})", interner.resolve(symbols.get(sym).name), sym.raw())
}
