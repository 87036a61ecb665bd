//! Ownership analysis and auto-destroy insertion for the Kiln compiler.
//!
//! Records are value types whose fields may transitively own heap
//! resources. After a record variable is constructed it **owns** that
//! heap state; calling its destructor releases it. A bitwise copy
//! (`move y, x`) duplicates the pointer fields verbatim, so the copies
//! share one heap state and exactly one of them may be destroyed.
//!
//! This crate inserts the minimum number of auto-destroy calls so that
//! on every path out of a function, every local record has released its
//! owned resources exactly once:
//!
//! 1. **Extraction** ([`extract`]) — select the tracked symbols (locals
//!    and parameters of non-extern record type) and assign dense indices.
//! 2. **Transition scan** ([`transitions`]) — classify every tracked
//!    symbol reference as construction, bitwise move, or destruction,
//!    producing per-block `GEN`/`KILL` bit-vectors and merging alias
//!    cliques ([`alias`]).
//! 3. **Dataflow** ([`flow`]) — solve `IN = ⋂ OUT[preds]`,
//!    `OUT = (IN \ KILL) ∪ GEN` to fixpoint over the basic blocks
//!    ([`cfg`]), then refine each block's exit obligation to what its
//!    successors actually demand, `⋂ IN[succs]`.
//! 4. **Placement** ([`insert`]) — each block destroys
//!    `(IN ∪ GEN) \ KILL \ DEMAND`, immediately before its terminating
//!    jump or else at block end.
//!
//! Auto-copy insertion is assumed to have already run: the input IR
//! carries its full complement of copy-constructor calls, and this pass
//! only drives ownership of every local to false before function exit.
//!
//! # References
//!
//! - Appel, "Modern Compiler Implementation" §10.1 (bit-vector dataflow)
//! - Aho/Lam/Sethi/Ullman, "Compilers" §9.2 (gen/kill frameworks)

pub mod alias;
pub mod bitvec;
pub mod cfg;
pub mod extract;
pub mod flow;
pub mod insert;
pub mod transitions;

#[cfg(test)]
pub(crate) mod test_helpers;

use kiln_ir::{AutoDestroyMap, DiagnosticQueue, Program};

pub use alias::AliasMap;
pub use bitvec::BitVec;
pub use cfg::{build_basic_blocks, is_jump, BasicBlock, BlockId, Cfg};
pub use extract::{extract_symbols, SymbolIndex};
pub use flow::{forward_flow_analysis, successor_demand};
pub use insert::place_auto_destroys;
pub use transitions::{compute_transitions, Transitions};

/// Configuration for ownership analysis.
#[derive(Copy, Clone, Debug, Default)]
pub struct AnalysisOptions {
    /// Warn when a bitwise copy reads from a symbol that was never
    /// constructed. Off by default.
    pub warn_on_uninit_copy: bool,
}

/// Insert auto-copy and auto-destroy calls across the whole program.
///
/// All required auto-copy calls are assumed present in the input, so
/// this currently performs auto-destroy insertion only: every function
/// with a body is analyzed and rewritten in place. Prototype-flagged
/// functions are skipped unchanged.
///
/// `destroy_map` must cover every non-extern record type the program
/// uses (guaranteed by resolution). Ownership warnings, if enabled, are
/// pushed onto `queue`.
pub fn insert_auto_copy_auto_destroy(
    program: &mut Program,
    destroy_map: &AutoDestroyMap,
    options: &AnalysisOptions,
    queue: &mut DiagnosticQueue,
) {
    for fn_idx in 0..program.fns.len() {
        let func = &program.fns[fn_idx];
        if func.flags.prototype || func.body.is_none() {
            continue;
        }
        insert_auto_destroy(program, fn_idx, destroy_map, options, queue);
    }
}

/// Analyze one function and splice in its auto-destroy calls.
///
/// All analysis state (basic blocks, symbol index, alias map, flow sets)
/// is scoped to this call and released on return; only the inserted
/// calls persist in the IR.
fn insert_auto_destroy(
    program: &mut Program,
    fn_idx: usize,
    destroy_map: &AutoDestroyMap,
    options: &AnalysisOptions,
    queue: &mut DiagnosticQueue,
) {
    // Analysis phase: shared borrows of the program.
    let (cfg, trans, in_sets, demand, index) = {
        let Program {
            interner,
            types,
            symbols,
            fns,
        } = &*program;
        let func = &fns[fn_idx];
        let Some(body) = func.body.as_ref() else {
            return;
        };

        let cfg = build_basic_blocks(body);
        let (index, mut aliases) = extract_symbols(func, symbols, types);

        tracing::debug!(
            function = interner.resolve(func.name),
            num_blocks = cfg.num_blocks(),
            num_symbols = index.len(),
            "inserting auto-destroy calls"
        );

        let trans = compute_transitions(
            body, &cfg, fns, types, symbols, interner, &index, &mut aliases, options, queue,
        );
        let (in_sets, _out_sets) = forward_flow_analysis(&cfg, &trans.gen, &trans.kill);
        let demand = successor_demand(&cfg, &in_sets, index.len());

        (cfg, trans, in_sets, demand, index)
    };

    // Mutation phase: splice the owed destructor calls into the body.
    let Program { symbols, fns, .. } = program;
    if let Some(body) = fns[fn_idx].body.as_mut() {
        let inserted = place_auto_destroys(
            body, &cfg, &trans, &in_sets, &demand, &index, symbols, destroy_map,
        );
        tracing::debug!(inserted, "auto-destroy placement complete");
    }
}
