//! Ownership dataflow.
//!
//! Two steps over the per-block `GEN`/`KILL` sets.
//!
//! **Forward fixpoint** ([`forward_flow_analysis`]) establishes what each
//! block can rely on at entry:
//!
//! ```text
//! IN[entry] = ∅
//! IN[b]     = ⋂ OUT[p]              over predecessors p of b
//! OUT[b]    = (IN[b] \ KILL[b]) ∪ GEN[b]
//! ```
//!
//! A symbol owned on only some predecessors cannot flow in, which is
//! what pushes destructor obligations back up the graph: if one path
//! consumes ownership, every other path must consume it too, before the
//! join. Intersection over an empty predecessor set is ∅, so a block
//! with no predecessors behaves like the entry. GEN takes precedence
//! over KILL in `OUT`: a block that destroys and then reconstructs a
//! symbol leaves it owned at exit.
//!
//! **Successor demand** ([`successor_demand`]) then refines, in one
//! backward pass, what each block's successors actually require:
//!
//! ```text
//! DEMAND[b] = ⋂ IN[s]               over successors s of b
//! ```
//!
//! An exit block demands nothing. Placement destroys exactly the gap
//! between what a block holds at its end and what its successors demand;
//! no information propagates backward through blocks, so a single pass
//! suffices.
//!
//! The forward step is a *must* analysis, so `OUT` starts at the
//! all-ones top element and iteration descends to the greatest fixpoint;
//! starting from ∅ would wrongly drop ownership around loop back edges.
//! Termination: the lattice is finite and the transfer function is
//! monotone, so iteration in reverse postorder converges.

use crate::bitvec::BitVec;
use crate::cfg::{compute_postorder, Cfg};

/// Solve the forward flow equations for every block.
///
/// `gen` and `kill` are indexed by block; all bit-vectors share one
/// length (the tracked-symbol count). Returns `(in, out)` with the same
/// indexing. Blocks unreachable from the entry are still solved (their
/// `IN` is ∅, like the entry's).
pub fn forward_flow_analysis(
    cfg: &Cfg,
    gen: &[BitVec],
    kill: &[BitVec],
) -> (Vec<BitVec>, Vec<BitVec>) {
    let num_blocks = cfg.num_blocks();
    debug_assert_eq!(gen.len(), num_blocks);
    debug_assert_eq!(kill.len(), num_blocks);
    let num_symbols = gen.first().map_or(0, BitVec::len);

    // Reverse postorder converges quickly for a forward problem.
    // Unreachable blocks are appended so their equations are solved too.
    let mut order = compute_postorder(cfg);
    order.reverse();
    let mut seen = vec![false; num_blocks];
    for &idx in &order {
        seen[idx] = true;
    }
    for idx in 0..num_blocks {
        if !seen[idx] {
            order.push(idx);
        }
    }

    // Optimistic initialization: everything starts owned everywhere and
    // the iteration removes what cannot be relied on.
    let mut in_sets: Vec<BitVec> = (0..num_blocks)
        .map(|_| BitVec::new_filled(num_symbols))
        .collect();
    let mut out_sets: Vec<BitVec> = (0..num_blocks)
        .map(|_| BitVec::new_filled(num_symbols))
        .collect();

    let entry_idx = cfg.entry.index();
    let mut iteration = 0u32;
    loop {
        iteration += 1;
        let mut changed = false;

        for &block_idx in &order {
            // IN[b] = ⋂ OUT[p]; the entry is pinned to ∅, as is any
            // block with no predecessors.
            let preds = &cfg.blocks[block_idx].preds;
            let mut new_in = BitVec::new(num_symbols);
            if block_idx != entry_idx {
                if let Some((&first, rest)) = preds.split_first() {
                    new_in = out_sets[first.index()].clone();
                    for &pred in rest {
                        new_in.intersect_with(&out_sets[pred.index()]);
                    }
                }
            }

            // OUT[b] = (IN[b] \ KILL[b]) ∪ GEN[b]
            let mut new_out = new_in.difference(&kill[block_idx]);
            new_out.union_with(&gen[block_idx]);

            if new_in != in_sets[block_idx] || new_out != out_sets[block_idx] {
                changed = true;
                in_sets[block_idx] = new_in;
                out_sets[block_idx] = new_out;
            }
        }

        if !changed {
            break;
        }
    }

    tracing::debug!(iterations = iteration, "ownership flow converged");

    (in_sets, out_sets)
}

/// Compute what each block's successors demand: `⋂ IN[s]` over the
/// successors of `b`, or ∅ for an exit block.
///
/// A symbol a block holds at its end but that is absent here must be
/// destroyed inside the block.
pub fn successor_demand(cfg: &Cfg, in_sets: &[BitVec], num_symbols: usize) -> Vec<BitVec> {
    cfg.blocks
        .iter()
        .map(|block| {
            let mut demand = BitVec::new(num_symbols);
            if let Some((&first, rest)) = block.succs.split_first() {
                demand = in_sets[first.index()].clone();
                for &succ in rest {
                    demand.intersect_with(&in_sets[succ.index()]);
                }
            }
            demand
        })
        .collect()
}
