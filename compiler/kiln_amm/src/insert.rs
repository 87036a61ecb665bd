//! Auto-destroy placement.
//!
//! After the flow equations settle, each block owes a destructor for
//! every symbol that is owned at the end of its straight-line effect but
//! not demanded by all of its successors:
//!
//! ```text
//! need[b] = (IN[b] ∪ GEN[b]) \ KILL[b] \ DEMAND[b]
//! ```
//!
//! One auto-destroy call is synthesized per set bit and spliced into the
//! block: before the last statement when it is a jump (goto, branch, or
//! `return` — nothing may execute after those), after it otherwise.
//! Within one block, calls land in ascending symbol-index order.

use kiln_ir::{AutoDestroyMap, Body, Call, Expr, Stmt, SymRef, SymbolTable, TypeId};

use crate::bitvec::BitVec;
use crate::cfg::{is_jump, Cfg};
use crate::extract::SymbolIndex;
use crate::transitions::Transitions;

/// Insert the auto-destroy calls every block owes.
///
/// `demand` is the successor-demand refinement from
/// [`successor_demand`](crate::flow::successor_demand). Mutates `body`
/// in place; the block statement lists in `cfg` remain valid because
/// splicing never invalidates statement handles. Returns the number of
/// calls inserted.
#[expect(clippy::too_many_arguments, reason = "pass context is threaded explicitly")]
pub fn place_auto_destroys(
    body: &mut Body,
    cfg: &Cfg,
    trans: &Transitions,
    in_sets: &[BitVec],
    demand: &[BitVec],
    index: &SymbolIndex,
    symbols: &SymbolTable,
    destroy_map: &AutoDestroyMap,
) -> usize {
    let mut inserted = 0;

    for block in &cfg.blocks {
        let idx = block.id.index();
        let mut need = in_sets[idx].union(&trans.gen[idx]);
        need.subtract_with(&trans.kill[idx]);
        need.subtract_with(&demand[idx]);

        let Some(&last) = block.stmts.last() else {
            // Only an empty body produces an empty block; it has
            // GEN = KILL = ∅ and no demand, so it can owe nothing.
            debug_assert!(need.is_zero(), "empty block owes a destructor");
            continue;
        };

        let before_jump = is_jump(body.stmt(last));
        let mut anchor = last;

        for sym_pos in need.iter_ones() {
            let sym = index.symbol(sym_pos);
            let ty = symbols.get(sym).ty;
            let destroy_fn = destroy_map.get(ty);

            let call = Call::to_fn(
                destroy_fn,
                vec![Expr::Sym(SymRef::synthetic(sym))],
                TypeId::UNIT,
            );
            let stmt = body.alloc(Stmt::Expr(Expr::Call(call)));

            if before_jump {
                body.insert_before(last, stmt);
            } else {
                // Chain after the previous insertion so the calls read
                // in ascending index order.
                body.insert_after(anchor, stmt);
                anchor = stmt;
            }
            inserted += 1;
        }
    }

    inserted
}
