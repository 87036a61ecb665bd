//! Expression walking.
//!
//! The ownership passes classify operations by looking at each symbol
//! reference together with its **smallest enclosing call**. This module
//! provides that walk: every [`SymRef`] that is a direct operand of some
//! call is visited exactly once, with the call and the operand position.
//!
//! Symbol references with no enclosing call (for example a bare branch
//! condition) are not visited; no recognizer applies to them.

use crate::ir::{Call, Expr, Stmt, SymRef};

/// Visit every symbol reference under `stmt` that is a direct operand of
/// a call, in source order.
///
/// The callback receives `(enclosing_call, operand_position, sym_ref)`.
/// Nested calls are recursed into, so a reference inside
/// `move x, ctor(y)` is visited with `ctor(..)` as its enclosing call,
/// not the `move`.
pub fn for_each_call_sym_ref<F>(stmt: &Stmt, f: &mut F)
where
    F: FnMut(&Call, usize, &SymRef),
{
    match stmt {
        Stmt::Expr(expr) => walk_expr(expr, f),
        Stmt::Branch { cond, .. } => walk_expr(cond, f),
        Stmt::Def(_) | Stmt::Label(_) | Stmt::Goto(_) => {}
    }
}

fn walk_expr<F>(expr: &Expr, f: &mut F)
where
    F: FnMut(&Call, usize, &SymRef),
{
    match expr {
        // A bare reference has no enclosing call.
        Expr::Sym(_) => {}
        Expr::Call(call) => {
            for (pos, arg) in call.args.iter().enumerate() {
                match arg {
                    Expr::Sym(sym_ref) => f(call, pos, sym_ref),
                    Expr::Call(_) => walk_expr(arg, f),
                }
            }
        }
    }
}
