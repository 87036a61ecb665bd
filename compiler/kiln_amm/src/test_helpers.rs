//! Shared test utilities for the ownership pass.
//!
//! Builds a minimal resolved program with one record type `R`, its
//! constructor, destructor, and auto-destroy function, plus helpers to
//! assemble function bodies statement by statement. Only compiled in
//! test builds.

use kiln_ir::{
    AutoDestroyMap, Body, Call, DiagnosticQueue, Expr, FnData, FnFlags, FnId, LabelId, Prim,
    Program, Span, Stmt, SymRef, SymbolData, SymbolId, SymbolKind, TypeId,
};

use crate::{insert_auto_copy_auto_destroy, AnalysisOptions};

/// A program seeded with a record type and its lifecycle functions.
pub(crate) struct Fixture {
    pub program: Program,
    pub destroy_map: AutoDestroyMap,
    /// Record type `R`.
    pub rec: TypeId,
    /// An extern record type.
    pub ext: TypeId,
    /// A class (reference) type.
    pub class: TypeId,
    /// `fn make_r() -> R`, prototype.
    pub ctor: FnId,
    /// `fn make_c() -> C`, prototype; returns a class value.
    pub class_new: FnId,
    /// `fn ~R(R)`, prototype, destructor-flagged.
    pub dtor: FnId,
    /// `fn auto_destroy_r(R)`, prototype; the auto-destroy hook for `R`.
    pub destroy: FnId,
}

impl Fixture {
    pub fn new() -> Self {
        let mut program = Program::new();

        let rec_name = program.interner.intern("R");
        let ext_name = program.interner.intern("ExternR");
        let class_name = program.interner.intern("C");
        let rec = program.types.add_record(rec_name);
        let ext = program.types.add_extern_record(ext_name);
        let class = program.types.add_class(class_name);

        let prototype = |program: &mut Program, name: &str, ret: TypeId, destructor: bool| {
            let name = program.interner.intern(name);
            program.add_fn(FnData {
                name,
                params: Vec::new(),
                return_type: ret,
                flags: FnFlags {
                    prototype: true,
                    destructor,
                },
                body: None,
            })
        };

        let ctor = prototype(&mut program, "make_r", rec, false);
        let class_new = prototype(&mut program, "make_c", class, false);
        let dtor = prototype(&mut program, "~R", TypeId::UNIT, true);
        // Auto-destroy hooks are destructor-flagged wrappers, so calls the
        // pass itself inserted are recognized as destructions on a re-run.
        let destroy = prototype(&mut program, "auto_destroy_r", TypeId::UNIT, true);

        let mut destroy_map = AutoDestroyMap::new();
        destroy_map.insert(rec, destroy);

        Fixture {
            program,
            destroy_map,
            rec,
            ext,
            class,
            ctor,
            class_new,
            dtor,
            destroy,
        }
    }

    fn symbol(&mut self, name: &str, ty: TypeId, kind: SymbolKind) -> SymbolId {
        let name = self.program.interner.intern(name);
        self.program.symbols.add(SymbolData {
            name,
            ty,
            kind,
            span: Span::DUMMY,
        })
    }

    /// A record-typed local.
    pub fn local(&mut self, name: &str) -> SymbolId {
        self.symbol(name, self.rec, SymbolKind::Local)
    }

    /// A local of an arbitrary type.
    pub fn local_of(&mut self, name: &str, ty: TypeId) -> SymbolId {
        self.symbol(name, ty, SymbolKind::Local)
    }

    /// A record-typed formal parameter.
    pub fn param(&mut self, name: &str) -> SymbolId {
        self.symbol(name, self.rec, SymbolKind::Param)
    }

    /// `move lhs, make_r()` — construction.
    pub fn construct(&self, body: &mut Body, lhs: SymbolId) {
        let ctor_call = Call::to_fn(self.ctor, Vec::new(), self.rec);
        store(body, lhs, Expr::Call(ctor_call));
    }

    /// `move lhs, make_c()` — class-returning call; not a construction.
    pub fn construct_class(&self, body: &mut Body, lhs: SymbolId) {
        let call = Call::to_fn(self.class_new, Vec::new(), self.class);
        store(body, lhs, Expr::Call(call));
    }

    /// `move lhs, cast(rhs)` — unresolved primitive yielding a record.
    pub fn construct_prim(&self, body: &mut Body, lhs: SymbolId, rhs: SymbolId) {
        let cast = Call::prim(Prim::Cast, vec![sym(rhs)], self.rec);
        store(body, lhs, Expr::Call(cast));
    }

    /// `move lhs, rhs` — bitwise copy.
    pub fn copy(&self, body: &mut Body, lhs: SymbolId, rhs: SymbolId) {
        store(body, lhs, sym(rhs));
    }

    /// Bitwise copy with an explicit span on the source reference, for
    /// warning-anchor assertions.
    pub fn copy_at(&self, body: &mut Body, lhs: SymbolId, rhs: SymbolId, span: Span) {
        store(body, lhs, Expr::Sym(SymRef { sym: rhs, span }));
    }

    /// `~R(x)` — explicit destructor call.
    pub fn destroy_call(&self, body: &mut Body, x: SymbolId) {
        let call = Call::to_fn(self.dtor, vec![sym(x)], TypeId::UNIT);
        body.push(Stmt::Expr(Expr::Call(call)));
    }

    /// Register a function under test (unit return, no flags).
    pub fn define_fn(&mut self, name: &str, params: Vec<SymbolId>, body: Body) -> FnId {
        let name = self.program.interner.intern(name);
        self.program.add_fn(FnData {
            name,
            params,
            return_type: TypeId::UNIT,
            flags: FnFlags::default(),
            body: Some(body),
        })
    }

    /// Run the pass over the whole program with the given options.
    pub fn run_with(&mut self, options: AnalysisOptions) -> DiagnosticQueue {
        let mut queue = DiagnosticQueue::new();
        insert_auto_copy_auto_destroy(&mut self.program, &self.destroy_map, &options, &mut queue);
        queue
    }

    /// Run the pass with default options.
    pub fn run(&mut self) -> DiagnosticQueue {
        self.run_with(AnalysisOptions::default())
    }

    /// `(position-in-order, target-symbol)` of every auto-destroy call
    /// in `func`'s body, in statement order.
    pub fn destroy_calls(&self, func: FnId) -> Vec<(usize, SymbolId)> {
        let body = self.body(func);
        let mut calls = Vec::new();
        for (pos, &stmt_id) in body.order().iter().enumerate() {
            if let Stmt::Expr(Expr::Call(call)) = body.stmt(stmt_id) {
                if call.resolved_fn() == Some(self.destroy) {
                    let Expr::Sym(target) = call.get(0) else {
                        panic!("auto-destroy call without a symbol operand");
                    };
                    calls.push((pos, target.sym));
                }
            }
        }
        calls
    }

    pub fn count_destroys(&self, func: FnId) -> usize {
        self.destroy_calls(func).len()
    }

    pub fn body(&self, func: FnId) -> &Body {
        self.program.fns[func.index()]
            .body
            .as_ref()
            .expect("function under test has a body")
    }

    /// Position of the first `return` primitive in `func`'s body.
    pub fn return_position(&self, func: FnId) -> usize {
        let body = self.body(func);
        body.order()
            .iter()
            .position(|&stmt_id| match body.stmt(stmt_id) {
                Stmt::Expr(Expr::Call(call)) => call.is_return(),
                _ => false,
            })
            .expect("function under test has a return")
    }
}

/// A symbol reference expression with a dummy span.
pub(crate) fn sym(s: SymbolId) -> Expr {
    Expr::Sym(SymRef::synthetic(s))
}

/// `move lhs, rhs-expr`.
pub(crate) fn store(body: &mut Body, lhs: SymbolId, rhs: Expr) {
    let call = Call::prim(Prim::Move, vec![sym(lhs), rhs], TypeId::UNIT);
    body.push(Stmt::Expr(Expr::Call(call)));
}

/// Declare a local in the body.
pub(crate) fn def(body: &mut Body, s: SymbolId) {
    body.push(Stmt::Def(s));
}

pub(crate) fn label(body: &mut Body, l: u32) {
    body.push(Stmt::Label(LabelId::new(l)));
}

pub(crate) fn goto(body: &mut Body, l: u32) {
    body.push(Stmt::Goto(LabelId::new(l)));
}

/// `branch cond, then_label, else_label`.
pub(crate) fn branch(body: &mut Body, cond: SymbolId, then_l: u32, else_l: u32) {
    body.push(Stmt::Branch {
        cond: sym(cond),
        then_label: LabelId::new(then_l),
        else_label: LabelId::new(else_l),
    });
}

/// `return` with no value.
pub(crate) fn ret(body: &mut Body) {
    let call = Call::prim(Prim::Return, Vec::new(), TypeId::UNIT);
    body.push(Stmt::Expr(Expr::Call(call)));
}

/// `return x`.
pub(crate) fn ret_val(body: &mut Body, x: SymbolId) {
    let call = Call::prim(Prim::Return, vec![sym(x)], TypeId::UNIT);
    body.push(Stmt::Expr(Expr::Call(call)));
}
