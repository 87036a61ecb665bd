//! Resolved statement and expression forms.
//!
//! After resolution, a function body is a flat, ordered list of
//! statements. Structured control flow has already been lowered to
//! labels, gotos, and conditional branches; assignments and returns are
//! **primitive calls** (`move`, `assign`, `return`) so that every
//! ownership-relevant operation is uniformly a [`Call`].
//!
//! # Splicing
//!
//! Statements live in an arena owned by [`Body`] and are identified by
//! [`StmtId`]. Program order is a separate `Vec<StmtId>`, so passes can
//! splice synthesized statements before or after an existing one without
//! invalidating any [`StmtId`] handle held elsewhere (for example in a
//! basic block's statement list).

use crate::func::FnId;
use crate::span::Span;
use crate::symbol::SymbolId;
use crate::types::TypeId;

/// Index of a statement in a [`Body`]'s arena.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct StmtId(u32);

impl StmtId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        StmtId(raw)
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

/// Jump target label within one function body.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct LabelId(u32);

impl LabelId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        LabelId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Primitive operations that survive resolution as calls.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Prim {
    /// `move lhs, rhs` — initializing store, bitwise for records.
    Move,
    /// `assign lhs, rhs` — re-assigning store, bitwise for records.
    Assign,
    /// `return [value]` — function exit. Nothing executes after it in a
    /// block.
    Return,
    /// Value-yielding representation cast; the result type is the
    /// enclosing call's type.
    Cast,
}

/// What a [`Call`] invokes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Callee {
    /// Resolved call to a known function.
    Fn(FnId),
    /// Unresolved primitive.
    Prim(Prim),
}

/// A reference to a symbol at a particular source location.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct SymRef {
    pub sym: SymbolId,
    pub span: Span,
}

impl SymRef {
    /// A reference with a dummy span, for synthesized code.
    #[inline]
    pub fn synthetic(sym: SymbolId) -> Self {
        SymRef {
            sym,
            span: Span::DUMMY,
        }
    }
}

/// An expression: a symbol reference or a call.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    Sym(SymRef),
    Call(Call),
}

/// A call expression. Resolved IR, so every call knows the type it
/// yields: the callee's return type for resolved calls, the computed
/// result type for primitives.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    pub callee: Callee,
    pub args: Vec<Expr>,
    /// The type this call yields.
    pub ty: TypeId,
}

impl Call {
    /// A resolved call to `func`.
    pub fn to_fn(func: FnId, args: Vec<Expr>, ty: TypeId) -> Self {
        Call {
            callee: Callee::Fn(func),
            args,
            ty,
        }
    }

    /// A primitive call.
    pub fn prim(prim: Prim, args: Vec<Expr>, ty: TypeId) -> Self {
        Call {
            callee: Callee::Prim(prim),
            args,
            ty,
        }
    }

    /// The resolved callee, or `None` for a primitive.
    #[inline]
    pub fn resolved_fn(&self) -> Option<FnId> {
        match self.callee {
            Callee::Fn(f) => Some(f),
            Callee::Prim(_) => None,
        }
    }

    #[inline]
    pub fn is_move(&self) -> bool {
        self.callee == Callee::Prim(Prim::Move)
    }

    #[inline]
    pub fn is_assign(&self) -> bool {
        self.callee == Callee::Prim(Prim::Assign)
    }

    #[inline]
    pub fn is_return(&self) -> bool {
        self.callee == Callee::Prim(Prim::Return)
    }

    /// Operand accessor (zero-based).
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of bounds.
    #[inline]
    pub fn get(&self, i: usize) -> &Expr {
        &self.args[i]
    }
}

/// A resolved statement.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    /// Declaration of a local variable or formal parameter.
    Def(SymbolId),
    /// Expression statement, almost always a [`Call`].
    Expr(Expr),
    /// Jump target.
    Label(LabelId),
    /// Unconditional jump.
    Goto(LabelId),
    /// Conditional jump: `then_label` when `cond` is true, `else_label`
    /// otherwise.
    Branch {
        cond: Expr,
        then_label: LabelId,
        else_label: LabelId,
    },
}

/// A function body: a statement arena plus program order.
///
/// `StmtId`s are stable for the lifetime of the body. Only the order
/// vector changes when statements are spliced in.
#[derive(Clone, Debug, Default)]
pub struct Body {
    stmts: Vec<Stmt>,
    order: Vec<StmtId>,
}

impl Body {
    pub fn new() -> Self {
        Body {
            stmts: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Allocate a statement without placing it in program order.
    ///
    /// Passes use this for synthesized statements that are then spliced
    /// with [`insert_before`](Self::insert_before) or
    /// [`insert_after`](Self::insert_after).
    pub fn alloc(&mut self, stmt: Stmt) -> StmtId {
        let id = u32::try_from(self.stmts.len())
            .unwrap_or_else(|_| panic!("statement count exceeds u32::MAX"));
        self.stmts.push(stmt);
        StmtId::new(id)
    }

    /// Allocate a statement and append it to program order.
    pub fn push(&mut self, stmt: Stmt) -> StmtId {
        let id = self.alloc(stmt);
        self.order.push(id);
        id
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    /// Statements in program order.
    pub fn order(&self) -> &[StmtId] {
        &self.order
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Splice `new` into program order immediately before `target`.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not in program order.
    pub fn insert_before(&mut self, target: StmtId, new: StmtId) {
        let pos = self.position_of(target);
        self.order.insert(pos, new);
    }

    /// Splice `new` into program order immediately after `target`.
    ///
    /// # Panics
    ///
    /// Panics if `target` is not in program order.
    pub fn insert_after(&mut self, target: StmtId, new: StmtId) {
        let pos = self.position_of(target);
        self.order.insert(pos + 1, new);
    }

    fn position_of(&self, target: StmtId) -> usize {
        self.order
            .iter()
            .position(|&s| s == target)
            .unwrap_or_else(|| {
                panic!(
                    "statement #{} is not in program order for this body",
                    target.raw()
                )
            })
    }
}
