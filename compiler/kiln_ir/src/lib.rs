//! Resolved intermediate representation for the Kiln compiler.
//!
//! This crate provides:
//!
//! - **Interning** ([`Name`], [`Interner`]) — compact 32-bit identifiers
//!   for all names in the program.
//! - **Types** ([`TypeId`], [`TypeTable`]) — the resolved type table with
//!   the aggregate-kind and extern queries the middle-end passes need.
//! - **Symbols** ([`SymbolId`], [`SymbolTable`]) — variables and formal
//!   parameters, with their resolved types.
//! - **Functions and bodies** ([`FnId`], [`FnData`], [`Body`], [`Program`]) —
//!   resolved function bodies as arena-allocated statement lists that
//!   support in-place splicing.
//! - **Statements and expressions** ([`Stmt`], [`Expr`], [`Call`]) — the
//!   post-resolution statement forms, including the `move`/`assign`/`return`
//!   primitives that the memory-management passes key off.
//! - **Resolution outputs** ([`AutoDestroyMap`]) — per-type destructor
//!   function handles produced during resolution.
//! - **Diagnostics** ([`Diagnostic`], [`DiagnosticQueue`]) — a small
//!   severity/message/span queue for user-visible warnings and errors.
//!
//! # Design
//!
//! Everything is handle-based: names, types, symbols, functions, and
//! statements are all `u32` newtypes indexing into per-kind tables owned
//! by [`Program`]. Passes that rewrite a body do so through [`Body`]'s
//! splicing API rather than by rebuilding statement vectors, so handles
//! held by an analysis (for example a basic block's statement list)
//! remain valid across insertions.

mod diag;
mod func;
mod ir;
mod name;
mod resolve;
mod span;
mod symbol;
mod types;
pub mod walk;

pub use diag::{Diagnostic, DiagnosticQueue, Severity};
pub use func::{FnData, FnFlags, FnId, Program};
pub use ir::{Body, Call, Callee, Expr, LabelId, Prim, Stmt, StmtId, SymRef};
pub use name::{Interner, Name};
pub use resolve::AutoDestroyMap;
pub use span::Span;
pub use symbol::{SymbolData, SymbolId, SymbolKind, SymbolTable};
pub use types::{TypeData, TypeId, TypeKind, TypeTable};
