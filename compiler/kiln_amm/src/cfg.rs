//! Basic-block construction over resolved statement lists.
//!
//! A resolved body is a flat statement sequence with labels, gotos,
//! conditional branches, and `return` primitives. This module groups the
//! sequence into basic blocks and wires predecessor/successor edges:
//!
//! - a label starts a new block;
//! - `goto`, `branch`, and `return` terminate the block they appear in;
//! - a block that does not end in a jump falls through to the next block
//!   in statement order.
//!
//! Blocks keep their statements as [`StmtId`]s, so the block lists stay
//! valid while a later pass splices synthesized statements into the body.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use kiln_ir::{Body, Expr, LabelId, Stmt, StmtId};

/// Index of a basic block within one function's [`Cfg`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(transparent)]
pub struct BlockId(u32);

impl BlockId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        BlockId(raw)
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

/// A basic block: an ordered statement run plus CFG edges.
#[derive(Debug)]
pub struct BasicBlock {
    pub id: BlockId,
    /// Statements in program order. May be empty (a body with no
    /// statements produces one empty entry block).
    pub stmts: Vec<StmtId>,
    /// Distinct predecessor blocks.
    pub preds: Vec<BlockId>,
    /// Successor blocks. Not deduplicated: a branch whose arms share a
    /// target lists it twice.
    pub succs: SmallVec<[BlockId; 2]>,
}

/// Control-flow graph of one function body.
#[derive(Debug)]
pub struct Cfg {
    pub blocks: Vec<BasicBlock>,
    /// The entry block; always the first block in statement order.
    pub entry: BlockId,
}

impl Cfg {
    pub fn num_blocks(&self) -> usize {
        self.blocks.len()
    }
}

/// Is this statement a jump (control does not fall through past it)?
///
/// Gotos and branches are jumps; so is the `return` primitive, since
/// nothing executes after it.
pub fn is_jump(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Goto(_) | Stmt::Branch { .. } => true,
        Stmt::Expr(Expr::Call(call)) => call.is_return(),
        Stmt::Def(_) | Stmt::Label(_) | Stmt::Expr(Expr::Sym(_)) => false,
    }
}

/// How a raw block run ends, before edges are resolved.
enum Exit {
    Fallthrough,
    Goto(LabelId),
    Branch(LabelId, LabelId),
    Return,
}

/// Build the basic blocks and CFG edges for `body`.
///
/// # Panics
///
/// Panics if a goto or branch targets a label that does not exist in the
/// body; resolution guarantees label targets are defined.
pub fn build_basic_blocks(body: &Body) -> Cfg {
    // Pass 1: split the statement sequence into runs and record, for
    // each run, how it exits and which labels start it.
    let mut runs: Vec<(Vec<StmtId>, Exit)> = Vec::new();
    let mut label_block: FxHashMap<LabelId, usize> = FxHashMap::default();
    let mut current: Vec<StmtId> = Vec::new();

    for &stmt_id in body.order() {
        match body.stmt(stmt_id) {
            Stmt::Label(label) => {
                if !current.is_empty() {
                    runs.push((std::mem::take(&mut current), Exit::Fallthrough));
                }
                label_block.insert(*label, runs.len());
                current.push(stmt_id);
            }
            Stmt::Goto(target) => {
                current.push(stmt_id);
                runs.push((std::mem::take(&mut current), Exit::Goto(*target)));
            }
            Stmt::Branch {
                then_label,
                else_label,
                ..
            } => {
                current.push(stmt_id);
                runs.push((
                    std::mem::take(&mut current),
                    Exit::Branch(*then_label, *else_label),
                ));
            }
            stmt => {
                current.push(stmt_id);
                if is_jump(stmt) {
                    // A return primitive.
                    runs.push((std::mem::take(&mut current), Exit::Return));
                }
            }
        }
    }
    if !current.is_empty() || runs.is_empty() {
        runs.push((current, Exit::Fallthrough));
    }

    // Pass 2: resolve exits to successor edges.
    let num_blocks = runs.len();
    let block_of = |label: LabelId| -> BlockId {
        let idx = label_block.get(&label).copied().unwrap_or_else(|| {
            panic!("jump targets undefined label #{}", label.raw())
        });
        to_block_id(idx)
    };

    let mut blocks: Vec<BasicBlock> = Vec::with_capacity(num_blocks);
    for (idx, (stmts, exit)) in runs.into_iter().enumerate() {
        let mut succs: SmallVec<[BlockId; 2]> = SmallVec::new();
        match exit {
            Exit::Fallthrough => {
                if idx + 1 < num_blocks {
                    succs.push(to_block_id(idx + 1));
                }
            }
            Exit::Goto(target) => succs.push(block_of(target)),
            Exit::Branch(then_label, else_label) => {
                succs.push(block_of(then_label));
                succs.push(block_of(else_label));
            }
            Exit::Return => {}
        }
        blocks.push(BasicBlock {
            id: to_block_id(idx),
            stmts,
            preds: Vec::new(),
            succs,
        });
    }

    // Pass 3: invert successors into deduplicated predecessor lists.
    let mut preds: Vec<Vec<BlockId>> = vec![Vec::new(); num_blocks];
    for block in &blocks {
        let mut seen = FxHashSet::default();
        for &succ in &block.succs {
            if seen.insert(succ) {
                preds[succ.index()].push(block.id);
            }
        }
    }
    for (block, pred_list) in blocks.iter_mut().zip(preds) {
        block.preds = pred_list;
    }

    Cfg {
        blocks,
        entry: BlockId::new(0),
    }
}

/// Postorder traversal of the CFG from the entry block.
///
/// Iterative DFS with an explicit stack; only visits reachable blocks.
/// The dataflow solver iterates the reverse of this for fast forward
/// convergence.
pub(crate) fn compute_postorder(cfg: &Cfg) -> Vec<usize> {
    let num_blocks = cfg.blocks.len();
    let mut visited = vec![false; num_blocks];
    let mut postorder = Vec::with_capacity(num_blocks);

    // Stack entries: (block_index, children_processed).
    let mut stack: Vec<(usize, bool)> = vec![(cfg.entry.index(), false)];

    while let Some(&mut (block_idx, ref mut children_done)) = stack.last_mut() {
        if *children_done {
            postorder.push(block_idx);
            stack.pop();
            continue;
        }

        *children_done = true;

        if visited[block_idx] {
            stack.pop();
            continue;
        }
        visited[block_idx] = true;

        for &succ in &cfg.blocks[block_idx].succs {
            if !visited[succ.index()] {
                stack.push((succ.index(), false));
            }
        }
    }

    postorder
}

fn to_block_id(idx: usize) -> BlockId {
    BlockId::new(u32::try_from(idx).unwrap_or_else(|_| panic!("block count exceeds u32::MAX")))
}
