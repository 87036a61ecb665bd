//! Resolution outputs consumed by later passes.

use rustc_hash::FxHashMap;

use crate::func::FnId;
use crate::types::TypeId;

/// Per-type auto-destroy function handles, produced during resolution.
///
/// Resolution guarantees an entry for every non-extern record type in the
/// program, so a missing entry during a later pass is a compiler bug, not
/// a user error. The registered functions are destructor-flagged wrappers
/// around the user's destructor plus field cleanup.
#[derive(Debug, Default)]
pub struct AutoDestroyMap {
    map: FxHashMap<TypeId, FnId>,
}

impl AutoDestroyMap {
    pub fn new() -> Self {
        AutoDestroyMap {
            map: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, ty: TypeId, func: FnId) {
        self.map.insert(ty, func);
    }

    /// The auto-destroy function for `ty`.
    ///
    /// # Panics
    ///
    /// Panics if no entry exists; see the totality guarantee above.
    pub fn get(&self, ty: TypeId) -> FnId {
        self.lookup(ty).unwrap_or_else(|| {
            panic!("no auto-destroy function registered for type #{}", ty.raw())
        })
    }

    pub fn lookup(&self, ty: TypeId) -> Option<FnId> {
        self.map.get(&ty).copied()
    }
}
