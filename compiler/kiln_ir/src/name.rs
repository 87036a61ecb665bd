//! Interned string identifiers.

use std::fmt;

use rustc_hash::FxHashMap;

/// Interned string identifier.
///
/// A `Name` is a `u32` index into the [`Interner`] that produced it.
/// Comparing two names from the same interner compares the strings.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// Pre-interned empty string.
    pub const EMPTY: Name = Name(0);

    /// Get the raw `u32` value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from a raw `u32` value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Name(raw)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({})", self.0)
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// String interner backing [`Name`].
///
/// Index 0 is always the empty string, so `Name::EMPTY` is valid for
/// every interner.
pub struct Interner {
    strings: Vec<String>,
    lookup: FxHashMap<String, Name>,
}

impl Interner {
    pub fn new() -> Self {
        let mut interner = Interner {
            strings: Vec::new(),
            lookup: FxHashMap::default(),
        };
        let empty = interner.intern("");
        debug_assert_eq!(empty, Name::EMPTY);
        interner
    }

    /// Intern a string, returning its stable [`Name`].
    pub fn intern(&mut self, s: &str) -> Name {
        if let Some(&name) = self.lookup.get(s) {
            return name;
        }
        let id = u32::try_from(self.strings.len())
            .unwrap_or_else(|_| panic!("interned name count exceeds u32::MAX"));
        let name = Name(id);
        self.strings.push(s.to_owned());
        self.lookup.insert(s.to_owned(), name);
        name
    }

    /// Resolve a [`Name`] back to its string.
    ///
    /// # Panics
    ///
    /// Panics if `name` did not come from this interner.
    pub fn resolve(&self, name: Name) -> &str {
        &self.strings[name.0 as usize]
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}
