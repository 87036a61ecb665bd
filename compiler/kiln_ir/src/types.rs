//! Resolved type table.
//!
//! Every type in a resolved program is a [`TypeId`] into the [`TypeTable`].
//! The middle-end only needs a coarse classification: primitives carry no
//! heap state, **record** aggregates are value types whose fields may own
//! heap data, and **class** aggregates are reference types managed
//! elsewhere. Extern types opt out of the compiler's constructor and
//! destructor contract entirely.

use crate::name::Name;

/// Index of a type in the [`TypeTable`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    /// The unit (void) type. Seeded by [`TypeTable::new`].
    pub const UNIT: TypeId = TypeId(0);
    /// The boolean type. Seeded by [`TypeTable::new`].
    pub const BOOL: TypeId = TypeId(1);
    /// The integer type. Seeded by [`TypeTable::new`].
    pub const INT: TypeId = TypeId(2);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        TypeId(raw)
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

/// Coarse classification of a resolved type.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeKind {
    /// Scalar value with no heap state (`int`, `bool`, `unit`, ...).
    Primitive,
    /// Value-type aggregate. Fields may transitively own heap resources,
    /// so records participate in constructor/destructor tracking.
    Record,
    /// Reference-type aggregate. The referent is managed elsewhere;
    /// variables of class type are plain pointers.
    Class,
}

/// A single entry in the [`TypeTable`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeData {
    pub name: Name,
    pub kind: TypeKind,
    /// Declared `extern`: no constructor or destructor contract is exposed
    /// to the compiler for this type.
    pub is_extern: bool,
}

/// The resolved type table.
///
/// [`TypeTable::new`] seeds the builtin primitives so the `TypeId::UNIT`,
/// `TypeId::BOOL`, and `TypeId::INT` constants are valid for every table.
pub struct TypeTable {
    types: Vec<TypeData>,
}

impl TypeTable {
    pub fn new() -> Self {
        let mut table = TypeTable { types: Vec::new() };
        for builtin in [TypeId::UNIT, TypeId::BOOL, TypeId::INT] {
            let id = table.add(TypeData {
                name: Name::EMPTY,
                kind: TypeKind::Primitive,
                is_extern: false,
            });
            debug_assert_eq!(id, builtin);
        }
        table
    }

    /// Add a type, returning its id.
    pub fn add(&mut self, data: TypeData) -> TypeId {
        let id = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("type count exceeds u32::MAX"));
        self.types.push(data);
        TypeId::new(id)
    }

    /// Add a (non-extern) record type.
    pub fn add_record(&mut self, name: Name) -> TypeId {
        self.add(TypeData {
            name,
            kind: TypeKind::Record,
            is_extern: false,
        })
    }

    /// Add an extern record type.
    pub fn add_extern_record(&mut self, name: Name) -> TypeId {
        self.add(TypeData {
            name,
            kind: TypeKind::Record,
            is_extern: true,
        })
    }

    /// Add a class (reference) type.
    pub fn add_class(&mut self, name: Name) -> TypeId {
        self.add(TypeData {
            name,
            kind: TypeKind::Class,
            is_extern: false,
        })
    }

    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.types[id.index()]
    }

    /// Is this a value-type (record) aggregate?
    #[inline]
    pub fn is_record_aggregate(&self, id: TypeId) -> bool {
        self.get(id).kind == TypeKind::Record
    }

    /// Is this a reference-type (class) aggregate?
    #[inline]
    pub fn is_class_aggregate(&self, id: TypeId) -> bool {
        self.get(id).kind == TypeKind::Class
    }

    /// Does this type carry the `extern` flag?
    #[inline]
    pub fn is_extern(&self, id: TypeId) -> bool {
        self.get(id).is_extern
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}
