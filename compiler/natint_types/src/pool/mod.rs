//! Append-only type pool.
//!
//! Structural types (`T?`, `T*`, generic applications, type parameters and
//! declared types) are interned: building the same shape twice yields the
//! same [`Idx`]. Missing types and native views are allocated with
//! [`Pool::fresh`] and never deduplicated, because their identity is the
//! identity of one resolution attempt or one cache entry.
//!
//! The pool is internally synchronized so that a built
//! [`TypeContext`](crate::TypeContext) can be shared across threads. Lookups
//! take the read lock; interning re-checks under the write lock before
//! appending.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{DefId, Idx, PrimitiveKind, Tag, TypeData, TypeFlags};

struct Item {
    data: TypeData,
    flags: TypeFlags,
}

struct PoolInner {
    items: Vec<Item>,
    map: FxHashMap<TypeData, Idx>,
}

impl PoolInner {
    fn flags_of(&self, idx: Idx) -> TypeFlags {
        self.items
            .get(idx.raw() as usize)
            .map_or(TypeFlags::HAS_ERROR, |item| item.flags)
    }

    /// Flags for structural data, derived from already-allocated children.
    fn structural_flags(&self, data: &TypeData) -> TypeFlags {
        match data {
            TypeData::Primitive(kind) => primitive_flags(*kind),
            TypeData::Nullable(inner) => {
                let inner = self.flags_of(*inner);
                inner.propagated()
                    | TypeFlags::IS_NULLABLE
                    | TypeFlags::IS_VALUE_TYPE
                    | (inner
                        & (TypeFlags::IS_NUMERIC | TypeFlags::IS_INTEGRAL | TypeFlags::IS_UNSIGNED))
            }
            TypeData::Pointer(pointee) => {
                self.flags_of(*pointee).propagated()
                    | TypeFlags::IS_POINTER
                    | TypeFlags::IS_VALUE_TYPE
            }
            TypeData::Applied { args, .. } => args
                .iter()
                .fold(TypeFlags::empty(), |acc, &arg| acc | self.flags_of(arg).propagated()),
            TypeData::TypeParam(_) => TypeFlags::HAS_TYPE_PARAM,
            TypeData::Named(_) => TypeFlags::empty(),
            TypeData::NativeInt { underlying } => {
                let under = self.flags_of(*underlying);
                under.propagated()
                    | TypeFlags::IS_NATIVE
                    | TypeFlags::HAS_NATIVE_INT
                    | TypeFlags::HAS_POINTER_SIZED
                    | TypeFlags::IS_VALUE_TYPE
                    | (under
                        & (TypeFlags::IS_NUMERIC | TypeFlags::IS_INTEGRAL | TypeFlags::IS_UNSIGNED))
            }
            TypeData::Missing(missing) => {
                let mut flags = TypeFlags::HAS_MISSING;
                if missing.special.is_some() {
                    flags |= TypeFlags::HAS_POINTER_SIZED | TypeFlags::IS_VALUE_TYPE;
                }
                flags
            }
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "a pool never holds more than u32::MAX types"
    )]
    fn push(&mut self, data: TypeData, flags: TypeFlags) -> Idx {
        let idx = Idx::from_raw(self.items.len() as u32);
        self.items.push(Item { data, flags });
        idx
    }
}

fn primitive_flags(kind: PrimitiveKind) -> TypeFlags {
    use PrimitiveKind as P;

    let mut flags = TypeFlags::empty();
    if kind.is_value_type() {
        flags |= TypeFlags::IS_VALUE_TYPE;
    }
    match kind {
        P::Char | P::Byte | P::UShort | P::UInt | P::ULong => {
            flags |= TypeFlags::IS_NUMERIC | TypeFlags::IS_INTEGRAL | TypeFlags::IS_UNSIGNED;
        }
        P::SByte | P::Short | P::Int | P::Long => {
            flags |= TypeFlags::IS_NUMERIC | TypeFlags::IS_INTEGRAL;
        }
        P::Float | P::Double | P::Decimal => flags |= TypeFlags::IS_NUMERIC,
        P::Error => flags |= TypeFlags::HAS_ERROR,
        P::Object | P::String | P::Bool | P::Void => {}
    }
    flags
}

/// The per-context type pool.
pub struct Pool {
    inner: RwLock<PoolInner>,
}

impl Pool {
    /// Create a pool with the primitive types at their fixed indices.
    pub fn new() -> Self {
        let mut inner = PoolInner {
            items: Vec::with_capacity(256),
            map: FxHashMap::default(),
        };
        for kind in PrimitiveKind::ALL {
            let data = TypeData::Primitive(kind);
            let idx = inner.push(data.clone(), primitive_flags(kind));
            debug_assert_eq!(idx, kind.idx());
            inner.map.insert(data, idx);
        }
        // Keep dynamic indices clear of the reserved primitive range.
        while inner.items.len() < Idx::FIRST_DYNAMIC as usize {
            inner.push(TypeData::Primitive(PrimitiveKind::Error), TypeFlags::HAS_ERROR);
        }
        Pool {
            inner: RwLock::new(inner),
        }
    }

    /// Intern structural type data, deduplicating equal shapes.
    pub fn intern(&self, data: TypeData) -> Idx {
        if let Some(&idx) = self.inner.read().map.get(&data) {
            return idx;
        }

        let mut inner = self.inner.write();
        if let Some(&idx) = inner.map.get(&data) {
            return idx;
        }
        let flags = inner.structural_flags(&data);
        let idx = inner.push(data.clone(), flags);
        inner.map.insert(data, idx);
        idx
    }

    /// Intern a declared type with flags supplied by the declaration.
    pub(crate) fn intern_declared(&self, data: TypeData, flags: TypeFlags) -> Idx {
        let mut inner = self.inner.write();
        if let Some(&idx) = inner.map.get(&data) {
            return idx;
        }
        let idx = inner.push(data.clone(), flags);
        inner.map.insert(data, idx);
        idx
    }

    /// Allocate a new entry without deduplication.
    ///
    /// Used for missing types (one instance per resolution attempt) and
    /// native views (one instance per view-cache entry).
    pub fn fresh(&self, data: TypeData) -> Idx {
        let mut inner = self.inner.write();
        let flags = inner.structural_flags(&data);
        inner.push(data, flags)
    }

    /// Get the data of a type.
    ///
    /// Indices from another pool resolve to the error primitive.
    pub fn data(&self, idx: Idx) -> TypeData {
        self.inner
            .read()
            .items
            .get(idx.raw() as usize)
            .map_or(TypeData::Primitive(PrimitiveKind::Error), |item| {
                item.data.clone()
            })
    }

    /// Get the tag of a type.
    pub fn tag(&self, idx: Idx) -> Tag {
        self.inner
            .read()
            .items
            .get(idx.raw() as usize)
            .map_or(Tag::Primitive, |item| item.data.tag())
    }

    /// Get the pre-computed flags of a type.
    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.inner.read().flags_of(idx)
    }

    /// Number of allocated entries, including the reserved primitive range.
    pub fn len(&self) -> usize {
        self.inner.read().items.len()
    }

    /// Always false: the primitive range is pre-allocated.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // === Constructors ===

    /// `inner?`. Nullable of a nullable is the nullable itself.
    pub fn nullable(&self, inner: Idx) -> Idx {
        if self.tag(inner) == Tag::Nullable {
            return inner;
        }
        self.intern(TypeData::Nullable(inner))
    }

    /// `pointee*`.
    pub fn pointer(&self, pointee: Idx) -> Idx {
        self.intern(TypeData::Pointer(pointee))
    }

    /// `generic<args...>`.
    pub fn applied(&self, generic: DefId, args: &[Idx]) -> Idx {
        self.intern(TypeData::Applied {
            generic,
            args: SmallVec::from_slice(args),
        })
    }

    /// Generic parameter by ordinal.
    pub fn type_param(&self, ordinal: u32) -> Idx {
        self.intern(TypeData::TypeParam(ordinal))
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;
