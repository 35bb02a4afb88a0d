//! The native integer overlay.
//!
//! `nint` and `nuint` are *views* over the pointer-sized integer types
//! `System.IntPtr` and `System.UIntPtr`. A view is a distinct pool entry
//! (`TypeData::NativeInt { underlying }`) that is equivalent to its
//! underlying type for every type relation but keeps its own identity and
//! spelling.
//!
//! # Uniqueness
//!
//! Views are only created here, through the context's view cache. The
//! cache is keyed by the underlying type's `Idx`, so there is exactly one
//! view per underlying instance, even under concurrent first use. Missing
//! underlying types are distinct instances per resolution attempt and get
//! distinct views, which compare equal by value.

use crate::{Idx, SpecialType, TypeContext, TypeData};

/// Internal defects reported by the overlay.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum OverlayError {
    /// A native view was requested over a type that is not pointer-sized.
    #[error("{ty:?} is not a pointer-sized integer type")]
    NotPointerSized { ty: Idx },
}

impl TypeContext {
    /// Resolve `System.IntPtr` or `System.UIntPtr`.
    ///
    /// The core library's declaration wins, then the first declaration in
    /// any assembly. When no assembly declares it, the result is a missing
    /// type tagged with the special type. The answer is cached per context.
    pub fn special_type(&self, special: SpecialType) -> Idx {
        if let Some(idx) = self.specials.get(&special) {
            return *idx;
        }
        *self
            .specials
            .entry(special)
            .or_insert_with(|| self.resolve_special_uncached(special))
    }

    fn resolve_special_uncached(&self, special: SpecialType) -> Idx {
        let core_name = self
            .core_library
            .and_then(|id| self.assembly(id))
            .map(|asm| asm.name);
        let namespace = self.name(SpecialType::NAMESPACE);
        let name = self.name(special.metadata_name());

        if let Some(def) = self.find_type(namespace, name, 0, core_name) {
            return self.self_type(def);
        }

        tracing::debug!(?special, "special type missing from every assembly");
        self.missing_type(core_name.unwrap_or_default(), namespace, name, 0)
    }

    /// The special type a type is or views.
    pub fn special_type_of(&self, idx: Idx) -> Option<SpecialType> {
        match self.data(idx) {
            TypeData::Named(def) => self.def(def).and_then(|d| d.special),
            TypeData::Missing(missing) => missing.special,
            TypeData::NativeInt { underlying } => self.special_type_of(underlying),
            _ => None,
        }
    }

    /// Check if a type is `IntPtr`/`UIntPtr` (resolved or missing) or a view of one.
    #[inline]
    pub fn is_pointer_sized(&self, idx: Idx) -> bool {
        self.special_type_of(idx).is_some()
    }

    /// Check if a type is a native integer view.
    #[inline]
    pub fn is_native_integer(&self, idx: Idx) -> bool {
        matches!(self.data(idx), TypeData::NativeInt { .. })
    }

    /// The underlying type of a native view.
    pub fn underlying(&self, view: Idx) -> Option<Idx> {
        match self.data(view) {
            TypeData::NativeInt { underlying } => Some(underlying),
            _ => None,
        }
    }

    /// Replace a top-level native view by its underlying type.
    #[inline]
    pub fn strip_native(&self, idx: Idx) -> Idx {
        self.underlying(idx).unwrap_or(idx)
    }

    /// The native view of an underlying type, if one was created.
    pub fn native_view(&self, underlying: Idx) -> Option<Idx> {
        self.views.get(&underlying).map(|view| *view)
    }

    /// Get or create the native view of a pointer-sized integer type.
    ///
    /// Idempotent: the same underlying instance always yields the same
    /// view. A view passed in is returned unchanged.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn get_or_create_native_view(&self, underlying: Idx) -> Result<Idx, OverlayError> {
        match self.data(underlying) {
            TypeData::NativeInt { .. } => Ok(underlying),
            TypeData::Named(_) | TypeData::Missing(_) if self.is_pointer_sized(underlying) => {
                Ok(self.view_of(underlying))
            }
            _ => Err(OverlayError::NotPointerSized { ty: underlying }),
        }
    }

    /// `nint` (signed) or `nuint` (unsigned) for this context.
    pub fn native_integer(&self, signed: bool) -> Idx {
        let underlying = self.special_type(SpecialType::from_signed(signed));
        self.view_of(underlying)
    }

    /// Cache lookup for a known pointer-sized underlying type.
    ///
    /// Lock order: view-cache shard, then pool.
    fn view_of(&self, underlying: Idx) -> Idx {
        if let Some(view) = self.views.get(&underlying) {
            return *view;
        }
        *self.views.entry(underlying).or_insert_with(|| {
            let view = self.pool.fresh(TypeData::NativeInt { underlying });
            tracing::debug!(?underlying, ?view, "created native view");
            view
        })
    }

    /// Signedness of a pointer-sized type or view.
    pub fn is_signed_native(&self, idx: Idx) -> Option<bool> {
        self.special_type_of(idx).map(SpecialType::is_signed)
    }
}

#[cfg(test)]
mod tests;
