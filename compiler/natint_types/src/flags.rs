//! Pre-computed type and member flags.
//!
//! `TypeFlags` are computed once when a type is allocated in the pool and
//! never recomputed, so questions like "does this signature mention a
//! native integer?" are O(1) and gate the substitution and metadata passes.

use bitflags::bitflags;

bitflags! {
    /// Pre-computed type properties.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TypeFlags: u32 {
        // === Presence Flags (bits 0-7) ===
        // Propagate from children to parents.

        /// Contains a native integer view somewhere.
        const HAS_NATIVE_INT = 1 << 0;
        /// Contains a missing (unresolved) type somewhere.
        const HAS_MISSING = 1 << 1;
        /// Contains a generic type parameter.
        const HAS_TYPE_PARAM = 1 << 2;
        /// Contains the error primitive.
        const HAS_ERROR = 1 << 3;
        /// Contains a pointer-sized integer (view or underlying).
        const HAS_POINTER_SIZED = 1 << 4;

        // === Category Flags (bits 8-15) ===
        // Describe the type itself.

        /// Numeric type (integral, floating or decimal).
        const IS_NUMERIC = 1 << 8;
        /// Integral numeric type.
        const IS_INTEGRAL = 1 << 9;
        /// Unsigned integral type.
        const IS_UNSIGNED = 1 << 10;
        /// `T?`.
        const IS_NULLABLE = 1 << 11;
        /// `T*`.
        const IS_POINTER = 1 << 12;
        /// Native integer view.
        const IS_NATIVE = 1 << 13;
        /// Value type (struct or primitive value).
        const IS_VALUE_TYPE = 1 << 14;
    }
}

impl TypeFlags {
    /// Flags that propagate from child types to parents.
    pub const PROPAGATE_MASK: Self = Self::from_bits_truncate(
        Self::HAS_NATIVE_INT.bits()
            | Self::HAS_MISSING.bits()
            | Self::HAS_TYPE_PARAM.bits()
            | Self::HAS_ERROR.bits()
            | Self::HAS_POINTER_SIZED.bits(),
    );

    /// Flags inherited by a parent from this child.
    #[inline]
    pub const fn propagated(self) -> Self {
        self.intersection(Self::PROPAGATE_MASK)
    }

    /// Check if the type mentions a native integer view.
    #[inline]
    pub const fn has_native_int(self) -> bool {
        self.contains(Self::HAS_NATIVE_INT)
    }

    /// Check if the type mentions an unresolved type.
    #[inline]
    pub const fn has_missing(self) -> bool {
        self.contains(Self::HAS_MISSING)
    }

    /// Check if substitution of generic parameters can change the type.
    #[inline]
    pub const fn has_type_param(self) -> bool {
        self.contains(Self::HAS_TYPE_PARAM)
    }
}

bitflags! {
    /// Modifiers on a declared member.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct MemberFlags: u16 {
        const STATIC = 1 << 0;
        const VIRTUAL = 1 << 1;
        const ABSTRACT = 1 << 2;
        const OVERRIDE = 1 << 3;
        /// Explicitly hides an inherited member (`new`).
        const NEW = 1 << 4;
        const SEALED = 1 << 5;
    }
}

impl MemberFlags {
    /// Check if a derived type may override this member.
    #[inline]
    pub const fn is_overridable(self) -> bool {
        self.intersects(
            Self::VIRTUAL
                .union(Self::ABSTRACT)
                .union(Self::OVERRIDE),
        ) && !self.contains(Self::SEALED)
    }
}
