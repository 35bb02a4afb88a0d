//! Type kind tag for tag-driven dispatch.
//!
//! Each pool entry has a `Tag` identifying its kind. Tags are grouped:
//! - 0-15: Primitives
//! - 16-31: Wrappers (nullable, pointer)
//! - 32-47: Declared types (named, applied generic, type parameter)
//! - 48-63: Native integer views
//! - 240-255: Missing (unresolved) types

use std::fmt;

/// Type kind discriminant.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum Tag {
    /// Built-in keyword type (`int`, `object`, ...).
    Primitive = 0,

    /// `T?`.
    Nullable = 16,
    /// `T*`.
    Pointer = 17,

    /// Non-generic declared type.
    Named = 32,
    /// Generic declared type applied to arguments.
    Applied = 33,
    /// Generic parameter of the enclosing declaration.
    TypeParam = 34,

    /// `nint` / `nuint`: native view over a pointer-sized integer type.
    NativeInt = 48,

    /// Type referenced from metadata that could not be resolved.
    Missing = 240,
}

impl Tag {
    /// Check if this tag wraps exactly one child type.
    #[inline]
    pub const fn is_wrapper(self) -> bool {
        matches!(self, Tag::Nullable | Tag::Pointer)
    }

    /// Check if this tag refers to a type declaration.
    #[inline]
    pub const fn is_declared(self) -> bool {
        matches!(self, Tag::Named | Tag::Applied)
    }

    /// Human-readable tag name.
    pub const fn name(self) -> &'static str {
        match self {
            Tag::Primitive => "primitive",
            Tag::Nullable => "nullable",
            Tag::Pointer => "pointer",
            Tag::Named => "named",
            Tag::Applied => "applied",
            Tag::TypeParam => "type-param",
            Tag::NativeInt => "native-int",
            Tag::Missing => "missing",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
