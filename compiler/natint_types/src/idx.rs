//! Type index handle.
//!
//! Every type lives in the per-context [`Pool`](crate::Pool) and is referred
//! to by a 32-bit index. The primitive types are pre-interned at fixed
//! indices so that they compare in O(1) without touching the pool.
//!
//! Index equality is *identity*: a native integer view and its underlying
//! type have different indices even though they are equivalent
//! (see [`TypeContext::are_equivalent`](crate::TypeContext::are_equivalent)).

use std::fmt;

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Idx(u32);

impl Idx {
    // === Primitive Types (indices 0-16) ===

    /// `object`, the root reference type.
    pub const OBJECT: Self = Self(0);
    /// `string`.
    pub const STRING: Self = Self(1);
    /// `bool`.
    pub const BOOL: Self = Self(2);
    /// `char` (UTF-16 code unit).
    pub const CHAR: Self = Self(3);
    /// `sbyte`.
    pub const SBYTE: Self = Self(4);
    /// `byte`.
    pub const BYTE: Self = Self(5);
    /// `short`.
    pub const SHORT: Self = Self(6);
    /// `ushort`.
    pub const USHORT: Self = Self(7);
    /// `int`.
    pub const INT: Self = Self(8);
    /// `uint`.
    pub const UINT: Self = Self(9);
    /// `long`.
    pub const LONG: Self = Self(10);
    /// `ulong`.
    pub const ULONG: Self = Self(11);
    /// `float`.
    pub const FLOAT: Self = Self(12);
    /// `double`.
    pub const DOUBLE: Self = Self(13);
    /// `decimal`.
    pub const DECIMAL: Self = Self(14);
    /// `void` (only valid as a return type or pointee).
    pub const VOID: Self = Self(15);
    /// The error type (placeholder after a reported error).
    pub const ERROR: Self = Self(16);

    // === Reserved Range (17-31) ===

    /// First index for dynamically allocated types.
    pub const FIRST_DYNAMIC: u32 = 32;

    /// Number of pre-interned primitive types.
    pub const PRIMITIVE_COUNT: u32 = 17;

    /// Sentinel value indicating no type.
    pub const NONE: Self = Self(u32::MAX);

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Check if this is a primitive type (pre-interned).
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_DYNAMIC
    }

    /// Check if this is the NONE sentinel.
    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    /// Keyword spelling of a primitive type, `None` for dynamic types.
    #[inline]
    pub const fn name(self) -> Option<&'static str> {
        match self.0 {
            0 => Some("object"),
            1 => Some("string"),
            2 => Some("bool"),
            3 => Some("char"),
            4 => Some("sbyte"),
            5 => Some("byte"),
            6 => Some("short"),
            7 => Some("ushort"),
            8 => Some("int"),
            9 => Some("uint"),
            10 => Some("long"),
            11 => Some("ulong"),
            12 => Some("float"),
            13 => Some("double"),
            14 => Some("decimal"),
            15 => Some("void"),
            16 => Some("<error>"),
            _ => None,
        }
    }
}

impl fmt::Debug for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "Idx::NONE");
        }
        match self.name() {
            Some(name) => write!(f, "Idx::{}", name.to_ascii_uppercase()),
            None => write!(f, "Idx({})", self.0),
        }
    }
}

impl fmt::Display for Idx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "<none>");
        }
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "type#{}", self.0),
        }
    }
}

const _: () = assert!(std::mem::size_of::<Idx>() == 4);

#[cfg(test)]
mod tests;
