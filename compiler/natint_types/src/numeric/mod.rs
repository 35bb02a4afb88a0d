//! Numeric kinds and the implicit numeric conversion table.
//!
//! `nint` and `nuint` have no fixed width: they are 32-bit or 64-bit
//! depending on the platform. Everything that depends on a width asks for
//! it explicitly, either the platform's or the *portable* width (32 bits,
//! the range representable on every platform).

use std::fmt;

use crate::Idx;

/// A numeric type, with native integers as kinds of their own.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NumericKind {
    Char,
    SByte,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    NInt,
    NUInt,
    Float,
    Double,
    Decimal,
}

impl NumericKind {
    pub const ALL: [NumericKind; 14] = [
        NumericKind::Char,
        NumericKind::SByte,
        NumericKind::Byte,
        NumericKind::Short,
        NumericKind::UShort,
        NumericKind::Int,
        NumericKind::UInt,
        NumericKind::Long,
        NumericKind::ULong,
        NumericKind::NInt,
        NumericKind::NUInt,
        NumericKind::Float,
        NumericKind::Double,
        NumericKind::Decimal,
    ];

    /// The primitive type of a fixed-width kind; `None` for native kinds.
    pub const fn primitive(self) -> Option<Idx> {
        match self {
            NumericKind::Char => Some(Idx::CHAR),
            NumericKind::SByte => Some(Idx::SBYTE),
            NumericKind::Byte => Some(Idx::BYTE),
            NumericKind::Short => Some(Idx::SHORT),
            NumericKind::UShort => Some(Idx::USHORT),
            NumericKind::Int => Some(Idx::INT),
            NumericKind::UInt => Some(Idx::UINT),
            NumericKind::Long => Some(Idx::LONG),
            NumericKind::ULong => Some(Idx::ULONG),
            NumericKind::NInt | NumericKind::NUInt => None,
            NumericKind::Float => Some(Idx::FLOAT),
            NumericKind::Double => Some(Idx::DOUBLE),
            NumericKind::Decimal => Some(Idx::DECIMAL),
        }
    }

    /// The numeric kind of a primitive type.
    pub const fn from_primitive(idx: Idx) -> Option<Self> {
        Some(match idx {
            Idx::CHAR => NumericKind::Char,
            Idx::SBYTE => NumericKind::SByte,
            Idx::BYTE => NumericKind::Byte,
            Idx::SHORT => NumericKind::Short,
            Idx::USHORT => NumericKind::UShort,
            Idx::INT => NumericKind::Int,
            Idx::UINT => NumericKind::UInt,
            Idx::LONG => NumericKind::Long,
            Idx::ULONG => NumericKind::ULong,
            Idx::FLOAT => NumericKind::Float,
            Idx::DOUBLE => NumericKind::Double,
            Idx::DECIMAL => NumericKind::Decimal,
            _ => return None,
        })
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            NumericKind::Char => "char",
            NumericKind::SByte => "sbyte",
            NumericKind::Byte => "byte",
            NumericKind::Short => "short",
            NumericKind::UShort => "ushort",
            NumericKind::Int => "int",
            NumericKind::UInt => "uint",
            NumericKind::Long => "long",
            NumericKind::ULong => "ulong",
            NumericKind::NInt => "nint",
            NumericKind::NUInt => "nuint",
            NumericKind::Float => "float",
            NumericKind::Double => "double",
            NumericKind::Decimal => "decimal",
        }
    }

    #[inline]
    pub const fn is_integral(self) -> bool {
        !self.is_floating() && !matches!(self, NumericKind::Decimal)
    }

    /// `float` or `double`.
    #[inline]
    pub const fn is_floating(self) -> bool {
        matches!(self, NumericKind::Float | NumericKind::Double)
    }

    #[inline]
    pub const fn is_native(self) -> bool {
        matches!(self, NumericKind::NInt | NumericKind::NUInt)
    }

    /// Unsigned integral kind (`char` counts as unsigned).
    #[inline]
    pub const fn is_unsigned(self) -> bool {
        matches!(
            self,
            NumericKind::Char
                | NumericKind::Byte
                | NumericKind::UShort
                | NumericKind::UInt
                | NumericKind::ULong
                | NumericKind::NUInt
        )
    }

    /// Signed integral kind.
    #[inline]
    pub const fn is_signed_integral(self) -> bool {
        self.is_integral() && !self.is_unsigned()
    }

    /// Width in bits of a fixed-width kind; `None` for native kinds.
    pub const fn fixed_bits(self) -> Option<u32> {
        match self {
            NumericKind::SByte | NumericKind::Byte => Some(8),
            NumericKind::Char | NumericKind::Short | NumericKind::UShort => Some(16),
            NumericKind::Int | NumericKind::UInt | NumericKind::Float => Some(32),
            NumericKind::Long | NumericKind::ULong | NumericKind::Double => Some(64),
            NumericKind::Decimal => Some(128),
            NumericKind::NInt | NumericKind::NUInt => None,
        }
    }

    /// Width in bits given the platform pointer width.
    #[inline]
    pub const fn bits_at(self, pointer_bits: u32) -> u32 {
        match self.fixed_bits() {
            Some(bits) => bits,
            None => pointer_bits,
        }
    }

    /// Check if every value fits in 32 bits on every platform.
    #[inline]
    pub const fn is_at_most_32_bits(self) -> bool {
        matches!(self.fixed_bits(), Some(bits) if bits <= 32)
    }

    /// Inclusive value range of an integral kind at the given width.
    ///
    /// Only meaningful for integral kinds.
    pub const fn range_at(self, pointer_bits: u32) -> (i128, i128) {
        let bits = self.bits_at(pointer_bits);
        if self.is_unsigned() {
            (0, (1i128 << bits) - 1)
        } else {
            (-(1i128 << (bits - 1)), (1i128 << (bits - 1)) - 1)
        }
    }

    /// Range representable on every platform (`nint`: `int`, `nuint`: `uint`).
    #[inline]
    pub const fn portable_range(self) -> (i128, i128) {
        self.range_at(32)
    }

    /// The same-width kind of the other signedness, for integral kinds.
    pub const fn flip_signedness(self) -> Option<Self> {
        Some(match self {
            NumericKind::SByte => NumericKind::Byte,
            NumericKind::Byte => NumericKind::SByte,
            NumericKind::Short => NumericKind::UShort,
            NumericKind::UShort => NumericKind::Short,
            NumericKind::Int => NumericKind::UInt,
            NumericKind::UInt => NumericKind::Int,
            NumericKind::Long => NumericKind::ULong,
            NumericKind::ULong => NumericKind::Long,
            NumericKind::NInt => NumericKind::NUInt,
            NumericKind::NUInt => NumericKind::NInt,
            _ => return None,
        })
    }

    /// The implicit numeric conversion table.
    ///
    /// Native integers sit between the 32-bit and 64-bit kinds: anything
    /// that fits in 32 bits on both platforms converts to them implicitly,
    /// and they convert implicitly to the 64-bit kind of the same
    /// signedness and to every floating kind.
    pub const fn converts_implicitly_to(self, target: NumericKind) -> bool {
        use NumericKind as K;

        if self as u8 == target as u8 {
            return true;
        }
        match self {
            K::SByte => matches!(
                target,
                K::Short | K::Int | K::Long | K::NInt | K::Float | K::Double | K::Decimal
            ),
            K::Byte => matches!(
                target,
                K::Short
                    | K::UShort
                    | K::Int
                    | K::UInt
                    | K::Long
                    | K::ULong
                    | K::NInt
                    | K::NUInt
                    | K::Float
                    | K::Double
                    | K::Decimal
            ),
            K::Short => matches!(
                target,
                K::Int | K::Long | K::NInt | K::Float | K::Double | K::Decimal
            ),
            K::UShort | K::Char => matches!(
                target,
                K::Int
                    | K::UInt
                    | K::Long
                    | K::ULong
                    | K::NInt
                    | K::NUInt
                    | K::Float
                    | K::Double
                    | K::Decimal
            ) || (matches!(self, K::Char) && matches!(target, K::UShort)),
            K::Int => matches!(
                target,
                K::Long | K::NInt | K::Float | K::Double | K::Decimal
            ),
            K::UInt => matches!(
                target,
                K::Long | K::ULong | K::NUInt | K::Float | K::Double | K::Decimal
            ),
            K::Long | K::ULong => matches!(target, K::Float | K::Double | K::Decimal),
            K::NInt => matches!(target, K::Long | K::Float | K::Double | K::Decimal),
            K::NUInt => matches!(target, K::ULong | K::Float | K::Double | K::Decimal),
            K::Float => matches!(target, K::Double),
            K::Double | K::Decimal => false,
        }
    }

    /// Check if any conversion (implicit or explicit) exists.
    ///
    /// Every numeric pair converts at least explicitly, except the signed
    /// and unsigned native kinds, which do not convert to each other at all.
    pub const fn converts_explicitly_to(self, target: NumericKind) -> bool {
        !matches!(
            (self, target),
            (NumericKind::NInt, NumericKind::NUInt) | (NumericKind::NUInt, NumericKind::NInt)
        )
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
