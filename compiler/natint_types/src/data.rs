//! Type data stored in the pool.

use natint_ir::Name;
use smallvec::SmallVec;

use crate::{Idx, Tag};

/// Index of a type declaration in its [`TypeContext`](crate::TypeContext).
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(transparent)]
pub struct DefId(u32);

impl DefId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        DefId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Built-in keyword types, one per fixed primitive [`Idx`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrimitiveKind {
    Object,
    String,
    Bool,
    Char,
    SByte,
    Byte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Decimal,
    Void,
    Error,
}

impl PrimitiveKind {
    /// All primitives in `Idx` order.
    pub const ALL: [PrimitiveKind; 17] = [
        PrimitiveKind::Object,
        PrimitiveKind::String,
        PrimitiveKind::Bool,
        PrimitiveKind::Char,
        PrimitiveKind::SByte,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::UShort,
        PrimitiveKind::Int,
        PrimitiveKind::UInt,
        PrimitiveKind::Long,
        PrimitiveKind::ULong,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Decimal,
        PrimitiveKind::Void,
        PrimitiveKind::Error,
    ];

    /// The fixed pool index of this primitive.
    #[inline]
    pub const fn idx(self) -> Idx {
        Idx::from_raw(self as u32)
    }

    /// Check if values of this type are copied by value.
    pub const fn is_value_type(self) -> bool {
        !matches!(
            self,
            PrimitiveKind::Object | PrimitiveKind::String | PrimitiveKind::Void | PrimitiveKind::Error
        )
    }
}

/// The pointer-sized integer types the overlay knows by metadata name.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SpecialType {
    /// `System.IntPtr`, underlying type of `nint`.
    IntPtr,
    /// `System.UIntPtr`, underlying type of `nuint`.
    UIntPtr,
}

impl SpecialType {
    pub const NAMESPACE: &'static str = "System";

    /// The special type for the given signedness.
    #[inline]
    pub const fn from_signed(signed: bool) -> Self {
        if signed {
            SpecialType::IntPtr
        } else {
            SpecialType::UIntPtr
        }
    }

    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(self, SpecialType::IntPtr)
    }

    /// Metadata name within `System`.
    pub const fn metadata_name(self) -> &'static str {
        match self {
            SpecialType::IntPtr => "IntPtr",
            SpecialType::UIntPtr => "UIntPtr",
        }
    }

    /// Keyword spelling of the native view.
    pub const fn keyword(self) -> &'static str {
        match self {
            SpecialType::IntPtr => "nint",
            SpecialType::UIntPtr => "nuint",
        }
    }
}

/// A type referenced from metadata that no loaded assembly provides.
///
/// Each resolution attempt allocates a new instance; instances compare
/// equal by value through [`TypeContext::are_equivalent`](crate::TypeContext::are_equivalent).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MissingType {
    /// Name of the assembly the reference pointed into.
    pub assembly: Name,
    pub namespace: Name,
    pub name: Name,
    pub arity: u32,
    /// Set when the reference names `System.IntPtr` or `System.UIntPtr`.
    pub special: Option<SpecialType>,
}

/// Type data stored in the pool.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Primitive(PrimitiveKind),
    /// `T?`.
    Nullable(Idx),
    /// `T*`.
    Pointer(Idx),
    /// Non-generic declared type.
    Named(DefId),
    /// Generic declared type applied to arguments.
    Applied {
        generic: DefId,
        args: SmallVec<[Idx; 2]>,
    },
    /// Generic parameter of the enclosing declaration, by ordinal.
    TypeParam(u32),
    /// Native integer view (`nint`/`nuint`) over a pointer-sized type.
    NativeInt { underlying: Idx },
    Missing(MissingType),
}

impl TypeData {
    pub fn tag(&self) -> Tag {
        match self {
            TypeData::Primitive(_) => Tag::Primitive,
            TypeData::Nullable(_) => Tag::Nullable,
            TypeData::Pointer(_) => Tag::Pointer,
            TypeData::Named(_) => Tag::Named,
            TypeData::Applied { .. } => Tag::Applied,
            TypeData::TypeParam(_) => Tag::TypeParam,
            TypeData::NativeInt { .. } => Tag::NativeInt,
            TypeData::Missing(_) => Tag::Missing,
        }
    }
}
