//! Declarations: assemblies, types and their members.

use natint_ir::{Name, Span};
use smallvec::SmallVec;

use crate::{Idx, MemberFlags, SpecialType};

/// Index of an assembly in its [`TypeContext`](crate::TypeContext).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct AssemblyId(u32);

impl AssemblyId {
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        AssemblyId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// A loaded assembly (source compilation or metadata reference).
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Assembly {
    pub name: Name,
    /// `major.minor.build.revision`.
    pub version: [u16; 4],
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemberKind {
    Method,
    /// User-defined operator (`op_Addition`, `op_Explicit`, ...).
    Operator,
    Field,
    Property,
    Constructor,
}

impl MemberKind {
    /// Members whose identity includes their parameter list.
    #[inline]
    pub const fn has_signature(self) -> bool {
        matches!(
            self,
            MemberKind::Method | MemberKind::Operator | MemberKind::Constructor
        )
    }
}

/// A parameter of a member signature.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    pub ty: Idx,
}

/// A member as declared on its type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemberDef {
    pub name: Name,
    pub kind: MemberKind,
    pub params: SmallVec<[Param; 2]>,
    /// Return type; field and property type.
    pub ret: Idx,
    pub flags: MemberFlags,
    pub span: Span,
}

impl MemberDef {
    /// A method with the given parameters and return type.
    pub fn method(name: Name, params: &[Param], ret: Idx) -> Self {
        MemberDef {
            name,
            kind: MemberKind::Method,
            params: SmallVec::from_slice(params),
            ret,
            flags: MemberFlags::empty(),
            span: Span::DUMMY,
        }
    }

    /// A static user-defined operator.
    pub fn operator(name: Name, params: &[Param], ret: Idx) -> Self {
        MemberDef {
            kind: MemberKind::Operator,
            flags: MemberFlags::STATIC,
            ..Self::method(name, params, ret)
        }
    }

    /// A field of the given type.
    pub fn field(name: Name, ty: Idx) -> Self {
        MemberDef {
            kind: MemberKind::Field,
            ..Self::method(name, &[], ty)
        }
    }

    /// A property of the given type.
    pub fn property(name: Name, ty: Idx) -> Self {
        MemberDef {
            kind: MemberKind::Property,
            ..Self::method(name, &[], ty)
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: MemberFlags) -> Self {
        self.flags |= flags;
        self
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// A declared type.
#[derive(Clone, Debug)]
pub struct TypeDef {
    pub name: Name,
    pub namespace: Name,
    pub assembly: AssemblyId,
    pub kind: TypeKind,
    /// Number of generic parameters.
    pub arity: u32,
    /// Set for `System.IntPtr` / `System.UIntPtr`.
    pub special: Option<SpecialType>,
    pub base: Option<Idx>,
    pub interfaces: Vec<Idx>,
    pub members: Vec<MemberDef>,
    /// The type as seen from inside its declaration: `Named(def)`, or
    /// `Applied(def, [T0, T1, ...])` for generic definitions.
    pub self_ty: Idx,
}
