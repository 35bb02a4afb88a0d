//! Declarations of the core library types the overlay depends on.
//!
//! Callers that do not import real metadata use [`declare_core_library`] to
//! get `System.IntPtr`, `System.UIntPtr` and `System.IEquatable<T>` with
//! the members the checker needs.

use crate::{
    AssemblyId, ContextBuilder, DefId, Idx, MemberDef, MemberFlags, MemberKind, Param,
    SpecialType, TypeKind,
};

/// The declarations made by [`declare_core_library`].
#[derive(Copy, Clone, Debug)]
pub struct CoreTypes {
    pub assembly: AssemblyId,
    pub equatable: DefId,
    pub int_ptr: DefId,
    pub uint_ptr: DefId,
}

impl CoreTypes {
    /// Declaration of the special type.
    pub fn special(&self, special: SpecialType) -> DefId {
        match special {
            SpecialType::IntPtr => self.int_ptr,
            SpecialType::UIntPtr => self.uint_ptr,
        }
    }
}

/// Declare a core library assembly and make it the source of special types.
pub fn declare_core_library(builder: &mut ContextBuilder, name: &str) -> CoreTypes {
    let assembly = builder.add_assembly(name, [4, 0, 0, 0]);
    builder.set_core_library(assembly);

    let equatable = builder.declare_type(assembly, "System", "IEquatable", TypeKind::Interface, 1);
    let t = builder.pool().type_param(0);
    let other = builder.param("other", t);
    let equals = MemberDef::method(builder.intern("Equals"), &[other], Idx::BOOL)
        .with_flags(MemberFlags::ABSTRACT | MemberFlags::VIRTUAL);
    builder.add_member(equatable, equals);

    let int_ptr = declare_pointer_integer(builder, assembly, Some(equatable), SpecialType::IntPtr);
    let uint_ptr = declare_pointer_integer(builder, assembly, Some(equatable), SpecialType::UIntPtr);

    CoreTypes {
        assembly,
        equatable,
        int_ptr,
        uint_ptr,
    }
}

/// Declare `System.IntPtr` or `System.UIntPtr` in `assembly`.
///
/// When `equatable` is given, the type implements that generic interface
/// with every type argument set to the declared type itself.
pub fn declare_pointer_integer(
    builder: &mut ContextBuilder,
    assembly: AssemblyId,
    equatable: Option<DefId>,
    special: SpecialType,
) -> DefId {
    let def = builder.declare_type(
        assembly,
        SpecialType::NAMESPACE,
        special.metadata_name(),
        TypeKind::Struct,
        0,
    );
    let this = builder.self_type(def);
    let (int32, int64) = if special.is_signed() {
        (Idx::INT, Idx::LONG)
    } else {
        (Idx::UINT, Idx::ULONG)
    };

    if let Some((generic, arity)) = equatable.and_then(|e| builder.def(e).map(|d| (e, d.arity))) {
        let args = vec![this; arity as usize];
        let interface = builder.instantiate(generic, &args);
        builder.add_interface(def, interface);
    }

    let value32 = builder.param("value", int32);
    let value64 = builder.param("value", int64);
    let other = builder.param("other", this);
    let pointer = builder.param("pointer", this);
    let offset = builder.param("offset", Idx::INT);
    let left = builder.param("left", this);
    let right = builder.param("right", this);
    let void_ptr = builder.pointer(Idx::VOID);
    let (to32, to64) = if special.is_signed() {
        ("ToInt32", "ToInt64")
    } else {
        ("ToUInt32", "ToUInt64")
    };

    let members = [
        MemberDef::field(builder.intern("Zero"), this).with_flags(MemberFlags::STATIC),
        MemberDef::property(builder.intern("Size"), Idx::INT).with_flags(MemberFlags::STATIC),
        constructor(builder, &[value32], this),
        constructor(builder, &[value64], this),
        MemberDef::method(builder.intern(to32), &[], int32),
        MemberDef::method(builder.intern(to64), &[], int64),
        MemberDef::method(builder.intern("ToPointer"), &[], void_ptr),
        MemberDef::method(builder.intern("Equals"), &[other], Idx::BOOL),
        MemberDef::method(builder.intern("GetHashCode"), &[], Idx::INT)
            .with_flags(MemberFlags::OVERRIDE),
        MemberDef::method(builder.intern("ToString"), &[], Idx::STRING)
            .with_flags(MemberFlags::OVERRIDE),
        MemberDef::operator(builder.intern("op_Addition"), &[pointer, offset], this),
        MemberDef::operator(builder.intern("op_Subtraction"), &[pointer, offset], this),
        MemberDef::operator(builder.intern("op_Equality"), &[left, right], Idx::BOOL),
        MemberDef::operator(builder.intern("op_Inequality"), &[left, right], Idx::BOOL),
        MemberDef::operator(builder.intern("op_Explicit"), &[value32], this),
        MemberDef::operator(builder.intern("op_Explicit"), &[value64], this),
    ];
    for member in members {
        builder.add_member(def, member);
    }
    def
}

fn constructor(builder: &ContextBuilder, params: &[Param], this: Idx) -> MemberDef {
    MemberDef {
        kind: MemberKind::Constructor,
        ..MemberDef::method(builder.intern(".ctor"), params, this)
    }
}
