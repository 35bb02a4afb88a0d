use natint_ir::SharedInterner;
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{core_builder, core_context};
use crate::{MemberDef, TypeKind};

#[test]
fn core_library_declarations() {
    let (builder, core) = core_builder();
    let ctx = builder.build();

    assert_eq!(ctx.core_library(), Some(core.assembly));
    let int_ptr = ctx.def(core.int_ptr).map(|d| d.special);
    assert_eq!(int_ptr, Some(Some(SpecialType::IntPtr)));
    assert_eq!(ctx.def(core.equatable).map(|d| d.arity), Some(1));
    assert_eq!(ctx.defs().count(), 3);
}

#[test]
fn find_type_prefers_named_assembly() {
    let mut builder = ContextBuilder::new(SharedInterner::new());
    let a = builder.add_assembly("A", [1, 0, 0, 0]);
    let b = builder.add_assembly("B", [1, 0, 0, 0]);
    let in_a = builder.declare_type(a, "N", "C", TypeKind::Class, 0);
    let in_b = builder.declare_type(b, "N", "C", TypeKind::Class, 0);
    let ctx = builder.build();

    let (ns, name) = (ctx.name("N"), ctx.name("C"));
    assert_eq!(ctx.find_type(ns, name, 0, None), Some(in_a));
    assert_eq!(ctx.find_type(ns, name, 0, Some(ctx.name("B"))), Some(in_b));
    assert_eq!(ctx.find_type(ns, name, 1, None), None);
}

#[test]
fn instantiate_generic_and_non_generic() {
    let (builder, core) = core_builder();
    let ctx = builder.build();

    let nint = ctx.native_integer(true);
    let equatable = ctx.instantiate(core.equatable, &[nint]);
    assert_eq!(ctx.instantiate(core.equatable, &[nint]), equatable);
    assert_eq!(ctx.display(equatable), "System.IEquatable<nint>");

    let int_ptr = ctx.self_type(core.int_ptr);
    assert_eq!(ctx.instantiate(core.int_ptr, &[Idx::INT]), int_ptr);
    assert_eq!(ctx.self_type(DefId::from_raw(99)), Idx::ERROR);
}

#[test]
fn missing_types_are_fresh_and_tagged() {
    let ctx = core_context();
    let (asm, ns, name) = (ctx.name("Other"), ctx.name("System"), ctx.name("UIntPtr"));
    let first = ctx.missing_type(asm, ns, name, 0);
    let second = ctx.missing_type(asm, ns, name, 0);

    assert_ne!(first, second);
    assert_eq!(ctx.data(first), ctx.data(second));
    assert_eq!(ctx.special_type_of(first), Some(SpecialType::UIntPtr));
    assert!(ctx.is_error(first));
    assert!(ctx.flags(first).has_missing());
}

#[test]
fn display_spellings() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let nuint = ctx.native_integer(false);
    let int_ptr = ctx.special_type(SpecialType::IntPtr);

    assert_eq!(ctx.display(nint), "nint");
    assert_eq!(ctx.display(nuint), "nuint");
    assert_eq!(ctx.display(int_ptr), "System.IntPtr");
    assert_eq!(ctx.display(ctx.nullable(nint)), "nint?");
    assert_eq!(ctx.display(ctx.pointer(Idx::VOID)), "void*");
    assert_eq!(ctx.display(ctx.pool().type_param(0)), "T");
}

#[test]
fn builder_exposes_queries() {
    let mut builder = ContextBuilder::new(SharedInterner::new());
    let asm = builder.add_assembly("Lib", [1, 2, 3, 4]);
    let def = builder.declare_type(asm, "Lib", "Widget", TypeKind::Struct, 0);
    let this = builder.self_type(def);
    let field = MemberDef::field(builder.intern("Self"), this);
    builder.add_member(def, field);
    assert!(builder.flags(this).contains(TypeFlags::IS_VALUE_TYPE));

    let ctx = builder.build();
    assert_eq!(ctx.assembly(asm).map(|a| a.version), Some([1, 2, 3, 4]));
    assert_eq!(ctx.def(def).map(|d| d.members.len()), Some(1));
    assert_eq!(ctx.def_of(this), Some(def));
}
