use natint_ir::SharedInterner;
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{core_builder, core_context, empty_context};
use crate::{declare_pointer_integer, ContextBuilder, TypeFlags};

#[test]
fn view_is_idempotent_and_distinct() {
    let ctx = core_context();
    let int_ptr = ctx.special_type(SpecialType::IntPtr);
    let nint = ctx.get_or_create_native_view(int_ptr).unwrap();

    assert_eq!(ctx.get_or_create_native_view(int_ptr).unwrap(), nint);
    assert_eq!(ctx.get_or_create_native_view(nint).unwrap(), nint);
    assert_eq!(ctx.native_integer(true), nint);
    assert_ne!(nint, int_ptr);
    assert_eq!(ctx.underlying(nint), Some(int_ptr));
    assert_eq!(ctx.native_view(int_ptr), Some(nint));
}

#[test]
fn views_carry_signedness() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let nuint = ctx.native_integer(false);

    assert_eq!(ctx.is_signed_native(nint), Some(true));
    assert_eq!(ctx.is_signed_native(nuint), Some(false));
    assert!(ctx.flags(nuint).contains(TypeFlags::IS_UNSIGNED));
    assert!(!ctx.flags(nint).contains(TypeFlags::IS_UNSIGNED));
    assert!(ctx.flags(nint).has_native_int());
}

#[test]
fn non_pointer_sized_is_rejected() {
    let ctx = core_context();
    assert_eq!(
        ctx.get_or_create_native_view(Idx::LONG),
        Err(OverlayError::NotPointerSized { ty: Idx::LONG })
    );
    let nullable = ctx.nullable(ctx.native_integer(true));
    assert!(ctx.get_or_create_native_view(nullable).is_err());
}

#[test]
fn missing_underlying_gives_degraded_view() {
    let ctx = empty_context();
    let nint = ctx.native_integer(true);

    assert!(ctx.is_native_integer(nint));
    assert_eq!(ctx.special_type_of(nint), Some(SpecialType::IntPtr));
    let underlying = ctx.underlying(nint).unwrap();
    assert_eq!(ctx.is_error(nint), ctx.is_error(underlying));
    assert!(ctx.is_error(nint));
    assert_eq!(ctx.display(nint), "nint");
}

#[test]
fn special_type_is_cached() {
    let ctx = empty_context();
    let first = ctx.special_type(SpecialType::UIntPtr);
    assert_eq!(ctx.special_type(SpecialType::UIntPtr), first);
}

#[test]
fn declaring_special_type_invalidates_cache() {
    let mut builder = ContextBuilder::new(SharedInterner::new());
    let missing = builder.special_type(SpecialType::IntPtr);
    assert_eq!(builder.tag(missing), crate::Tag::Missing);

    let asm = builder.add_assembly("mscorlib", [4, 0, 0, 0]);
    let def = declare_pointer_integer(&mut builder, asm, None, SpecialType::IntPtr);
    let ctx = builder.build();
    assert_eq!(ctx.special_type(SpecialType::IntPtr), ctx.self_type(def));
}

#[test]
fn core_library_wins() {
    let (mut builder, core) = core_builder();
    let other = builder.add_assembly("Other", [1, 0, 0, 0]);
    declare_pointer_integer(&mut builder, other, None, SpecialType::IntPtr);
    let ctx = builder.build();
    assert_eq!(
        ctx.special_type(SpecialType::IntPtr),
        ctx.self_type(core.int_ptr)
    );
}

#[test]
fn strip_native_only_strips_views() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let int_ptr = ctx.special_type(SpecialType::IntPtr);
    assert_eq!(ctx.strip_native(nint), int_ptr);
    assert_eq!(ctx.strip_native(int_ptr), int_ptr);
    assert_eq!(ctx.strip_native(Idx::INT), Idx::INT);
    assert!(ctx.is_pointer_sized(int_ptr));
    assert!(!ctx.is_native_integer(int_ptr));
}
