use natint_ir::SharedInterner;
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{core_builder, core_context, empty_context};
use crate::{declare_core_library, ContextBuilder, SpecialType, TypeKind};

#[test]
fn flags_follow_pre_order() {
    let mut builder = ContextBuilder::new(SharedInterner::new());
    declare_core_library(&mut builder, "System.Runtime");
    let asm = builder.add_assembly("App", [1, 0, 0, 0]);
    let pair = builder.declare_type(asm, "App", "Pair", TypeKind::Struct, 2);
    let ctx = builder.build();

    let nint = ctx.native_integer(true);
    let int_ptr = ctx.special_type(SpecialType::IntPtr);
    let nuint = ctx.native_integer(false);
    let inner = ctx.instantiate(pair, &[int_ptr, nuint]);
    let ty = ctx.instantiate(pair, &[ctx.nullable(nint), inner]);

    let (erased, flags) = ctx.encode_native_flags(ty);
    assert_eq!(flags, vec![true, false, true]);
    assert!(!ctx.flags(erased).has_native_int());
    assert!(ctx.are_equivalent(erased, ty));
    assert_eq!(ctx.count_native_positions(erased), 3);

    assert_eq!(ctx.decode_native_flags(erased, &flags), Ok(ty));
    let all_native = ctx.decode_native_flags(erased, &[true, true, true]).unwrap();
    assert_eq!(
        all_native,
        ctx.instantiate(pair, &[ctx.nullable(nint), ctx.instantiate(pair, &[nint, nuint])])
    );
}

#[test]
fn types_without_pointer_sized_positions() {
    let ctx = core_context();
    let ty = ctx.pointer(ctx.nullable(Idx::LONG));
    assert_eq!(ctx.encode_native_flags(ty), (ty, Vec::new()));
    assert_eq!(ctx.decode_native_flags(ty, &[]), Ok(ty));
}

#[test]
fn mismatched_flags() {
    let (builder, core) = core_builder();
    let ctx = builder.build();
    let int_ptr = ctx.special_type(SpecialType::IntPtr);
    let erased = ctx.instantiate(core.equatable, &[int_ptr]);

    assert_eq!(
        ctx.decode_native_flags(erased, &[true, false]),
        Err(MetadataError::FlagCountMismatch {
            expected: 1,
            found: 2,
        })
    );
    assert_eq!(ctx.decode_native_flags_lossy(erased, &[]), erased);
    assert_eq!(
        ctx.decode_native_flags_lossy(erased, &[true]),
        ctx.instantiate(core.equatable, &[ctx.native_integer(true)])
    );
}

#[test]
fn missing_underlying_round_trips() {
    let ctx = empty_context();
    let nint = ctx.native_integer(true);
    let (erased, flags) = ctx.encode_native_flags(nint);
    assert_eq!(flags, vec![true]);
    assert_eq!(ctx.underlying(nint), Some(erased));
    assert_eq!(ctx.decode_native_flags(erased, &flags), Ok(nint));
}
