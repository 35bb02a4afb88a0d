use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::core_context;
use crate::{SpecialType, TypeErrorKind};
use natint_diagnostic::ErrorCode;

fn int_constant(value: i128) -> Operand {
    Operand::constant(Idx::INT, Value::int(NumericKind::Int, value))
}

#[test]
fn view_and_underlying_overloads_are_ambiguous() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let int_ptr = ctx.special_type(SpecialType::IntPtr);

    let err = ctx
        .resolve_overload(&[&[nint], &[int_ptr]], &[Operand::new(nint)], Span::DUMMY)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2004);
    match err.kind {
        TypeErrorKind::AmbiguousCall { candidates } => assert_eq!(candidates.as_slice(), &[0, 1]),
        other => panic!("expected ambiguous call, got {other:?}"),
    }
    assert_eq!(ctx.better_conversion(&Operand::new(Idx::INT), nint, int_ptr), Ordering::Equal);
}

#[test]
fn exact_match_wins() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);

    let args = [Operand::new(Idx::INT)];
    assert_eq!(ctx.resolve_overload(&[&[nint], &[Idx::INT]], &args, Span::DUMMY), Ok(1));
    let args = [Operand::new(nint)];
    assert_eq!(ctx.resolve_overload(&[&[Idx::LONG], &[nint]], &args, Span::DUMMY), Ok(1));
}

#[test]
fn narrower_target_wins() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let nuint = ctx.native_integer(false);

    let args = [Operand::new(Idx::INT)];
    assert_eq!(ctx.resolve_overload(&[&[Idx::LONG], &[nint]], &args, Span::DUMMY), Ok(1));
    let args = [Operand::new(Idx::UINT)];
    assert_eq!(
        ctx.resolve_overload(&[&[Idx::ULONG], &[nuint], &[Idx::DOUBLE]], &args, Span::DUMMY),
        Ok(1)
    );
}

#[test]
fn constants_convert_within_portable_range() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let nuint = ctx.native_integer(false);

    assert!(ctx.argument_converts(&int_constant(5), nuint));
    assert!(!ctx.argument_converts(&int_constant(-1), nuint));
    assert!(!ctx.argument_converts(&Operand::new(Idx::INT), nuint));
    assert!(ctx.argument_converts(&int_constant(200), Idx::BYTE));
    assert!(!ctx.argument_converts(&int_constant(300), Idx::BYTE));

    // Signed wins over unsigned when neither converts to the other.
    assert_eq!(
        ctx.resolve_overload(&[&[nuint], &[nint]], &[int_constant(5)], Span::DUMMY),
        Ok(1)
    );

    let err = ctx
        .resolve_overload(&[&[nuint]], &[int_constant(-1)], Span::DUMMY)
        .unwrap_err();
    assert_eq!(err.kind, TypeErrorKind::NoApplicableOverload { args: 1 });
}

#[test]
fn arity_must_match() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let err = ctx
        .resolve_overload(&[&[nint, nint]], &[Operand::new(nint)], Span::new(1, 2))
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2005);
    assert_eq!(err.span, Span::new(1, 2));
}

#[test]
fn resolve_call_on_view_members() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let explicit = ctx.name("op_Explicit");

    let from_long = ctx
        .resolve_call(nint, explicit, &[Operand::new(Idx::LONG)], Span::DUMMY)
        .unwrap();
    assert_eq!(from_long.param_types().as_slice(), &[Idx::LONG]);
    assert_eq!(from_long.ret, nint);

    let from_int = ctx
        .resolve_call(nint, explicit, &[Operand::new(Idx::INT)], Span::DUMMY)
        .unwrap();
    assert_eq!(from_int.param_types().as_slice(), &[Idx::INT]);

    let equals = ctx
        .resolve_call(nint, ctx.name("Equals"), &[Operand::new(nint)], Span::DUMMY)
        .unwrap();
    assert_eq!(equals.containing, nint);

    let missing = ctx.resolve_call(nint, ctx.name("Nope"), &[], Span::DUMMY);
    assert!(matches!(
        missing,
        Err(TypeCheckError {
            kind: TypeErrorKind::NoSuchMember { .. },
            ..
        })
    ));
}
