use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{core_context, empty_context};
use crate::{SpecialType, TypeErrorKind};

fn unchecked() -> CheckOptions {
    CheckOptions::default()
}

fn binary(
    ctx: &TypeContext,
    op: BinaryOp,
    lhs: Idx,
    rhs: Idx,
) -> Result<OperatorDecision, TypeCheckError> {
    ctx.resolve_binary(op, Operand::new(lhs), Operand::new(rhs), unchecked(), Span::DUMMY)
}

fn promoted(ctx: &TypeContext, lhs: Idx, rhs: Idx) -> Option<NumericKind> {
    binary(ctx, BinaryOp::Add, lhs, rhs)
        .ok()
        .and_then(|d| d.operand_kind)
}

fn is_ambiguous(result: Result<OperatorDecision, TypeCheckError>) -> bool {
    matches!(result, Err(e) if matches!(e.kind, TypeErrorKind::AmbiguousOperator { .. }))
}

#[test]
fn native_promotion_table() {
    use NumericKind as K;

    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let nuint = ctx.native_integer(false);

    assert_eq!(promoted(&ctx, nint, nint), Some(K::NInt));
    assert_eq!(promoted(&ctx, nint, Idx::INT), Some(K::NInt));
    assert_eq!(promoted(&ctx, Idx::SHORT, nint), Some(K::NInt));
    assert_eq!(promoted(&ctx, nint, Idx::UINT), Some(K::Long));
    assert_eq!(promoted(&ctx, nint, Idx::LONG), Some(K::Long));
    assert_eq!(promoted(&ctx, nint, Idx::DOUBLE), Some(K::Double));
    assert_eq!(promoted(&ctx, nuint, Idx::UINT), Some(K::NUInt));
    assert_eq!(promoted(&ctx, nuint, Idx::BYTE), Some(K::NUInt));
    assert_eq!(promoted(&ctx, nuint, Idx::ULONG), Some(K::ULong));
    assert_eq!(promoted(&ctx, nuint, Idx::FLOAT), Some(K::Float));
    assert_eq!(promoted(&ctx, Idx::UINT, Idx::BYTE), Some(K::UInt));
    assert_eq!(promoted(&ctx, Idx::UINT, Idx::SBYTE), Some(K::Long));
}

#[test]
fn mixed_signedness_is_ambiguous() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let nuint = ctx.native_integer(false);

    assert!(is_ambiguous(binary(&ctx, BinaryOp::Add, nint, nuint)));
    assert!(is_ambiguous(binary(&ctx, BinaryOp::Mul, nuint, nint)));
    assert!(is_ambiguous(binary(&ctx, BinaryOp::Add, nuint, Idx::INT)));
    assert!(is_ambiguous(binary(&ctx, BinaryOp::Add, nuint, Idx::SBYTE)));
    assert!(is_ambiguous(binary(&ctx, BinaryOp::Mul, Idx::SHORT, nuint)));
    assert!(is_ambiguous(binary(&ctx, BinaryOp::Sub, Idx::LONG, nuint)));
    assert!(is_ambiguous(binary(&ctx, BinaryOp::Add, nint, Idx::ULONG)));
}

#[test]
fn non_negative_constant_resolves_ambiguity() {
    let ctx = core_context();
    let nuint = ctx.native_integer(false);

    let one = Operand::constant(Idx::INT, Value::int(NumericKind::Int, 1));
    let decision = ctx
        .resolve_binary(BinaryOp::Add, Operand::new(nuint), one, unchecked(), Span::DUMMY)
        .unwrap();
    assert_eq!(decision.operand_kind, Some(NumericKind::NUInt));
    assert_eq!(decision.result, nuint);

    let minus_one = Operand::constant(Idx::INT, Value::int(NumericKind::Int, -1));
    let err = ctx
        .resolve_binary(BinaryOp::Add, Operand::new(nuint), minus_one, unchecked(), Span::DUMMY)
        .unwrap_err();
    assert_eq!(err.code(), natint_diagnostic::ErrorCode::E2003);
}

#[test]
fn decimal_with_float_has_no_operator() {
    let ctx = core_context();
    let err = binary(&ctx, BinaryOp::Add, Idx::DECIMAL, Idx::DOUBLE).unwrap_err();
    assert!(matches!(err.kind, TypeErrorKind::NoApplicableOperator { op: "+", .. }));
    let nint = ctx.native_integer(true);
    assert_eq!(promoted(&ctx, nint, Idx::DECIMAL), Some(NumericKind::Decimal));
}

#[test]
fn native_arithmetic_decisions() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let nuint = ctx.native_integer(false);

    let add = binary(&ctx, BinaryOp::Add, nint, Idx::INT).unwrap();
    assert_eq!(add.width, OperandWidth::Native);
    assert!(add.signed && !add.checked);
    assert_eq!(add.result, nint);
    assert_eq!(add.instruction, Some(Instruction::Add));

    let checked = ctx
        .resolve_binary(
            BinaryOp::Add,
            Operand::new(nuint),
            Operand::new(nuint),
            CheckOptions::checked(),
            Span::DUMMY,
        )
        .unwrap();
    assert!(checked.checked && !checked.signed);
    assert_eq!(checked.instruction, Some(Instruction::AddOvfUn));

    let div = binary(&ctx, BinaryOp::Div, nuint, nuint).unwrap();
    assert_eq!(div.instruction, Some(Instruction::DivUn));
    let shr = binary(&ctx, BinaryOp::Shr, nuint, Idx::INT).unwrap();
    assert_eq!(shr.instruction, Some(Instruction::ShrUn));
    assert_eq!(shr.result, nuint);
    let lt = binary(&ctx, BinaryOp::Lt, nuint, nuint).unwrap();
    assert_eq!(lt.result, Idx::BOOL);
    assert_eq!(lt.instruction, Some(Instruction::CltUn));
}

#[test]
fn result_uses_operand_spelling() {
    let ctx = core_context();
    let int_ptr = ctx.special_type(SpecialType::IntPtr);
    let nint = ctx.native_integer(true);

    // The underlying spelling still resolves to the native view.
    let add = binary(&ctx, BinaryOp::Add, int_ptr, Idx::INT).unwrap();
    assert_eq!(add.result, nint);
    assert_eq!(add.operand_type, nint);
}

#[test]
fn view_and_underlying_operands_are_one_type() {
    let ctx = core_context();
    let int_ptr = ctx.special_type(SpecialType::IntPtr);
    let uint_ptr = ctx.special_type(SpecialType::UIntPtr);
    let nint = ctx.native_integer(true);
    let nuint = ctx.native_integer(false);

    // `nint * System.IntPtr` is arithmetic on a single type, not a mix.
    let mul = binary(&ctx, BinaryOp::Mul, nint, int_ptr).unwrap();
    assert_eq!(mul.operand_kind, Some(NumericKind::NInt));
    assert_eq!(mul.result, nint);
    let mul = binary(&ctx, BinaryOp::Mul, int_ptr, nint).unwrap();
    assert_eq!(mul.result, nint);

    let sub = binary(&ctx, BinaryOp::Sub, uint_ptr, nuint).unwrap();
    assert_eq!(sub.operand_kind, Some(NumericKind::NUInt));
    assert_eq!(sub.result, nuint);

    // Opposite signedness stays ambiguous whichever spelling is used.
    assert!(is_ambiguous(binary(&ctx, BinaryOp::Mul, int_ptr, nuint)));
}

#[test]
fn lifted_operators() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let nint_opt = ctx.nullable(nint);

    let add = binary(&ctx, BinaryOp::Add, nint_opt, Idx::INT).unwrap();
    assert!(add.lifted);
    assert_eq!(add.result, nint_opt);

    let eq = binary(&ctx, BinaryOp::Eq, nint_opt, nint).unwrap();
    assert!(eq.lifted);
    assert_eq!(eq.result, Idx::BOOL);
}

#[test]
fn shifts_take_int_counts() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);

    let shl = binary(&ctx, BinaryOp::Shl, nint, Idx::BYTE).unwrap();
    assert_eq!(shl.operand_kind, Some(NumericKind::NInt));
    assert!(binary(&ctx, BinaryOp::Shl, nint, Idx::LONG).is_err());
    assert!(binary(&ctx, BinaryOp::Shl, Idx::INT, nint).is_err());
    assert!(binary(&ctx, BinaryOp::Shl, Idx::DOUBLE, Idx::INT).is_err());
}

#[test]
fn unary_operators() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let nuint = ctx.native_integer(false);
    let span = Span::DUMMY;

    let neg = ctx
        .resolve_unary(UnaryOp::Minus, Operand::new(nint), unchecked(), span)
        .unwrap();
    assert_eq!(neg.result, nint);
    assert_eq!(neg.instruction, Some(Instruction::Neg));

    let checked_neg = ctx
        .resolve_unary(UnaryOp::Minus, Operand::new(nint), CheckOptions::checked(), span)
        .unwrap();
    assert_eq!(checked_neg.instruction, Some(Instruction::SubOvf));

    let err = ctx
        .resolve_unary(UnaryOp::Minus, Operand::new(nuint), unchecked(), span)
        .unwrap_err();
    assert_eq!(err.code(), natint_diagnostic::ErrorCode::E2001);

    let not = ctx
        .resolve_unary(UnaryOp::BitNot, Operand::new(nuint), unchecked(), span)
        .unwrap();
    assert_eq!(not.result, nuint);
    assert_eq!(not.instruction, Some(Instruction::Not));

    let inc = ctx
        .resolve_unary(UnaryOp::Increment, Operand::new(nuint), CheckOptions::checked(), span)
        .unwrap();
    assert_eq!(inc.instruction, Some(Instruction::AddOvfUn));

    let minus_uint = ctx
        .resolve_unary(UnaryOp::Minus, Operand::new(Idx::UINT), unchecked(), span)
        .unwrap();
    assert_eq!(minus_uint.result, Idx::LONG);

    assert!(ctx
        .resolve_unary(UnaryOp::Not, Operand::new(nint), unchecked(), span)
        .is_err());
}

#[test]
fn degraded_views_have_no_operators() {
    let ctx = empty_context();
    let nint = ctx.native_integer(true);
    let err = binary(&ctx, BinaryOp::Add, nint, Idx::INT).unwrap_err();
    assert!(matches!(err.kind, TypeErrorKind::NoApplicableOperator { .. }));
}

#[test]
fn pointer_arithmetic_needs_unsafe() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let int_ptr = ctx.pointer(Idx::INT);

    let err = binary(&ctx, BinaryOp::Add, int_ptr, nint).unwrap_err();
    assert_eq!(err.kind, TypeErrorKind::RequiresUnsafeContext);

    let options = CheckOptions::default().with_unsafe();
    let add = ctx
        .resolve_binary(BinaryOp::Add, Operand::new(int_ptr), Operand::new(nint), options, Span::DUMMY)
        .unwrap();
    assert_eq!(add.result, int_ptr);
    assert_eq!(add.pointer_element, Some(Idx::INT));
    assert_eq!(add.operand_kind, Some(NumericKind::NInt));
    assert_eq!(add.width, OperandWidth::Native);

    let diff = ctx
        .resolve_binary(BinaryOp::Sub, Operand::new(int_ptr), Operand::new(int_ptr), options, Span::DUMMY)
        .unwrap();
    assert_eq!(diff.result, Idx::LONG);

    let void_ptr = ctx.pointer(Idx::VOID);
    assert!(ctx
        .resolve_binary(BinaryOp::Add, Operand::new(void_ptr), Operand::new(nint), options, Span::DUMMY)
        .is_err());
}

#[test]
fn size_of_native_is_platform_dependent() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let span = Span::DUMMY;

    assert_eq!(ctx.size_of(Idx::LONG, unchecked(), span), Ok(SizeOf::Constant(8)));
    assert_eq!(ctx.size_of(Idx::CHAR, unchecked(), span), Ok(SizeOf::Constant(2)));
    let err = ctx.size_of(nint, unchecked(), span).unwrap_err();
    assert_eq!(err.kind, TypeErrorKind::RequiresUnsafeContext);
    assert_eq!(
        ctx.size_of(nint, CheckOptions::default().with_unsafe(), span),
        Ok(SizeOf::Platform)
    );
    assert!(ctx.size_of(Idx::STRING, unchecked(), span).is_err());

    // A `const` initializer cannot take the native size.
    let unsafe_options = CheckOptions::default().with_unsafe();
    let size = ctx.size_of(Idx::LONG, unsafe_options, span).unwrap();
    assert_eq!(size.require_constant(span), Ok(8));
    let err = ctx
        .size_of(nint, unsafe_options, span)
        .unwrap()
        .require_constant(Span::new(2, 9))
        .unwrap_err();
    assert_eq!(err.kind, TypeErrorKind::NotConstant);
    assert_eq!(err.span, Span::new(2, 9));
}

#[test]
fn bool_operators() {
    let ctx = core_context();
    let and = binary(&ctx, BinaryOp::And, Idx::BOOL, Idx::BOOL).unwrap();
    assert_eq!(and.result, Idx::BOOL);
    assert!(binary(&ctx, BinaryOp::Add, Idx::BOOL, Idx::BOOL).is_err());
    assert_eq!(Operator::Binary(BinaryOp::Shl).to_string(), "<<");
}
