use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::test_helpers::core_context;
use crate::{CheckOptions, ConversionContext, Idx, Operand, TypeContext};
use natint_ir::Span;

use NumericKind as K;
use PointerWidth::{Bits32, Bits64};

fn binary(ctx: &TypeContext, op: BinaryOp, ty: Idx, checked: bool) -> OperatorDecision {
    let options = if checked {
        CheckOptions::checked()
    } else {
        CheckOptions::default()
    };
    ctx.resolve_binary(op, Operand::new(ty), Operand::new(ty), options, Span::DUMMY)
        .unwrap()
}

fn unary(ctx: &TypeContext, op: UnaryOp, ty: Idx, checked: bool) -> OperatorDecision {
    let options = if checked {
        CheckOptions::checked()
    } else {
        CheckOptions::default()
    };
    ctx.resolve_unary(op, Operand::new(ty), options, Span::DUMMY)
        .unwrap()
}

#[test]
fn unsigned_native_wraps_per_platform() {
    let ctx = core_context();
    let nuint = ctx.native_integer(false);
    let sub = binary(&ctx, BinaryOp::Sub, nuint, false);
    let (zero, one) = (Value::int(K::NUInt, 0), Value::int(K::NUInt, 1));

    assert_eq!(
        eval_binary(&sub, zero, one, Bits32),
        Ok(Value::int(K::NUInt, i128::from(u32::MAX)))
    );
    assert_eq!(
        eval_binary(&sub, zero, one, Bits64),
        Ok(Value::int(K::NUInt, i128::from(u64::MAX)))
    );

    let checked = binary(&ctx, BinaryOp::Sub, nuint, true);
    assert_eq!(eval_binary(&checked, zero, one, Bits64), Err(RuntimeError::Overflow));
}

#[test]
fn signed_native_overflow_depends_on_width() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let add = binary(&ctx, BinaryOp::Add, nint, true);
    let max32 = Value::int(K::NInt, i128::from(i32::MAX));
    let one = Value::int(K::NInt, 1);

    assert_eq!(eval_binary(&add, max32, one, Bits32), Err(RuntimeError::Overflow));
    assert_eq!(
        eval_binary(&add, max32, one, Bits64),
        Ok(Value::int(K::NInt, i128::from(i32::MAX) + 1))
    );
}

#[test]
fn division_traps() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let min = Value::int(K::NInt, i128::from(i64::MIN));
    let minus_one = Value::int(K::NInt, -1);
    let zero = Value::int(K::NInt, 0);

    for op in [BinaryOp::Div, BinaryOp::Rem] {
        let decision = binary(&ctx, op, nint, false);
        assert_eq!(
            eval_binary(&decision, min, minus_one, Bits64),
            Err(RuntimeError::Overflow)
        );
        assert_eq!(
            eval_binary(&decision, Value::int(K::NInt, 5), zero, Bits32),
            Err(RuntimeError::DivideByZero)
        );
        assert_eq!(
            decision.can_raise(),
            Raises::DIVIDE_BY_ZERO | Raises::OVERFLOW
        );
    }

    let nuint = ctx.native_integer(false);
    assert_eq!(
        binary(&ctx, BinaryOp::Div, nuint, false).can_raise(),
        Raises::DIVIDE_BY_ZERO
    );
}

#[test]
fn can_raise_follows_checked_context() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);

    assert_eq!(binary(&ctx, BinaryOp::Add, nint, false).can_raise(), Raises::empty());
    assert_eq!(binary(&ctx, BinaryOp::Add, nint, true).can_raise(), Raises::OVERFLOW);
    assert_eq!(unary(&ctx, UnaryOp::Minus, nint, true).can_raise(), Raises::OVERFLOW);
    assert_eq!(binary(&ctx, BinaryOp::And, nint, true).can_raise(), Raises::empty());
    assert_eq!(
        binary(&ctx, BinaryOp::Add, Idx::DECIMAL, false).can_raise(),
        Raises::OVERFLOW
    );
    assert_eq!(
        binary(&ctx, BinaryOp::Div, Idx::DOUBLE, false).can_raise(),
        Raises::empty()
    );
}

#[test]
fn negating_minimum() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let min32 = Value::int(K::NInt, i128::from(i32::MIN));

    let neg = unary(&ctx, UnaryOp::Minus, nint, false);
    assert_eq!(eval_unary(&neg, min32, Bits32), Ok(min32));
    assert_eq!(
        eval_unary(&neg, min32, Bits64),
        Ok(Value::int(K::NInt, -i128::from(i32::MIN)))
    );

    let checked = unary(&ctx, UnaryOp::Minus, nint, true);
    assert_eq!(eval_unary(&checked, min32, Bits32), Err(RuntimeError::Overflow));
}

#[test]
fn conversions_at_width() {
    let ctx = core_context();
    let nint = ctx.native_integer(true);
    let unchecked = ConversionContext::explicit(CheckOptions::default());
    let checked = ConversionContext::explicit(CheckOptions::checked());
    let big = Value::int(K::Long, 5_000_000_000);

    let narrow = ctx.resolve_conversion(Idx::LONG, nint, unchecked).unwrap();
    assert_eq!(
        eval_conversion(&narrow, big, Bits32),
        Ok(Value::int(K::NInt, 705_032_704))
    );
    assert_eq!(
        eval_conversion(&narrow, big, Bits64),
        Ok(Value::int(K::NInt, 5_000_000_000))
    );

    let narrow_checked = ctx.resolve_conversion(Idx::LONG, nint, checked).unwrap();
    assert_eq!(
        eval_conversion(&narrow_checked, big, Bits32),
        Err(RuntimeError::Overflow)
    );

    let from_nan = ctx.resolve_conversion(Idx::DOUBLE, nint, unchecked).unwrap();
    assert_eq!(
        eval_conversion(&from_nan, Value::real(K::Double, f64::NAN), Bits64),
        Ok(Value::int(K::NInt, 0))
    );

    let to_double = ctx.resolve_conversion(nint, Idx::DOUBLE, unchecked).unwrap();
    assert_eq!(
        eval_conversion(&to_double, Value::int(K::NInt, -2), Bits64),
        Ok(Value::real(K::Double, -2.0))
    );
}

#[test]
fn mismatched_values_are_rejected() {
    let ctx = core_context();
    let add = binary(&ctx, BinaryOp::Add, Idx::INT, false);
    assert_eq!(
        eval_binary(&add, Value::Bool(true), Value::int(K::Int, 1), Bits64),
        Err(RuntimeError::InvalidOperands)
    );
    assert_eq!(
        eval_unary(&add, Value::int(K::Int, 1), Bits64),
        Err(RuntimeError::InvalidOperands)
    );
}

proptest! {
    #[test]
    fn double_negation_is_identity(x in any::<i64>(), wide in any::<bool>()) {
        let ctx = core_context();
        let nint = ctx.native_integer(true);
        let neg = unary(&ctx, UnaryOp::Minus, nint, false);
        let (width, x) = if wide {
            (Bits64, i128::from(x))
        } else {
            (Bits32, i128::from(x as i32))
        };
        let value = Value::int(K::NInt, x);

        let once = eval_unary(&neg, value, width).unwrap();
        prop_assert_eq!(eval_unary(&neg, once, width), Ok(value));
    }

    #[test]
    fn unchecked_add_stays_in_range(a in any::<i32>(), b in any::<i32>()) {
        let ctx = core_context();
        let nint = ctx.native_integer(true);
        let add = binary(&ctx, BinaryOp::Add, nint, false);
        let lhs = Value::int(K::NInt, i128::from(a));
        let rhs = Value::int(K::NInt, i128::from(b));

        let narrow = eval_binary(&add, lhs, rhs, Bits32).unwrap();
        prop_assert_eq!(narrow, Value::int(K::NInt, i128::from(a.wrapping_add(b))));
        let wide = eval_binary(&add, lhs, rhs, Bits64).unwrap();
        prop_assert_eq!(wide, Value::int(K::NInt, i128::from(a) + i128::from(b)));
    }
}
