//! Reference runtime semantics of resolved operators.
//!
//! Executes an [`OperatorDecision`] or [`ConversionDecision`] on values for
//! a concrete pointer width. Unchecked integral arithmetic wraps at the
//! operand width; checked arithmetic raises `Overflow`. Division and
//! remainder by zero raise `DivideByZero`, and the most negative value
//! divided by `-1` raises `Overflow`, in every context.

use bitflags::bitflags;

use crate::const_fold::{apply_int, fold_real, truncate_real, Folded, IntOp};
use crate::conversions::{ConversionDecision, ConversionKind};
use crate::operators::{BinaryOp, Operator, OperatorDecision, UnaryOp};
use crate::value::{in_range, wrap};
use crate::{NumericKind, Value};

/// Pointer width of the target platform.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PointerWidth {
    Bits32,
    Bits64,
}

impl PointerWidth {
    pub const fn bits(self) -> u32 {
        match self {
            PointerWidth::Bits32 => 32,
            PointerWidth::Bits64 => 64,
        }
    }
}

/// Errors raised by executing an operation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("arithmetic operation resulted in an overflow")]
    Overflow,
    #[error("attempted to divide by zero")]
    DivideByZero,
    /// The decision and the values do not fit together.
    #[error("operation is not defined for these operands")]
    InvalidOperands,
}

bitflags! {
    /// Runtime errors an operation may raise.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct Raises: u8 {
        const OVERFLOW = 1 << 0;
        const DIVIDE_BY_ZERO = 1 << 1;
    }
}

impl OperatorDecision {
    /// Which runtime errors this operation may raise.
    pub fn can_raise(&self) -> Raises {
        let Some(kind) = self.operand_kind else {
            return Raises::empty();
        };
        if self.pointer_element.is_some() {
            return Raises::empty();
        }
        let decimal = kind == NumericKind::Decimal;
        if !kind.is_integral() && !decimal {
            return Raises::empty();
        }
        match self.op {
            Operator::Binary(BinaryOp::Div | BinaryOp::Rem) => {
                let mut raises = Raises::DIVIDE_BY_ZERO;
                if decimal || !kind.is_unsigned() {
                    raises |= Raises::OVERFLOW;
                }
                raises
            }
            Operator::Binary(BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul)
            | Operator::Unary(UnaryOp::Minus | UnaryOp::Increment | UnaryOp::Decrement)
                if self.checked || decimal =>
            {
                Raises::OVERFLOW
            }
            _ => Raises::empty(),
        }
    }
}

/// Integral arithmetic at the operand width.
fn eval_int(
    op: IntOp,
    kind: NumericKind,
    a: i128,
    b: i128,
    checked: bool,
    width: PointerWidth,
) -> Result<Value, RuntimeError> {
    let bits = kind.bits_at(width.bits());
    let signed = !kind.is_unsigned();
    let range = kind.range_at(width.bits());
    let r = apply_int(op, a, b, bits, signed).ok_or(RuntimeError::DivideByZero)?;
    let in_bounds = r.exact.is_some_and(|exact| in_range(exact, range));

    if !in_bounds && matches!(op, IntOp::Div | IntOp::Rem) {
        // MIN / -1 traps regardless of context.
        return Err(RuntimeError::Overflow);
    }
    if op == IntOp::Rem && signed && b == -1 && a == range.0 {
        return Err(RuntimeError::Overflow);
    }
    if !in_bounds && checked && op.can_overflow() {
        return Err(RuntimeError::Overflow);
    }
    Ok(Value::int(kind, wrap(r.wrapped, bits, signed)))
}

/// Execute a binary operator.
pub fn eval_binary(
    decision: &OperatorDecision,
    lhs: Value,
    rhs: Value,
    width: PointerWidth,
) -> Result<Value, RuntimeError> {
    let Operator::Binary(op) = decision.op else {
        return Err(RuntimeError::InvalidOperands);
    };
    if let (Value::Bool(a), Value::Bool(b)) = (lhs, rhs) {
        return Ok(Value::Bool(match op {
            BinaryOp::Eq => a == b,
            BinaryOp::Ne => a != b,
            BinaryOp::And => a & b,
            BinaryOp::Or => a | b,
            BinaryOp::Xor => a ^ b,
            _ => return Err(RuntimeError::InvalidOperands),
        }));
    }
    let kind = decision.operand_kind.ok_or(RuntimeError::InvalidOperands)?;
    if kind.is_floating() {
        let (Some(a), Some(b)) = (lhs.as_f64(), rhs.as_f64()) else {
            return Err(RuntimeError::InvalidOperands);
        };
        return match fold_real(op, kind, a, b) {
            Folded::Constant(value) => Ok(value),
            Folded::NotConstant => Err(RuntimeError::InvalidOperands),
        };
    }
    if !kind.is_integral() {
        return Err(RuntimeError::InvalidOperands);
    }
    let (Some(a), Some(b)) = (lhs.as_int(), rhs.as_int()) else {
        return Err(RuntimeError::InvalidOperands);
    };

    let compared = match op {
        BinaryOp::Lt => Some(a < b),
        BinaryOp::Le => Some(a <= b),
        BinaryOp::Gt => Some(a > b),
        BinaryOp::Ge => Some(a >= b),
        BinaryOp::Eq => Some(a == b),
        BinaryOp::Ne => Some(a != b),
        _ => None,
    };
    if let Some(result) = compared {
        return Ok(Value::Bool(result));
    }
    let int_op = IntOp::from_binary(op).ok_or(RuntimeError::InvalidOperands)?;
    eval_int(int_op, kind, a, b, decision.checked, width)
}

/// Execute a unary operator.
pub fn eval_unary(
    decision: &OperatorDecision,
    operand: Value,
    width: PointerWidth,
) -> Result<Value, RuntimeError> {
    let Operator::Unary(op) = decision.op else {
        return Err(RuntimeError::InvalidOperands);
    };
    if let Value::Bool(b) = operand {
        return match op {
            UnaryOp::Not => Ok(Value::Bool(!b)),
            _ => Err(RuntimeError::InvalidOperands),
        };
    }
    let kind = decision
        .operand_kind
        .filter(|k| k.is_integral())
        .ok_or(RuntimeError::InvalidOperands)?;
    let a = operand.as_int().ok_or(RuntimeError::InvalidOperands)?;
    match op {
        UnaryOp::Plus => Ok(Value::int(kind, a)),
        UnaryOp::Minus => eval_int(IntOp::Sub, kind, 0, a, decision.checked, width),
        UnaryOp::BitNot => eval_int(IntOp::Xor, kind, a, -1, decision.checked, width),
        UnaryOp::Increment => eval_int(IntOp::Add, kind, a, 1, decision.checked, width),
        UnaryOp::Decrement => eval_int(IntOp::Sub, kind, a, 1, decision.checked, width),
        UnaryOp::Not => Err(RuntimeError::InvalidOperands),
    }
}

/// Execute a numeric conversion.
pub fn eval_conversion(
    decision: &ConversionDecision,
    value: Value,
    width: PointerWidth,
) -> Result<Value, RuntimeError> {
    if decision.kind == ConversionKind::Identity {
        return Ok(value);
    }
    let target = decision.target.ok_or(RuntimeError::InvalidOperands)?;
    if target.is_floating() {
        return value
            .as_f64()
            .map(|v| Value::real(target, v))
            .ok_or(RuntimeError::InvalidOperands);
    }
    if !target.is_integral() {
        return Err(RuntimeError::InvalidOperands);
    }

    let bits = target.bits_at(width.bits());
    let signed = !target.is_unsigned();
    let exact = match value {
        Value::Int { value, .. } => Some(value),
        Value::Real { value, .. } => truncate_real(value),
        Value::Bool(_) => return Err(RuntimeError::InvalidOperands),
    };
    match exact {
        Some(v) if in_range(v, target.range_at(width.bits())) => Ok(Value::int(target, v)),
        _ if decision.checked => Err(RuntimeError::Overflow),
        Some(v) => Ok(Value::int(target, wrap(v, bits, signed))),
        // Unchecked out-of-range float conversions are unspecified; yield zero.
        None => Ok(Value::int(target, 0)),
    }
}

#[cfg(test)]
mod tests;
