//! Constant folding of built-in operators and numeric conversions.
//!
//! Fixed-width integral constants fold as usual: unchecked arithmetic
//! wraps, checked arithmetic that leaves the kind's range is an error.
//!
//! Native constants are only known to fit in 32 bits, so every operation
//! on them is evaluated at both 32-bit and 64-bit width:
//!
//! - checked: a result outside the portable range is an overflow error;
//! - unchecked: if the two widths disagree the expression is not a
//!   constant and is left to runtime;
//! - otherwise the common result is the constant.
//!
//! Division or remainder by a constant zero is an error in every context.

use natint_ir::Span;

use crate::conversions::{ConversionDecision, ConversionKind};
use crate::operators::{BinaryOp, Operator, OperatorDecision, UnaryOp};
use crate::value::{in_range, wrap};
use crate::{NumericKind, TypeCheckError, Value};

/// Outcome of folding.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Folded {
    Constant(Value),
    /// The value depends on the platform; evaluate at runtime.
    NotConstant,
}

impl Folded {
    /// The value where the language requires a constant (a `const`
    /// declaration, a `case` label); a platform-dependent value is an error.
    pub fn require_constant(self, span: Span) -> Result<Value, TypeCheckError> {
        match self {
            Folded::Constant(value) => Ok(value),
            Folded::NotConstant => Err(TypeCheckError::not_constant(span)),
        }
    }
}

pub type FoldResult = Result<Folded, TypeCheckError>;

/// Integral operation shared by folding and evaluation.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum IntOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    And,
    Or,
    Xor,
}

impl IntOp {
    pub(crate) fn from_binary(op: BinaryOp) -> Option<Self> {
        Some(match op {
            BinaryOp::Add => IntOp::Add,
            BinaryOp::Sub => IntOp::Sub,
            BinaryOp::Mul => IntOp::Mul,
            BinaryOp::Div => IntOp::Div,
            BinaryOp::Rem => IntOp::Rem,
            BinaryOp::Shl => IntOp::Shl,
            BinaryOp::Shr => IntOp::Shr,
            BinaryOp::And => IntOp::And,
            BinaryOp::Or => IntOp::Or,
            BinaryOp::Xor => IntOp::Xor,
            _ => return None,
        })
    }

    /// Operations whose result can leave the operand range.
    pub(crate) fn can_overflow(self) -> bool {
        matches!(
            self,
            IntOp::Add | IntOp::Sub | IntOp::Mul | IntOp::Div | IntOp::Rem
        )
    }
}

/// Result of an integral operation at one width.
pub(crate) struct IntResult {
    /// The mathematical result, when it fits an `i128`.
    pub exact: Option<i128>,
    /// The low bits of the result.
    pub wrapped: i128,
}

/// Perform `a op b` at `bits` width. `None` on division by zero.
pub(crate) fn apply_int(op: IntOp, a: i128, b: i128, bits: u32, signed: bool) -> Option<IntResult> {
    let shift_count = || {
        let mask = i128::from(bits - 1);
        // Masked into 0..bits.
        u32::try_from(b & mask).unwrap_or(0)
    };
    let (exact, wrapped) = match op {
        IntOp::Add => (a.checked_add(b), a.wrapping_add(b)),
        IntOp::Sub => (a.checked_sub(b), a.wrapping_sub(b)),
        IntOp::Mul => (a.checked_mul(b), a.wrapping_mul(b)),
        IntOp::Div | IntOp::Rem if b == 0 => return None,
        IntOp::Div => (a.checked_div(b), a.wrapping_div(b)),
        IntOp::Rem => (a.checked_rem(b), a.wrapping_rem(b)),
        IntOp::Shl => {
            let r = wrap(a.wrapping_shl(shift_count()), bits, signed);
            (Some(r), r)
        }
        IntOp::Shr => {
            let r = wrap(a, bits, signed) >> shift_count();
            (Some(r), r)
        }
        IntOp::And => (Some(a & b), a & b),
        IntOp::Or => (Some(a | b), a | b),
        IntOp::Xor => (Some(a ^ b), a ^ b),
    };
    Some(IntResult { exact, wrapped })
}

/// Fold an integral operation on `kind` operands.
fn fold_int(
    op: IntOp,
    kind: NumericKind,
    a: i128,
    b: i128,
    checked: bool,
    span: Span,
) -> FoldResult {
    let signed = !kind.is_unsigned();
    let apply = |bits: u32| {
        apply_int(op, a, b, bits, signed).ok_or_else(|| TypeCheckError::divide_by_zero(span))
    };
    let constant = |value: i128| Ok(Folded::Constant(Value::int(kind, value)));

    if let Some(bits) = kind.fixed_bits() {
        let r = apply(bits)?;
        return match r.exact {
            Some(exact) if in_range(exact, kind.range_at(bits)) => constant(exact),
            _ if checked && op.can_overflow() => Err(TypeCheckError::overflow(span, kind)),
            _ => constant(wrap(r.wrapped, bits, signed)),
        };
    }

    let r32 = apply(32)?;
    let r64 = apply(64)?;
    if checked && op.can_overflow() {
        return match r64.exact {
            Some(exact) if in_range(exact, kind.portable_range()) => constant(exact),
            _ => Err(TypeCheckError::overflow(span, kind)),
        };
    }
    let w32 = wrap(r32.wrapped, 32, signed);
    let w64 = wrap(r64.wrapped, 64, signed);
    if w32 == w64 {
        constant(w32)
    } else {
        tracing::trace!(?op, %kind, ?w32, ?w64, "native constant differs by platform");
        Ok(Folded::NotConstant)
    }
}

#[allow(clippy::float_cmp)]
pub(crate) fn fold_real(op: BinaryOp, kind: NumericKind, a: f64, b: f64) -> Folded {
    let value = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => a / b,
        BinaryOp::Rem => a % b,
        BinaryOp::Lt => return Folded::Constant(Value::Bool(a < b)),
        BinaryOp::Le => return Folded::Constant(Value::Bool(a <= b)),
        BinaryOp::Gt => return Folded::Constant(Value::Bool(a > b)),
        BinaryOp::Ge => return Folded::Constant(Value::Bool(a >= b)),
        BinaryOp::Eq => return Folded::Constant(Value::Bool(a == b)),
        BinaryOp::Ne => return Folded::Constant(Value::Bool(a != b)),
        BinaryOp::Shl | BinaryOp::Shr | BinaryOp::And | BinaryOp::Or | BinaryOp::Xor => {
            return Folded::NotConstant;
        }
    };
    Folded::Constant(Value::real(kind, value))
}

fn compare(op: BinaryOp, a: i128, b: i128) -> Option<bool> {
    Some(match op {
        BinaryOp::Lt => a < b,
        BinaryOp::Le => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::Ge => a >= b,
        BinaryOp::Eq => a == b,
        BinaryOp::Ne => a != b,
        _ => return None,
    })
}

fn fold_bool(op: BinaryOp, a: bool, b: bool) -> Folded {
    let value = match op {
        BinaryOp::Eq => a == b,
        BinaryOp::Ne => a != b,
        BinaryOp::And => a & b,
        BinaryOp::Or => a | b,
        BinaryOp::Xor => a ^ b,
        _ => return Folded::NotConstant,
    };
    Folded::Constant(Value::Bool(value))
}

/// Fold a resolved binary operator applied to constants.
pub fn fold_binary(decision: &OperatorDecision, lhs: Value, rhs: Value, span: Span) -> FoldResult {
    let Operator::Binary(op) = decision.op else {
        return Ok(Folded::NotConstant);
    };
    if decision.pointer_element.is_some() {
        return Ok(Folded::NotConstant);
    }
    if let (Value::Bool(a), Value::Bool(b)) = (lhs, rhs) {
        return Ok(fold_bool(op, a, b));
    }
    let Some(kind) = decision.operand_kind else {
        return Ok(Folded::NotConstant);
    };

    match kind {
        NumericKind::Decimal => Ok(Folded::NotConstant),
        k if k.is_floating() => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(a), Some(b)) => Ok(fold_real(op, kind, a, b)),
            _ => Ok(Folded::NotConstant),
        },
        _ => {
            let (Some(a), Some(b)) = (lhs.as_int(), rhs.as_int()) else {
                return Ok(Folded::NotConstant);
            };
            if matches!(op, BinaryOp::Div | BinaryOp::Rem) && b == 0 {
                return Err(TypeCheckError::divide_by_zero(span));
            }
            if let Some(result) = compare(op, a, b) {
                return Ok(Folded::Constant(Value::Bool(result)));
            }
            match IntOp::from_binary(op) {
                Some(int_op) => fold_int(int_op, kind, a, b, decision.checked, span),
                None => Ok(Folded::NotConstant),
            }
        }
    }
}

/// Fold a resolved unary operator applied to a constant.
pub fn fold_unary(decision: &OperatorDecision, operand: Value, span: Span) -> FoldResult {
    let Operator::Unary(op) = decision.op else {
        return Ok(Folded::NotConstant);
    };
    if let Value::Bool(b) = operand {
        return Ok(match op {
            UnaryOp::Not => Folded::Constant(Value::Bool(!b)),
            _ => Folded::NotConstant,
        });
    }
    let Some(kind) = decision.operand_kind else {
        return Ok(Folded::NotConstant);
    };
    if matches!(op, UnaryOp::Increment | UnaryOp::Decrement) || kind == NumericKind::Decimal {
        return Ok(Folded::NotConstant);
    }

    if kind.is_floating() {
        let Some(a) = operand.as_f64() else {
            return Ok(Folded::NotConstant);
        };
        return Ok(match op {
            UnaryOp::Plus => Folded::Constant(Value::real(kind, a)),
            UnaryOp::Minus => Folded::Constant(Value::real(kind, -a)),
            _ => Folded::NotConstant,
        });
    }

    let Some(a) = operand.as_int() else {
        return Ok(Folded::NotConstant);
    };
    match op {
        UnaryOp::Plus => Ok(Folded::Constant(Value::int(kind, a))),
        UnaryOp::Minus => fold_int(IntOp::Sub, kind, 0, a, decision.checked, span),
        UnaryOp::BitNot => fold_int(IntOp::Xor, kind, a, -1, decision.checked, span),
        UnaryOp::Not | UnaryOp::Increment | UnaryOp::Decrement => Ok(Folded::NotConstant),
    }
}

/// Truncate a finite float towards zero; `None` when out of `i128` range.
#[expect(
    clippy::cast_possible_truncation,
    reason = "range is checked before the cast"
)]
pub(crate) fn truncate_real(value: f64) -> Option<i128> {
    const LIMIT: f64 = 1.7e38;
    if value.is_finite() && value.abs() < LIMIT {
        Some(value.trunc() as i128)
    } else {
        None
    }
}

/// Fold a resolved conversion applied to a constant.
pub fn fold_conversion(decision: &ConversionDecision, value: Value, span: Span) -> FoldResult {
    if decision.kind == ConversionKind::Identity {
        return Ok(Folded::Constant(match (value, decision.target) {
            (Value::Int { value, .. }, Some(kind)) => Value::int(kind, value),
            _ => value,
        }));
    }
    let (Some(source), Some(target)) = (decision.source, decision.target) else {
        return Ok(Folded::NotConstant);
    };
    if source == NumericKind::Decimal || target == NumericKind::Decimal {
        return Ok(Folded::NotConstant);
    }
    if target.is_floating() {
        return Ok(value
            .as_f64()
            .map_or(Folded::NotConstant, |v| Folded::Constant(Value::real(target, v))));
    }

    let from_real = matches!(value, Value::Real { .. });
    let exact = match value {
        Value::Int { value, .. } => Some(value),
        Value::Real { value, .. } => truncate_real(value),
        Value::Bool(_) => return Ok(Folded::NotConstant),
    };
    let signed = !target.is_unsigned();
    let constant = |v: i128| Ok(Folded::Constant(Value::int(target, v)));

    let range = match target.fixed_bits() {
        Some(bits) => target.range_at(bits),
        None => target.portable_range(),
    };
    let Some(v) = exact else {
        return if decision.checked {
            Err(TypeCheckError::overflow(span, target))
        } else {
            Ok(Folded::NotConstant)
        };
    };
    if in_range(v, range) {
        return constant(v);
    }
    if decision.checked {
        return Err(TypeCheckError::overflow(span, target));
    }
    if from_real {
        return Ok(Folded::NotConstant);
    }

    match target.fixed_bits() {
        Some(bits) => constant(wrap(v, bits, signed)),
        None => {
            let (w32, w64) = (wrap(v, 32, signed), wrap(v, 64, signed));
            if w32 == w64 {
                constant(w32)
            } else {
                Ok(Folded::NotConstant)
            }
        }
    }
}
