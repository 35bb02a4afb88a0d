//! Constant and runtime values.
//!
//! Integral values are stored as their exact mathematical value in an
//! `i128`, which holds every value of every integral kind at every width.
//! Unsigned values are therefore never negative.

use std::fmt;

use crate::NumericKind;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Value {
    Int { kind: NumericKind, value: i128 },
    /// `float` or `double`; `float` values are rounded to `f32`.
    Real { kind: NumericKind, value: f64 },
    Bool(bool),
}

impl Value {
    #[inline]
    pub const fn int(kind: NumericKind, value: i128) -> Self {
        Value::Int { kind, value }
    }

    pub fn real(kind: NumericKind, value: f64) -> Self {
        let value = if matches!(kind, NumericKind::Float) {
            f64::from(round_to_f32(value))
        } else {
            value
        };
        Value::Real { kind, value }
    }

    pub fn kind(self) -> Option<NumericKind> {
        match self {
            Value::Int { kind, .. } | Value::Real { kind, .. } => Some(kind),
            Value::Bool(_) => None,
        }
    }

    pub fn as_int(self) -> Option<i128> {
        match self {
            Value::Int { value, .. } => Some(value),
            _ => None,
        }
    }

    /// The value as a float, for integral and real values.
    #[expect(
        clippy::cast_precision_loss,
        reason = "integral to floating conversion rounds by definition"
    )]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Value::Int { value, .. } => Some(value as f64),
            Value::Real { value, .. } => Some(value),
            Value::Bool(_) => None,
        }
    }

    /// Check if this is an integral constant `>= 0`.
    ///
    /// Such constants convert implicitly to any unsigned kind whose range
    /// contains them, which removes some operator ambiguities.
    pub fn is_non_negative_int(self) -> bool {
        matches!(self, Value::Int { value, .. } if value >= 0)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "float constants are rounded to single precision"
)]
fn round_to_f32(value: f64) -> f32 {
    value as f32
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int { value, .. } => write!(f, "{value}"),
            Value::Real { value, .. } => write!(f, "{value}"),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Truncate an exact value to `bits` bits, two's complement.
///
/// The result is the value of that bit pattern read as signed or unsigned.
pub(crate) fn wrap(value: i128, bits: u32, signed: bool) -> i128 {
    if bits >= 128 {
        return value;
    }
    let modulus = 1i128 << bits;
    let low = value.rem_euclid(modulus);
    if signed && low >= modulus >> 1 {
        low - modulus
    } else {
        low
    }
}

/// Check if an exact value lies in an inclusive range.
#[inline]
pub(crate) fn in_range(value: i128, (min, max): (i128, i128)) -> bool {
    min <= value && value <= max
}
