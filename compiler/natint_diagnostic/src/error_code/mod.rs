//! Error codes for every diagnostic the type checker reports.
//!
//! Each code is a unique identifier (e.g. `E1001`) whose first digit names
//! the area of the checker that reports it.

use std::fmt;

/// Error codes for all diagnostics.
///
/// Format: E#### where first digit indicates area:
/// - E0xxx: Type resolution and lookup
/// - E1xxx: Conversions
/// - E2xxx: Operators and overloads
/// - E3xxx: Constant folding
/// - E4xxx: Declarations
/// - Wxxxx: Warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Resolution (E0xxx)
    /// Pointer-sized integer type missing from referenced metadata
    E0001,
    /// Native integers not available in the selected language version
    E0002,
    /// No member with that name on the type
    E0003,
    /// Type name not found
    E0004,

    // Conversions (E1xxx)
    /// No implicit conversion exists
    E1001,
    /// No implicit conversion exists, but an explicit one does
    E1002,
    /// No conversion exists at all
    E1003,

    // Operators and overloads (E2xxx)
    /// Unary operator cannot be applied to the operand
    E2001,
    /// Binary operator cannot be applied to the operands
    E2002,
    /// Operator is ambiguous between equally good candidates
    E2003,
    /// Call is ambiguous between equally good overloads
    E2004,
    /// No overload accepts the arguments
    E2005,
    /// Operation requires an unsafe context
    E2006,

    // Constant folding (E3xxx)
    /// Constant operation overflows in a checked context
    E3001,
    /// Division by constant zero
    E3002,
    /// Expression is not a compile-time constant
    E3003,

    // Declarations (E4xxx)
    /// Member with an equivalent signature already declared
    E4001,
    /// `override` without a suitable virtual base member
    E4002,

    // Warnings
    /// Member hides an inherited member
    W4001,
}

impl ErrorCode {
    /// All error code variants, for iteration and completeness testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E0001,
        ErrorCode::E0002,
        ErrorCode::E0003,
        ErrorCode::E0004,
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E4001,
        ErrorCode::E4002,
        ErrorCode::W4001,
    ];

    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::W4001 => "W4001",
        }
    }

    /// One-line description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "underlying integer type is missing from metadata",
            ErrorCode::E0002 => "native integers are not available in this language version",
            ErrorCode::E0003 => "type has no member with that name",
            ErrorCode::E0004 => "type name not found",
            ErrorCode::E1001 => "no implicit conversion exists",
            ErrorCode::E1002 => "no implicit conversion exists; an explicit conversion exists",
            ErrorCode::E1003 => "no conversion exists",
            ErrorCode::E2001 => "operator cannot be applied to operand",
            ErrorCode::E2002 => "operator cannot be applied to operands",
            ErrorCode::E2003 => "operator is ambiguous",
            ErrorCode::E2004 => "call is ambiguous",
            ErrorCode::E2005 => "no overload takes these arguments",
            ErrorCode::E2006 => "operation requires an unsafe context",
            ErrorCode::E3001 => "constant value overflows in checked context",
            ErrorCode::E3002 => "division by constant zero",
            ErrorCode::E3003 => "expression is not a compile-time constant",
            ErrorCode::E4001 => "member is already declared",
            ErrorCode::E4002 => "no suitable member found to override",
            ErrorCode::W4001 => "member hides inherited member",
        }
    }

    /// Check if this is a warning code (Wxxxx).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W4001)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
