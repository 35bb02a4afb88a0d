//! Instructions selected for conversions and operators.
//!
//! The checker does not emit code, but every decision records the stack
//! machine instruction a code generator has to use, because that is where
//! native integers differ from their fixed-width neighbours: `conv.i`
//! versus `conv.i8`, `add.ovf.un` versus `add`, `shr.un` versus `shr`.

use std::fmt;

use crate::NumericKind;

/// Target of a `conv*` instruction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConvTarget {
    I1,
    U1,
    I2,
    U2,
    I4,
    U4,
    I8,
    U8,
    /// Native signed.
    I,
    /// Native unsigned.
    U,
    R4,
    R8,
}

impl ConvTarget {
    /// The conversion target for a numeric kind; `None` for `decimal`.
    pub const fn of(kind: NumericKind) -> Option<Self> {
        Some(match kind {
            NumericKind::SByte => ConvTarget::I1,
            NumericKind::Byte => ConvTarget::U1,
            NumericKind::Short => ConvTarget::I2,
            NumericKind::UShort | NumericKind::Char => ConvTarget::U2,
            NumericKind::Int => ConvTarget::I4,
            NumericKind::UInt => ConvTarget::U4,
            NumericKind::Long => ConvTarget::I8,
            NumericKind::ULong => ConvTarget::U8,
            NumericKind::NInt => ConvTarget::I,
            NumericKind::NUInt => ConvTarget::U,
            NumericKind::Float => ConvTarget::R4,
            NumericKind::Double => ConvTarget::R8,
            NumericKind::Decimal => return None,
        })
    }

    pub const fn suffix(self) -> &'static str {
        match self {
            ConvTarget::I1 => "i1",
            ConvTarget::U1 => "u1",
            ConvTarget::I2 => "i2",
            ConvTarget::U2 => "u2",
            ConvTarget::I4 => "i4",
            ConvTarget::U4 => "u4",
            ConvTarget::I8 => "i8",
            ConvTarget::U8 => "u8",
            ConvTarget::I => "i",
            ConvTarget::U => "u",
            ConvTarget::R4 => "r4",
            ConvTarget::R8 => "r8",
        }
    }
}

/// A stack machine instruction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Instruction {
    Conv(ConvTarget),
    /// `conv.ovf.<target>`, with `.un` when `unsigned_source`.
    ConvOvf {
        target: ConvTarget,
        unsigned_source: bool,
    },
    Add,
    AddOvf,
    AddOvfUn,
    Sub,
    SubOvf,
    SubOvfUn,
    Mul,
    MulOvf,
    MulOvfUn,
    Div,
    DivUn,
    Rem,
    RemUn,
    And,
    Or,
    Xor,
    Shl,
    Shr,
    ShrUn,
    Neg,
    Not,
    Ceq,
    Clt,
    CltUn,
    Cgt,
    CgtUn,
}

impl Instruction {
    /// Check if the instruction traps on overflow.
    pub const fn is_overflow_checked(self) -> bool {
        matches!(
            self,
            Instruction::ConvOvf { .. }
                | Instruction::AddOvf
                | Instruction::AddOvfUn
                | Instruction::SubOvf
                | Instruction::SubOvfUn
                | Instruction::MulOvf
                | Instruction::MulOvfUn
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Instruction::Conv(target) => return write!(f, "conv.{}", target.suffix()),
            Instruction::ConvOvf {
                target,
                unsigned_source,
            } => {
                let un = if *unsigned_source { ".un" } else { "" };
                return write!(f, "conv.ovf.{}{un}", target.suffix());
            }
            Instruction::Add => "add",
            Instruction::AddOvf => "add.ovf",
            Instruction::AddOvfUn => "add.ovf.un",
            Instruction::Sub => "sub",
            Instruction::SubOvf => "sub.ovf",
            Instruction::SubOvfUn => "sub.ovf.un",
            Instruction::Mul => "mul",
            Instruction::MulOvf => "mul.ovf",
            Instruction::MulOvfUn => "mul.ovf.un",
            Instruction::Div => "div",
            Instruction::DivUn => "div.un",
            Instruction::Rem => "rem",
            Instruction::RemUn => "rem.un",
            Instruction::And => "and",
            Instruction::Or => "or",
            Instruction::Xor => "xor",
            Instruction::Shl => "shl",
            Instruction::Shr => "shr",
            Instruction::ShrUn => "shr.un",
            Instruction::Neg => "neg",
            Instruction::Not => "not",
            Instruction::Ceq => "ceq",
            Instruction::Clt => "clt",
            Instruction::CltUn => "clt.un",
            Instruction::Cgt => "cgt",
            Instruction::CgtUn => "cgt.un",
        };
        f.write_str(s)
    }
}

/// Instruction for a numeric conversion.
///
/// `implicit` conversions never check for overflow; `checked` only
/// applies to explicit conversions to integral kinds. Conversions
/// involving `decimal` are helper calls and have no instruction.
pub fn conversion_instruction(
    source: NumericKind,
    target: NumericKind,
    checked: bool,
    implicit: bool,
) -> Option<Instruction> {
    use NumericKind as K;

    if source == target || matches!(source, K::Decimal) {
        return None;
    }
    let conv = ConvTarget::of(target)?;

    if checked && !implicit && target.is_integral() {
        return Some(Instruction::ConvOvf {
            target: conv,
            unsigned_source: source.is_unsigned(),
        });
    }

    let source_small_integral = source.is_integral() && source.is_at_most_32_bits();
    match target {
        K::NInt | K::NUInt => {
            let signed = if source_small_integral {
                !source.is_unsigned()
            } else if source.is_native() {
                // Same-width reinterpretation.
                return None;
            } else {
                !target.is_unsigned()
            };
            Some(Instruction::Conv(if signed {
                ConvTarget::I
            } else {
                ConvTarget::U
            }))
        }
        K::Long | K::ULong => {
            if source.is_integral() && source.fixed_bits() == Some(64) {
                return None;
            }
            let signed = if source.is_integral() {
                !source.is_unsigned()
            } else {
                !target.is_unsigned()
            };
            Some(Instruction::Conv(if signed {
                ConvTarget::I8
            } else {
                ConvTarget::U8
            }))
        }
        K::Int | K::UInt => {
            if source_small_integral {
                None
            } else {
                Some(Instruction::Conv(conv))
            }
        }
        K::SByte | K::Byte | K::Short | K::UShort | K::Char => {
            if implicit {
                None
            } else {
                Some(Instruction::Conv(conv))
            }
        }
        K::Float | K::Double => Some(Instruction::Conv(conv)),
        K::Decimal => None,
    }
}
