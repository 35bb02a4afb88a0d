//! Built-in operator resolution.
//!
//! Native integers slot into binary numeric promotion between the 32-bit
//! and 64-bit kinds. Where neither operand converts to the other's kind
//! without losing values on some platform the operator is ambiguous rather
//! than resolving to an arbitrary preference: `nint` with `nuint`, `nuint`
//! with a possibly negative 32-bit operand, `long` with `nuint`.

use std::fmt;

use natint_ir::Span;

use crate::emit::Instruction;
use crate::{
    CheckOptions, Idx, NumericKind, TypeCheckError, TypeContext, TypeData, TypeFlags, Value,
};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    Plus,
    Minus,
    BitNot,
    /// Logical `!`.
    Not,
    Increment,
    Decrement,
}

impl UnaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
            UnaryOp::BitNot => "~",
            UnaryOp::Not => "!",
            UnaryOp::Increment => "++",
            UnaryOp::Decrement => "--",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Shl,
    Shr,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
    And,
    Or,
    Xor,
}

impl BinaryOp {
    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge | BinaryOp::Eq | BinaryOp::Ne
        )
    }

    pub const fn is_shift(self) -> bool {
        matches!(self, BinaryOp::Shl | BinaryOp::Shr)
    }

    pub const fn is_bitwise(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or | BinaryOp::Xor)
    }
}

/// A resolved operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Operator {
    Unary(UnaryOp),
    Binary(BinaryOp),
}

impl Operator {
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Unary(op) => op.symbol(),
            Operator::Binary(op) => op.symbol(),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Width the operation is performed at.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum OperandWidth {
    Fixed(u32),
    /// The platform pointer width.
    Native,
}

impl OperandWidth {
    fn of(kind: NumericKind) -> Self {
        kind.fixed_bits()
            .map_or(OperandWidth::Native, OperandWidth::Fixed)
    }
}

/// An operand: its type and, for constants, its value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Operand {
    pub ty: Idx,
    pub constant: Option<Value>,
}

impl Operand {
    pub const fn new(ty: Idx) -> Self {
        Operand { ty, constant: None }
    }

    pub const fn constant(ty: Idx, value: Value) -> Self {
        Operand {
            ty,
            constant: Some(value),
        }
    }

    fn is_non_negative_constant(&self) -> bool {
        self.constant.is_some_and(Value::is_non_negative_int)
    }
}

/// What a code generator needs to perform a built-in operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct OperatorDecision {
    pub op: Operator,
    /// Integral arithmetic in a checked context.
    pub checked: bool,
    pub signed: bool,
    pub width: OperandWidth,
    /// Kind both operands are converted to; the offset kind for pointer
    /// arithmetic; `None` for `bool` operators and pointer differences.
    pub operand_kind: Option<NumericKind>,
    /// Type both operands are converted to (the offset type for pointers).
    pub operand_type: Idx,
    pub result: Idx,
    /// A nullable operand lifted the operator.
    pub lifted: bool,
    /// Pointee type for pointer arithmetic and comparison.
    pub pointer_element: Option<Idx>,
    pub instruction: Option<Instruction>,
}

/// Result of `sizeof(T)`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SizeOf {
    /// Size in bytes, a compile-time constant.
    Constant(u32),
    /// Depends on the platform; computed at runtime.
    Platform,
}

impl SizeOf {
    /// The size where the language requires a constant.
    pub fn require_constant(self, span: Span) -> Result<u32, TypeCheckError> {
        match self {
            SizeOf::Constant(size) => Ok(size),
            SizeOf::Platform => Err(TypeCheckError::not_constant(span)),
        }
    }
}

/// Why binary numeric promotion failed.
enum PromotionError {
    NoOperator,
    Ambiguous,
}

/// Unary numeric promotion: integers narrower than `int` become `int`.
fn promote_unary(kind: NumericKind) -> NumericKind {
    use NumericKind as K;
    match kind {
        K::Char | K::SByte | K::Byte | K::Short | K::UShort => K::Int,
        other => other,
    }
}

/// Binary numeric promotion with native integers.
fn promote_binary(
    lhs: (NumericKind, bool),
    rhs: (NumericKind, bool),
) -> Result<NumericKind, PromotionError> {
    use NumericKind as K;

    let (a, a_nonneg) = lhs;
    let (b, b_nonneg) = rhs;
    let either = |k: K| a == k || b == k;
    // The other operand when one of them is `k`.
    let other = |k: K| if a == k { (b, b_nonneg) } else { (a, a_nonneg) };

    if either(K::Decimal) {
        let (o, _) = other(K::Decimal);
        return if o.is_floating() {
            Err(PromotionError::NoOperator)
        } else {
            Ok(K::Decimal)
        };
    }
    if either(K::Double) {
        return Ok(K::Double);
    }
    if either(K::Float) {
        return Ok(K::Float);
    }

    // Narrow unsigned operands stay non-negative after promotion to `int`.
    let (a_nonneg, b_nonneg) = (a_nonneg || a.is_unsigned(), b_nonneg || b.is_unsigned());
    let (a, b) = (promote_unary(a), promote_unary(b));
    let either = |k: K| a == k || b == k;
    let other = |k: K| if a == k { (b, b_nonneg) } else { (a, a_nonneg) };

    if either(K::ULong) {
        let (o, nonneg) = other(K::ULong);
        return if o.is_signed_integral() && !nonneg {
            Err(PromotionError::Ambiguous)
        } else {
            Ok(K::ULong)
        };
    }
    if either(K::NInt) && either(K::NUInt) {
        return Err(PromotionError::Ambiguous);
    }
    if either(K::NUInt) {
        let (o, nonneg) = other(K::NUInt);
        return match o {
            K::Long => Err(PromotionError::Ambiguous),
            K::Int if !nonneg => Err(PromotionError::Ambiguous),
            _ => Ok(K::NUInt),
        };
    }
    if either(K::NInt) {
        let (o, _) = other(K::NInt);
        return Ok(if matches!(o, K::UInt | K::Long) {
            K::Long
        } else {
            K::NInt
        });
    }
    if either(K::Long) {
        return Ok(K::Long);
    }
    if either(K::UInt) {
        let (o, nonneg) = other(K::UInt);
        return Ok(if o == K::Int && !nonneg {
            K::Long
        } else {
            K::UInt
        });
    }
    Ok(K::Int)
}

fn arithmetic_instruction(op: BinaryOp, kind: NumericKind, checked: bool) -> Option<Instruction> {
    use Instruction as I;

    if kind == NumericKind::Decimal {
        return None;
    }
    let integral = kind.is_integral();
    let unsigned = kind.is_unsigned();
    let ovf = checked && integral;
    Some(match op {
        BinaryOp::Add if ovf => {
            if unsigned {
                I::AddOvfUn
            } else {
                I::AddOvf
            }
        }
        BinaryOp::Sub if ovf => {
            if unsigned {
                I::SubOvfUn
            } else {
                I::SubOvf
            }
        }
        BinaryOp::Mul if ovf => {
            if unsigned {
                I::MulOvfUn
            } else {
                I::MulOvf
            }
        }
        BinaryOp::Add => I::Add,
        BinaryOp::Sub => I::Sub,
        BinaryOp::Mul => I::Mul,
        BinaryOp::Div if unsigned => I::DivUn,
        BinaryOp::Div => I::Div,
        BinaryOp::Rem if unsigned => I::RemUn,
        BinaryOp::Rem => I::Rem,
        BinaryOp::And => I::And,
        BinaryOp::Or => I::Or,
        BinaryOp::Xor => I::Xor,
        BinaryOp::Shl => I::Shl,
        BinaryOp::Shr if unsigned => I::ShrUn,
        BinaryOp::Shr => I::Shr,
        BinaryOp::Eq | BinaryOp::Ne => I::Ceq,
        BinaryOp::Lt if unsigned => I::CltUn,
        BinaryOp::Lt => I::Clt,
        BinaryOp::Gt if unsigned => I::CgtUn,
        BinaryOp::Gt => I::Cgt,
        // `a <= b` is `!(a > b)`; unordered for floats.
        BinaryOp::Le if unsigned || !integral => I::CgtUn,
        BinaryOp::Le => I::Cgt,
        BinaryOp::Ge if unsigned || !integral => I::CltUn,
        BinaryOp::Ge => I::Clt,
    })
}

impl TypeContext {
    /// The type of a promoted operand kind.
    ///
    /// Native kinds prefer the view of an operand's own pointer-sized type,
    /// so the result stays in the operands' overlay.
    fn kind_type(&self, kind: NumericKind, operands: &[Idx]) -> Idx {
        if let Some(idx) = kind.primitive() {
            return idx;
        }
        operands
            .iter()
            .map(|&ty| self.unwrap_nullable(ty))
            .find(|&ty| self.numeric_kind(ty) == Some(kind))
            .and_then(|ty| self.get_or_create_native_view(ty).ok())
            .unwrap_or_else(|| self.native_integer(kind == NumericKind::NInt))
    }

    fn lift(&self, ty: Idx, lifted: bool) -> Idx {
        if lifted {
            self.nullable(ty)
        } else {
            ty
        }
    }

    /// Resolve a built-in unary operator.
    #[tracing::instrument(level = "trace", skip(self, options))]
    pub fn resolve_unary(
        &self,
        op: UnaryOp,
        operand: Operand,
        options: CheckOptions,
        span: Span,
    ) -> Result<OperatorDecision, TypeCheckError> {
        let no_operator = || TypeCheckError::no_operator(span, op.symbol(), &[operand.ty]);
        let lifted = self.flags(operand.ty).contains(TypeFlags::IS_NULLABLE);
        let inner = self.unwrap_nullable(operand.ty);

        if op == UnaryOp::Not {
            if inner != Idx::BOOL {
                return Err(no_operator());
            }
            return Ok(OperatorDecision {
                op: Operator::Unary(op),
                checked: false,
                signed: false,
                width: OperandWidth::Fixed(8),
                operand_kind: None,
                operand_type: Idx::BOOL,
                result: self.lift(Idx::BOOL, lifted),
                lifted,
                pointer_element: None,
                instruction: Some(Instruction::Ceq),
            });
        }

        let kind = self.numeric_kind(inner).ok_or_else(no_operator)?;
        let promoted = match op {
            UnaryOp::Increment | UnaryOp::Decrement => kind,
            UnaryOp::Minus => match promote_unary(kind) {
                NumericKind::ULong | NumericKind::NUInt => return Err(no_operator()),
                NumericKind::UInt => NumericKind::Long,
                other => other,
            },
            UnaryOp::BitNot => {
                if !kind.is_integral() {
                    return Err(no_operator());
                }
                promote_unary(kind)
            }
            UnaryOp::Plus | UnaryOp::Not => promote_unary(kind),
        };

        let checked = options.overflow.is_checked() && promoted.is_integral();
        let instruction = match op {
            UnaryOp::Plus | UnaryOp::Not => None,
            UnaryOp::Minus if promoted == NumericKind::Decimal => None,
            UnaryOp::Minus if checked => Some(Instruction::SubOvf),
            UnaryOp::Minus => Some(Instruction::Neg),
            UnaryOp::BitNot => Some(Instruction::Not),
            UnaryOp::Increment => arithmetic_instruction(BinaryOp::Add, promoted, checked),
            UnaryOp::Decrement => arithmetic_instruction(BinaryOp::Sub, promoted, checked),
        };
        let operand_type = match op {
            UnaryOp::Increment | UnaryOp::Decrement => inner,
            _ => self.kind_type(promoted, &[inner]),
        };

        Ok(OperatorDecision {
            op: Operator::Unary(op),
            checked,
            signed: !promoted.is_unsigned(),
            width: OperandWidth::of(promoted),
            operand_kind: Some(promoted),
            operand_type,
            result: self.lift(operand_type, lifted),
            lifted,
            pointer_element: None,
            instruction,
        })
    }

    /// Resolve a built-in binary operator.
    #[tracing::instrument(level = "trace", skip(self, options))]
    pub fn resolve_binary(
        &self,
        op: BinaryOp,
        lhs: Operand,
        rhs: Operand,
        options: CheckOptions,
        span: Span,
    ) -> Result<OperatorDecision, TypeCheckError> {
        let operands = [lhs.ty, rhs.ty];
        let no_operator = || TypeCheckError::no_operator(span, op.symbol(), &operands);

        if self.flags(lhs.ty).contains(TypeFlags::IS_POINTER)
            || self.flags(rhs.ty).contains(TypeFlags::IS_POINTER)
        {
            return self.resolve_pointer_binary(op, lhs.ty, rhs.ty, options, span);
        }

        let lifted = self.flags(lhs.ty).contains(TypeFlags::IS_NULLABLE)
            || self.flags(rhs.ty).contains(TypeFlags::IS_NULLABLE);
        let (left, right) = (self.unwrap_nullable(lhs.ty), self.unwrap_nullable(rhs.ty));

        if left == Idx::BOOL && right == Idx::BOOL {
            let instruction = match op {
                BinaryOp::Eq | BinaryOp::Ne => Instruction::Ceq,
                BinaryOp::And => Instruction::And,
                BinaryOp::Or => Instruction::Or,
                BinaryOp::Xor => Instruction::Xor,
                _ => return Err(no_operator()),
            };
            let result = if op.is_comparison() {
                Idx::BOOL
            } else {
                self.lift(Idx::BOOL, lifted)
            };
            return Ok(OperatorDecision {
                op: Operator::Binary(op),
                checked: false,
                signed: false,
                width: OperandWidth::Fixed(8),
                operand_kind: None,
                operand_type: Idx::BOOL,
                result,
                lifted,
                pointer_element: None,
                instruction: Some(instruction),
            });
        }

        let a = self.numeric_kind(left).ok_or_else(no_operator)?;
        let b = self.numeric_kind(right).ok_or_else(no_operator)?;

        let promoted = if op.is_shift() {
            if !a.is_integral() || !b.converts_implicitly_to(NumericKind::Int) {
                return Err(no_operator());
            }
            promote_unary(a)
        } else {
            match promote_binary(
                (a, lhs.is_non_negative_constant()),
                (b, rhs.is_non_negative_constant()),
            ) {
                Ok(kind) => kind,
                Err(PromotionError::NoOperator) => return Err(no_operator()),
                Err(PromotionError::Ambiguous) => {
                    return Err(TypeCheckError::ambiguous_operator(span, op.symbol(), &operands));
                }
            }
        };
        if op.is_bitwise() && !promoted.is_integral() {
            return Err(no_operator());
        }

        let checked = options.overflow.is_checked() && promoted.is_integral();
        let operand_type = if op.is_shift() {
            self.kind_type(promoted, &[left])
        } else {
            self.kind_type(promoted, &[left, right])
        };
        let result = if op.is_comparison() {
            Idx::BOOL
        } else {
            self.lift(operand_type, lifted)
        };

        Ok(OperatorDecision {
            op: Operator::Binary(op),
            checked,
            signed: !promoted.is_unsigned(),
            width: OperandWidth::of(promoted),
            operand_kind: Some(promoted),
            operand_type,
            result,
            lifted,
            pointer_element: None,
            instruction: arithmetic_instruction(op, promoted, checked),
        })
    }

    fn resolve_pointer_binary(
        &self,
        op: BinaryOp,
        lhs: Idx,
        rhs: Idx,
        options: CheckOptions,
        span: Span,
    ) -> Result<OperatorDecision, TypeCheckError> {
        let no_operator = || TypeCheckError::no_operator(span, op.symbol(), &[lhs, rhs]);
        let pointee = |ty: Idx| match self.data(ty) {
            TypeData::Pointer(pointee) => Some(pointee),
            _ => None,
        };

        let decision = match (pointee(lhs), pointee(rhs)) {
            (Some(p), Some(_)) if op.is_comparison() => {
                let instruction = match op {
                    BinaryOp::Lt | BinaryOp::Ge => Instruction::CltUn,
                    BinaryOp::Gt | BinaryOp::Le => Instruction::CgtUn,
                    _ => Instruction::Ceq,
                };
                self.pointer_decision(op, lhs, p, Idx::BOOL, None, instruction)
            }
            (Some(p), Some(q)) if op == BinaryOp::Sub => {
                if p == Idx::VOID || !self.are_equivalent(p, q) {
                    return Err(no_operator());
                }
                self.pointer_decision(op, lhs, p, Idx::LONG, None, Instruction::Sub)
            }
            (Some(p), None) if matches!(op, BinaryOp::Add | BinaryOp::Sub) => {
                let offset = self.pointer_offset(rhs).ok_or_else(no_operator)?;
                if p == Idx::VOID {
                    return Err(no_operator());
                }
                let instruction = if op == BinaryOp::Add {
                    Instruction::Add
                } else {
                    Instruction::Sub
                };
                self.pointer_decision(op, rhs, p, lhs, Some(offset), instruction)
            }
            (None, Some(p)) if op == BinaryOp::Add => {
                let offset = self.pointer_offset(lhs).ok_or_else(no_operator)?;
                if p == Idx::VOID {
                    return Err(no_operator());
                }
                self.pointer_decision(op, lhs, p, rhs, Some(offset), Instruction::Add)
            }
            _ => return Err(no_operator()),
        };

        if !options.allow_unsafe {
            return Err(TypeCheckError::requires_unsafe(span));
        }
        Ok(decision)
    }

    /// Offset kind for pointer arithmetic: an integral kind, promoted.
    fn pointer_offset(&self, ty: Idx) -> Option<NumericKind> {
        self.numeric_kind(ty)
            .filter(|k| k.is_integral())
            .map(promote_unary)
    }

    fn pointer_decision(
        &self,
        op: BinaryOp,
        operand_type: Idx,
        element: Idx,
        result: Idx,
        offset: Option<NumericKind>,
        instruction: Instruction,
    ) -> OperatorDecision {
        OperatorDecision {
            op: Operator::Binary(op),
            checked: false,
            signed: offset.is_some_and(|k| !k.is_unsigned()),
            width: offset.map_or(OperandWidth::Native, OperandWidth::of),
            operand_kind: offset,
            operand_type,
            result,
            lifted: false,
            pointer_element: Some(element),
            instruction: Some(instruction),
        }
    }

    /// `sizeof(ty)`.
    ///
    /// Fixed-width primitives have a constant size. Pointer-sized types,
    /// pointers and structs have a platform-dependent size and need an
    /// unsafe context.
    pub fn size_of(
        &self,
        ty: Idx,
        options: CheckOptions,
        span: Span,
    ) -> Result<SizeOf, TypeCheckError> {
        let size = match ty {
            Idx::BOOL | Idx::SBYTE | Idx::BYTE => Some(1),
            Idx::CHAR | Idx::SHORT | Idx::USHORT => Some(2),
            Idx::INT | Idx::UINT | Idx::FLOAT => Some(4),
            Idx::LONG | Idx::ULONG | Idx::DOUBLE => Some(8),
            Idx::DECIMAL => Some(16),
            _ => None,
        };
        if let Some(size) = size {
            return Ok(SizeOf::Constant(size));
        }

        let flags = self.flags(ty);
        let platform = self.is_pointer_sized(ty)
            || flags.contains(TypeFlags::IS_POINTER)
            || (flags.contains(TypeFlags::IS_VALUE_TYPE) && !ty.is_primitive());
        if !platform {
            return Err(TypeCheckError::no_operator(span, "sizeof", &[ty]));
        }
        if !options.allow_unsafe {
            return Err(TypeCheckError::requires_unsafe(span));
        }
        Ok(SizeOf::Platform)
    }
}

#[cfg(test)]
mod tests;
