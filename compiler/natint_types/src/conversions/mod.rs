//! Conversion classification.
//!
//! A conversion between a native view and its underlying type is the
//! identity, in every position, because the two are equivalent. Between
//! the signed and unsigned pointer-sized types (either spelling) there is
//! no conversion at all. Everything else follows the numeric table in
//! [`NumericKind::converts_implicitly_to`] plus nullable lifting, boxing
//! and the unsafe pointer conversions.

use natint_ir::Span;

use crate::emit::{conversion_instruction, Instruction};
use crate::{CheckOptions, Idx, NumericKind, TypeCheckError, TypeContext, TypeData, TypeFlags};

/// How a conversion is performed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConversionKind {
    Identity,
    ImplicitNumeric,
    ExplicitNumeric,
    /// `S -> T?` or `S? -> T?` where `S -> T` is implicit.
    ImplicitNullable,
    /// `S? -> T`, or a lifted explicit conversion.
    ExplicitNullable,
    Boxing,
    Unboxing,
    /// `T* -> void*`.
    ImplicitPointer,
    /// Pointer to pointer or integral, or integral to pointer.
    ExplicitPointer,
}

impl ConversionKind {
    pub const fn is_implicit(self) -> bool {
        matches!(
            self,
            ConversionKind::Identity
                | ConversionKind::ImplicitNumeric
                | ConversionKind::ImplicitNullable
                | ConversionKind::Boxing
                | ConversionKind::ImplicitPointer
        )
    }

    /// Pointer conversions are only allowed in an unsafe context.
    pub const fn requires_unsafe(self) -> bool {
        matches!(
            self,
            ConversionKind::ImplicitPointer | ConversionKind::ExplicitPointer
        )
    }
}

/// What a code generator needs to perform a conversion.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConversionDecision {
    pub kind: ConversionKind,
    /// Explicit conversion in a checked context that can lose information.
    pub checked: bool,
    /// Numeric kind of the (unwrapped) source, for numeric conversions.
    pub source: Option<NumericKind>,
    /// Numeric kind of the (unwrapped) target, for numeric conversions.
    pub target: Option<NumericKind>,
    /// The source is nullable and is unwrapped first.
    pub unwrap_source: bool,
    /// The result is wrapped into a nullable.
    pub wrap_target: bool,
    pub instruction: Option<Instruction>,
}

pub type ConversionResult = Result<ConversionDecision, TypeCheckError>;

/// Where a conversion is requested.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ConversionContext {
    /// A cast; explicit conversions are permitted.
    pub explicit: bool,
    pub options: CheckOptions,
    pub span: Span,
}

impl ConversionContext {
    /// Assignment, argument passing and other implicit positions.
    pub fn implicit(options: CheckOptions) -> Self {
        ConversionContext {
            explicit: false,
            options,
            span: Span::DUMMY,
        }
    }

    /// A cast expression.
    pub fn explicit(options: CheckOptions) -> Self {
        ConversionContext {
            explicit: true,
            ..Self::implicit(options)
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl TypeContext {
    /// The numeric kind of a type.
    ///
    /// Native views and the pointer-sized types they view are `nint`
    /// and `nuint`; when the underlying type is missing there is no kind.
    pub fn numeric_kind(&self, ty: Idx) -> Option<NumericKind> {
        match self.data(ty) {
            TypeData::Primitive(_) => NumericKind::from_primitive(ty),
            TypeData::NativeInt { .. } | TypeData::Named(_) => {
                if self.is_error(ty) {
                    return None;
                }
                self.is_signed_native(ty).map(|signed| {
                    if signed {
                        NumericKind::NInt
                    } else {
                        NumericKind::NUInt
                    }
                })
            }
            _ => None,
        }
    }

    /// Classify the conversion from `source` to `target`, if any.
    pub fn classify_conversion(&self, source: Idx, target: Idx) -> Option<ConversionKind> {
        if source == Idx::ERROR || target == Idx::ERROR || self.are_equivalent(source, target) {
            return Some(ConversionKind::Identity);
        }

        match (self.data(source), self.data(target)) {
            (TypeData::Nullable(s), TypeData::Nullable(t)) => {
                return self.classify_underlying(s, t).map(|kind| {
                    if kind.is_implicit() {
                        ConversionKind::ImplicitNullable
                    } else {
                        ConversionKind::ExplicitNullable
                    }
                });
            }
            (TypeData::Nullable(s), _) if target != Idx::OBJECT => {
                return self
                    .classify_underlying(s, target)
                    .map(|_| ConversionKind::ExplicitNullable);
            }
            (_, TypeData::Nullable(t)) => {
                return self.classify_underlying(source, t).map(|kind| {
                    if kind.is_implicit() {
                        ConversionKind::ImplicitNullable
                    } else {
                        ConversionKind::ExplicitNullable
                    }
                });
            }
            _ => {}
        }

        let source_flags = self.flags(source);
        let target_flags = self.flags(target);
        if target == Idx::OBJECT
            && source_flags.intersects(TypeFlags::IS_VALUE_TYPE | TypeFlags::IS_NULLABLE)
            && !source_flags.contains(TypeFlags::IS_POINTER)
        {
            return Some(ConversionKind::Boxing);
        }
        if source == Idx::OBJECT
            && target_flags.intersects(TypeFlags::IS_VALUE_TYPE | TypeFlags::IS_NULLABLE)
            && !target_flags.contains(TypeFlags::IS_POINTER)
        {
            return Some(ConversionKind::Unboxing);
        }

        let source_pointer = source_flags.contains(TypeFlags::IS_POINTER);
        let target_pointer = target_flags.contains(TypeFlags::IS_POINTER);
        match (source_pointer, target_pointer) {
            (true, true) => {
                return Some(if target == self.pointer(Idx::VOID) {
                    ConversionKind::ImplicitPointer
                } else {
                    ConversionKind::ExplicitPointer
                });
            }
            (true, false) => {
                return self
                    .numeric_kind(target)
                    .filter(|k| k.is_integral() && *k != NumericKind::Char)
                    .map(|_| ConversionKind::ExplicitPointer);
            }
            (false, true) => {
                return self
                    .numeric_kind(source)
                    .filter(|k| k.is_integral() && *k != NumericKind::Char)
                    .map(|_| ConversionKind::ExplicitPointer);
            }
            (false, false) => {}
        }

        self.classify_numeric(source, target)
    }

    /// Identity or numeric classification of non-nullable operands.
    fn classify_underlying(&self, source: Idx, target: Idx) -> Option<ConversionKind> {
        if self.are_equivalent(source, target) {
            return Some(ConversionKind::Identity);
        }
        self.classify_numeric(source, target)
    }

    fn classify_numeric(&self, source: Idx, target: Idx) -> Option<ConversionKind> {
        let from = self.numeric_kind(source)?;
        let to = self.numeric_kind(target)?;
        if from.converts_implicitly_to(to) {
            Some(ConversionKind::ImplicitNumeric)
        } else if from.converts_explicitly_to(to) {
            Some(ConversionKind::ExplicitNumeric)
        } else {
            None
        }
    }

    /// Resolve a conversion for code generation.
    ///
    /// An implicit request for a conversion that only exists explicitly
    /// reports `explicit_exists`.
    #[tracing::instrument(level = "trace", skip(self, cx), fields(explicit = cx.explicit))]
    pub fn resolve_conversion(
        &self,
        source: Idx,
        target: Idx,
        cx: ConversionContext,
    ) -> ConversionResult {
        let Some(kind) = self.classify_conversion(source, target) else {
            return Err(if cx.explicit {
                TypeCheckError::no_conversion(cx.span, source, target)
            } else {
                TypeCheckError::no_implicit_conversion(cx.span, source, target, false)
            });
        };
        if !kind.is_implicit() && !cx.explicit {
            return Err(TypeCheckError::no_implicit_conversion(
                cx.span, source, target, true,
            ));
        }
        if kind.requires_unsafe() && !cx.options.allow_unsafe {
            return Err(TypeCheckError::requires_unsafe(cx.span));
        }

        let unwrap_source = self.flags(source).contains(TypeFlags::IS_NULLABLE)
            && !matches!(kind, ConversionKind::Identity | ConversionKind::Boxing);
        let wrap_target = self.flags(target).contains(TypeFlags::IS_NULLABLE)
            && !matches!(kind, ConversionKind::Identity | ConversionKind::Unboxing);
        let from = self.numeric_kind(self.unwrap_nullable(source));
        let to = self.numeric_kind(self.unwrap_nullable(target));

        let lossy = matches!(
            kind,
            ConversionKind::ExplicitNumeric | ConversionKind::ExplicitNullable
        ) && match (from, to) {
            (Some(from), Some(to)) => !from.converts_implicitly_to(to),
            _ => false,
        };
        let checked = lossy && cx.options.overflow.is_checked();

        let instruction = match (kind, from, to) {
            (ConversionKind::Identity, ..) => None,
            (ConversionKind::ExplicitPointer, Some(from), None) => {
                // Integral to pointer goes through the native width.
                conversion_instruction(from, native_for(from), checked, false)
            }
            (ConversionKind::ExplicitPointer, None, Some(to)) => {
                conversion_instruction(native_for(to), to, checked, false)
            }
            (_, Some(from), Some(to)) => conversion_instruction(from, to, checked, !lossy),
            _ => None,
        };

        Ok(ConversionDecision {
            kind,
            checked,
            source: from,
            target: to,
            unwrap_source,
            wrap_target,
            instruction,
        })
    }

    /// Check if an implicit conversion exists.
    pub fn converts_implicitly(&self, source: Idx, target: Idx) -> bool {
        self.classify_conversion(source, target)
            .is_some_and(ConversionKind::is_implicit)
    }

    /// `T` for `T?`, otherwise the type itself.
    pub fn unwrap_nullable(&self, ty: Idx) -> Idx {
        match self.data(ty) {
            TypeData::Nullable(inner) => inner,
            _ => ty,
        }
    }
}

/// The native kind a pointer conversion passes through.
fn native_for(kind: NumericKind) -> NumericKind {
    if kind.is_unsigned() {
        NumericKind::NUInt
    } else {
        NumericKind::NInt
    }
}
