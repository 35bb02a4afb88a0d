//! Structured type checking errors.
//!
//! Every expected failure of a type-relation query is a [`TypeCheckError`]
//! value: a span, a kind and optional suggestions. Rendering into a
//! [`Diagnostic`] happens on demand with a [`TypeContext`] for type names.

use natint_diagnostic::{Diagnostic, DiagnosticQueue, ErrorCode};
use natint_ir::{Name, Span};
use smallvec::SmallVec;

use crate::{Idx, LanguageVersion, NumericKind, SpecialType, TypeContext};

/// A type checking error.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TypeCheckError {
    /// Location in source code where the error occurred.
    pub span: Span,
    /// What kind of error this is.
    pub kind: TypeErrorKind,
    /// Text suggestions for fixing the error.
    pub suggestions: Vec<String>,
    /// A second location the error refers to (an earlier declaration).
    pub related: Option<Span>,
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum TypeErrorKind {
    /// `System.IntPtr`/`System.UIntPtr` is missing from referenced metadata.
    UnresolvedUnderlyingType { special: SpecialType },
    /// No conversion of the requested kind.
    NoApplicableConversion {
        source: Idx,
        target: Idx,
        /// An implicit conversion was requested.
        implicit: bool,
        /// An explicit conversion exists where an implicit one was requested.
        explicit_exists: bool,
    },
    /// No built-in operator accepts the operands.
    NoApplicableOperator {
        op: &'static str,
        operands: SmallVec<[Idx; 2]>,
    },
    /// More than one built-in operator is equally good.
    AmbiguousOperator {
        op: &'static str,
        operands: SmallVec<[Idx; 2]>,
    },
    /// More than one overload is equally good.
    AmbiguousCall { candidates: SmallVec<[usize; 2]> },
    /// No overload accepts the arguments.
    NoApplicableOverload { args: usize },
    /// A type spelling names no known type.
    UnknownType { spelling: String },
    /// The type has no member with that name.
    NoSuchMember { ty: Idx, name: Name },
    /// Constant folding overflowed in a checked context.
    CompileTimeOverflow { kind: NumericKind },
    /// Division or remainder by a constant zero.
    DivideByZero,
    /// A constant was required but the value depends on the platform.
    NotConstant,
    /// Pointer operations and `sizeof` of native integers need `unsafe`.
    RequiresUnsafeContext,
    /// A language feature used by the program is newer than the selected version.
    FeatureNotAvailable {
        feature: &'static str,
        required: LanguageVersion,
    },
    /// Two members of one type with equivalent signatures.
    DuplicateMember { ty: Idx, name: Name },
    /// A member hides an inherited member without `new`.
    HidesInheritedMember { ty: Idx, name: Name, base: Idx },
    /// `override` with no overridable base member of that signature.
    NoMemberToOverride { ty: Idx, name: Name },
}

impl TypeCheckError {
    fn new(span: Span, kind: TypeErrorKind) -> Self {
        TypeCheckError {
            span,
            kind,
            suggestions: Vec::new(),
            related: None,
        }
    }

    pub fn unresolved_underlying(span: Span, special: SpecialType) -> Self {
        Self::new(span, TypeErrorKind::UnresolvedUnderlyingType { special })
    }

    /// No implicit conversion; `explicit_exists` when a cast would work.
    pub fn no_implicit_conversion(
        span: Span,
        source: Idx,
        target: Idx,
        explicit_exists: bool,
    ) -> Self {
        let err = Self::new(
            span,
            TypeErrorKind::NoApplicableConversion {
                source,
                target,
                implicit: true,
                explicit_exists,
            },
        );
        if explicit_exists {
            err.with_suggestion("an explicit conversion exists; add a cast")
        } else {
            err
        }
    }

    /// No conversion at all, not even an explicit one.
    pub fn no_conversion(span: Span, source: Idx, target: Idx) -> Self {
        Self::new(
            span,
            TypeErrorKind::NoApplicableConversion {
                source,
                target,
                implicit: false,
                explicit_exists: false,
            },
        )
    }

    pub fn no_operator(span: Span, op: &'static str, operands: &[Idx]) -> Self {
        Self::new(
            span,
            TypeErrorKind::NoApplicableOperator {
                op,
                operands: SmallVec::from_slice(operands),
            },
        )
    }

    pub fn ambiguous_operator(span: Span, op: &'static str, operands: &[Idx]) -> Self {
        Self::new(
            span,
            TypeErrorKind::AmbiguousOperator {
                op,
                operands: SmallVec::from_slice(operands),
            },
        )
        .with_suggestion("cast one operand to make the operator unambiguous")
    }

    pub fn ambiguous_call(span: Span, candidates: &[usize]) -> Self {
        Self::new(
            span,
            TypeErrorKind::AmbiguousCall {
                candidates: SmallVec::from_slice(candidates),
            },
        )
    }

    pub fn no_overload(span: Span, args: usize) -> Self {
        Self::new(span, TypeErrorKind::NoApplicableOverload { args })
    }

    pub fn unknown_type(span: Span, spelling: impl Into<String>) -> Self {
        Self::new(
            span,
            TypeErrorKind::UnknownType {
                spelling: spelling.into(),
            },
        )
    }

    pub fn no_such_member(span: Span, ty: Idx, name: Name) -> Self {
        Self::new(span, TypeErrorKind::NoSuchMember { ty, name })
    }

    pub fn overflow(span: Span, kind: NumericKind) -> Self {
        Self::new(span, TypeErrorKind::CompileTimeOverflow { kind })
            .with_suggestion("use `unchecked` to allow the value to wrap")
    }

    pub fn divide_by_zero(span: Span) -> Self {
        Self::new(span, TypeErrorKind::DivideByZero)
    }

    pub fn not_constant(span: Span) -> Self {
        Self::new(span, TypeErrorKind::NotConstant)
    }

    pub fn requires_unsafe(span: Span) -> Self {
        Self::new(span, TypeErrorKind::RequiresUnsafeContext)
    }

    pub fn feature_not_available(
        span: Span,
        feature: &'static str,
        required: LanguageVersion,
    ) -> Self {
        Self::new(span, TypeErrorKind::FeatureNotAvailable { feature, required })
            .with_suggestion(format!("use language version {required} or greater"))
    }

    pub fn duplicate_member(span: Span, ty: Idx, name: Name) -> Self {
        Self::new(span, TypeErrorKind::DuplicateMember { ty, name })
    }

    pub fn hides_inherited(span: Span, ty: Idx, name: Name, base: Idx) -> Self {
        Self::new(span, TypeErrorKind::HidesInheritedMember { ty, name, base })
            .with_suggestion("use the `new` modifier if hiding was intended")
    }

    pub fn no_member_to_override(span: Span, ty: Idx, name: Name) -> Self {
        Self::new(span, TypeErrorKind::NoMemberToOverride { ty, name })
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    #[must_use]
    pub fn with_related(mut self, span: Span) -> Self {
        self.related = Some(span);
        self
    }

    /// Error code for this error.
    pub fn code(&self) -> ErrorCode {
        match &self.kind {
            TypeErrorKind::UnresolvedUnderlyingType { .. } => ErrorCode::E0001,
            TypeErrorKind::FeatureNotAvailable { .. } => ErrorCode::E0002,
            TypeErrorKind::NoSuchMember { .. } => ErrorCode::E0003,
            TypeErrorKind::UnknownType { .. } => ErrorCode::E0004,

            TypeErrorKind::NoApplicableConversion {
                explicit_exists: true,
                ..
            } => ErrorCode::E1002,
            TypeErrorKind::NoApplicableConversion { implicit: true, .. } => ErrorCode::E1001,
            TypeErrorKind::NoApplicableConversion { .. } => ErrorCode::E1003,

            TypeErrorKind::NoApplicableOperator { operands, .. } if operands.len() == 1 => {
                ErrorCode::E2001
            }
            TypeErrorKind::NoApplicableOperator { .. } => ErrorCode::E2002,
            TypeErrorKind::AmbiguousOperator { .. } => ErrorCode::E2003,
            TypeErrorKind::AmbiguousCall { .. } => ErrorCode::E2004,
            TypeErrorKind::NoApplicableOverload { .. } => ErrorCode::E2005,
            TypeErrorKind::RequiresUnsafeContext => ErrorCode::E2006,

            TypeErrorKind::CompileTimeOverflow { .. } => ErrorCode::E3001,
            TypeErrorKind::DivideByZero => ErrorCode::E3002,
            TypeErrorKind::NotConstant => ErrorCode::E3003,

            TypeErrorKind::DuplicateMember { .. } => ErrorCode::E4001,
            TypeErrorKind::NoMemberToOverride { .. } => ErrorCode::E4002,
            TypeErrorKind::HidesInheritedMember { .. } => ErrorCode::W4001,
        }
    }

    /// Check if this is a warning rather than an error.
    pub fn is_warning(&self) -> bool {
        self.code().is_warning()
    }

    /// Render the main message, naming types through `ctx`.
    pub fn message(&self, ctx: &TypeContext) -> String {
        match &self.kind {
            TypeErrorKind::UnresolvedUnderlyingType { special } => format!(
                "predefined type `{}.{}` is not defined or imported",
                SpecialType::NAMESPACE,
                special.metadata_name()
            ),
            TypeErrorKind::NoApplicableConversion {
                source,
                target,
                explicit_exists: true,
                ..
            } => format!(
                "cannot implicitly convert type `{}` to `{}`; an explicit conversion exists",
                ctx.display(*source),
                ctx.display(*target)
            ),
            TypeErrorKind::NoApplicableConversion {
                source,
                target,
                implicit: true,
                ..
            } => format!(
                "cannot implicitly convert type `{}` to `{}`",
                ctx.display(*source),
                ctx.display(*target)
            ),
            TypeErrorKind::NoApplicableConversion { source, target, .. } => format!(
                "cannot convert type `{}` to `{}`",
                ctx.display(*source),
                ctx.display(*target)
            ),
            TypeErrorKind::NoApplicableOperator { op, operands } => {
                if let [operand] = operands.as_slice() {
                    format!(
                        "operator `{op}` cannot be applied to operand of type `{}`",
                        ctx.display(*operand)
                    )
                } else {
                    format!(
                        "operator `{op}` cannot be applied to operands of type {}",
                        display_list(ctx, operands)
                    )
                }
            }
            TypeErrorKind::AmbiguousOperator { op, operands } => format!(
                "operator `{op}` is ambiguous on operands of type {}",
                display_list(ctx, operands)
            ),
            TypeErrorKind::AmbiguousCall { candidates } => format!(
                "the call is ambiguous between {} equally good overloads",
                candidates.len()
            ),
            TypeErrorKind::NoApplicableOverload { args } => {
                format!("no overload takes {args} argument(s) of these types")
            }
            TypeErrorKind::UnknownType { spelling } => {
                format!("the type name `{spelling}` could not be found")
            }
            TypeErrorKind::NoSuchMember { ty, name } => format!(
                "`{}` does not contain a definition for `{}`",
                ctx.display(*ty),
                ctx.lookup(*name)
            ),
            TypeErrorKind::CompileTimeOverflow { kind } => {
                format!("the operation overflows at compile time in checked mode (`{kind}`)")
            }
            TypeErrorKind::DivideByZero => "division by constant zero".to_string(),
            TypeErrorKind::NotConstant => {
                "the expression being assigned must be constant".to_string()
            }
            TypeErrorKind::RequiresUnsafeContext => {
                "pointers and fixed size buffers may only be used in an unsafe context".to_string()
            }
            TypeErrorKind::FeatureNotAvailable { feature, required } => format!(
                "feature `{feature}` is not available; use language version {required} or greater"
            ),
            TypeErrorKind::DuplicateMember { ty, name } => format!(
                "type `{}` already defines a member called `{}` with the same parameter types",
                ctx.display(*ty),
                ctx.lookup(*name)
            ),
            TypeErrorKind::HidesInheritedMember { ty, name, base } => format!(
                "`{}.{}` hides inherited member `{}.{}`",
                ctx.display(*ty),
                ctx.lookup(*name),
                ctx.display(*base),
                ctx.lookup(*name)
            ),
            TypeErrorKind::NoMemberToOverride { ty, name } => format!(
                "`{}.{}`: no suitable method found to override",
                ctx.display(*ty),
                ctx.lookup(*name)
            ),
        }
    }

    /// Convert into a diagnostic.
    pub fn to_diagnostic(&self, ctx: &TypeContext) -> Diagnostic {
        let mut diag = Diagnostic::new(self.code(), self.span, self.message(ctx));
        if let Some(related) = self.related {
            diag = diag.with_related(related, self.related_message());
        }
        if self.crosses_native_signedness(ctx) {
            diag = diag.with_note("signed and unsigned native integers do not convert to each other");
        }
        for suggestion in &self.suggestions {
            diag = diag.with_suggestion(suggestion.clone());
        }
        diag
    }

    fn related_message(&self) -> &'static str {
        match self.kind {
            TypeErrorKind::DuplicateMember { .. } => "first declared here",
            TypeErrorKind::HidesInheritedMember { .. } => "hidden member declared here",
            _ => "related location",
        }
    }

    /// A conversion between pointer-sized types of opposite sign.
    fn crosses_native_signedness(&self, ctx: &TypeContext) -> bool {
        let TypeErrorKind::NoApplicableConversion { source, target, .. } = self.kind else {
            return false;
        };
        let source = ctx.is_signed_native(ctx.unwrap_nullable(source));
        let target = ctx.is_signed_native(ctx.unwrap_nullable(target));
        matches!((source, target), (Some(s), Some(t)) if s != t)
    }

    /// Render and queue this error.
    pub fn report(&self, ctx: &TypeContext, queue: &mut DiagnosticQueue) -> bool {
        queue.add(self.to_diagnostic(ctx))
    }
}

fn display_list(ctx: &TypeContext, types: &[Idx]) -> String {
    types
        .iter()
        .map(|&ty| format!("`{}`", ctx.display(ty)))
        .collect::<Vec<_>>()
        .join(" and ")
}
