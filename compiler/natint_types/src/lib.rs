//! Native-sized integers for a C#-like type checker.
//!
//! `nint` and `nuint` are pointer-sized integers that are *views* over the
//! platform types `System.IntPtr` and `System.UIntPtr`: distinct types with
//! their own spelling that are equivalent to their underlying types for
//! every type relation.
//!
//! # Layout
//!
//! - [`Pool`] interns types behind [`Idx`] handles; a [`TypeContext`]
//!   owns a pool, the declarations and the overlay caches.
//! - The overlay ([`TypeContext::get_or_create_native_view`]) creates one
//!   view per underlying type instance.
//! - Relations go through equivalence: conversions, overloads,
//!   declaration checks.
//! - Operators resolve to decisions ([`OperatorDecision`],
//!   [`ConversionDecision`]) that constant folding and the reference
//!   evaluator execute.
//!
//! # Tracing
//!
//! Call [`init_tracing`] and set `RUST_LOG=natint_types=debug` to see view
//! creation, special-type resolution and retargeting.

mod config;
mod const_fold;
mod context;
mod conversions;
mod corlib;
mod data;
mod declarations;
mod emit;
mod equivalence;
mod eval;
mod flags;
mod idx;
mod members;
mod metadata;
mod numeric;
mod operators;
mod overlay;
mod overload;
mod pool;
mod retarget;
mod spelling;
mod subst;
mod symbols;
mod tag;
mod type_error;
mod value;

pub use config::{CheckOptions, LanguageVersion, OverflowContext};
pub use const_fold::{fold_binary, fold_conversion, fold_unary, FoldResult, Folded};
pub use context::{ContextBuilder, TypeContext};
pub use conversions::{ConversionContext, ConversionDecision, ConversionKind, ConversionResult};
pub use corlib::{declare_core_library, declare_pointer_integer, CoreTypes};
pub use data::{DefId, MissingType, PrimitiveKind, SpecialType, TypeData};
pub use emit::{conversion_instruction, ConvTarget, Instruction};
pub use eval::{eval_binary, eval_conversion, eval_unary, PointerWidth, Raises, RuntimeError};
pub use flags::{MemberFlags, TypeFlags};
pub use idx::Idx;
pub use members::{Member, MemberRef};
pub use metadata::MetadataError;
pub use numeric::NumericKind;
pub use operators::{
    BinaryOp, Operand, OperandWidth, Operator, OperatorDecision, SizeOf, UnaryOp,
};
pub use overlay::OverlayError;
pub use pool::Pool;
pub use retarget::RetargetedField;
pub use spelling::Scope;
pub use subst::TypeFolder;
pub use symbols::{Assembly, AssemblyId, MemberDef, MemberKind, Param, TypeDef, TypeKind};
pub use tag::Tag;
pub use type_error::{TypeCheckError, TypeErrorKind};
pub use value::Value;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Only installs a subscriber when `RUST_LOG`
/// is set, e.g. `RUST_LOG=natint_types=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Idx, TypeFlags};
    natint_ir::static_assert_size!(Idx, 4);
    natint_ir::static_assert_size!(TypeFlags, 4);
}

#[cfg(test)]
mod test_helpers;
