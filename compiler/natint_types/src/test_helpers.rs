//! Contexts shared by unit tests.

use natint_ir::SharedInterner;

use crate::{declare_core_library, ContextBuilder, CoreTypes, TypeContext};

/// A builder with a core library already declared.
pub(crate) fn core_builder() -> (ContextBuilder, CoreTypes) {
    let mut builder = ContextBuilder::new(SharedInterner::new());
    let core = declare_core_library(&mut builder, "System.Runtime");
    (builder, core)
}

/// A built context with a core library.
pub(crate) fn core_context() -> TypeContext {
    core_builder().0.build()
}

/// A context with no assembly declaring the pointer-sized types.
pub(crate) fn empty_context() -> TypeContext {
    ContextBuilder::new(SharedInterner::new()).build()
}
