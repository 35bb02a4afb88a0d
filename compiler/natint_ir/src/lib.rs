//! Shared vocabulary for the natint crates.
//!
//! - Spans for source locations
//! - Names for interned identifiers (type names, namespaces, members)
//!
//! Every type here is `Copy + Eq + Hash` so that it can be stored in
//! query results and cache keys without cloning.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-allocated types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod span;

pub use interner::{SharedInterner, StringInterner};
pub use name::Name;
pub use span::Span;

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Name, Span};
    crate::static_assert_size!(Name, 4);
    crate::static_assert_size!(Span, 8);
}
