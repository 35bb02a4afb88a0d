//! Type equivalence.
//!
//! Two types are *equivalent* when they are identical after replacing every
//! native view by its underlying type, in every position (`nint?` vs
//! `System.IntPtr?`, `IEquatable<nint>` vs `IEquatable<IntPtr>`). Missing
//! types are compared by value, so independent resolution attempts of the
//! same missing reference are equivalent. Index equality stays the identity
//! check: a view and its underlying type are equivalent but never equal.
//!
//! Every relation that compares types (conversions, overloads, declaration
//! checks) goes through [`TypeContext::are_equivalent`].

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::{Idx, TypeContext, TypeData};

impl TypeContext {
    /// Check if two types are equivalent. Symmetric.
    pub fn are_equivalent(&self, a: Idx, b: Idx) -> bool {
        if a == b {
            return true;
        }
        let (a, b) = (self.strip_native(a), self.strip_native(b));
        if a == b {
            return true;
        }
        match (self.data(a), self.data(b)) {
            (TypeData::Nullable(x), TypeData::Nullable(y))
            | (TypeData::Pointer(x), TypeData::Pointer(y)) => self.are_equivalent(x, y),
            (
                TypeData::Applied {
                    generic: g1,
                    args: args1,
                },
                TypeData::Applied {
                    generic: g2,
                    args: args2,
                },
            ) => {
                g1 == g2
                    && args1.len() == args2.len()
                    && args1
                        .iter()
                        .zip(&args2)
                        .all(|(&x, &y)| self.are_equivalent(x, y))
            }
            (TypeData::Missing(m1), TypeData::Missing(m2)) => m1 == m2,
            _ => false,
        }
    }

    /// Hash consistent with [`are_equivalent`](Self::are_equivalent).
    pub fn equivalence_hash(&self, idx: Idx) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash_equivalence_class(idx, &mut hasher);
        hasher.finish()
    }

    fn hash_equivalence_class(&self, idx: Idx, hasher: &mut FxHasher) {
        let data = self.data(self.strip_native(idx));
        (data.tag() as u8).hash(hasher);
        match data {
            TypeData::Primitive(kind) => kind.hash(hasher),
            TypeData::Nullable(inner) | TypeData::Pointer(inner) => {
                self.hash_equivalence_class(inner, hasher);
            }
            TypeData::Named(def) => def.hash(hasher),
            TypeData::Applied { generic, args } => {
                generic.hash(hasher);
                args.len().hash(hasher);
                for arg in args {
                    self.hash_equivalence_class(arg, hasher);
                }
            }
            TypeData::TypeParam(ordinal) => ordinal.hash(hasher),
            TypeData::Missing(missing) => missing.hash(hasher),
            // Stripped above; a view over a view is never created.
            TypeData::NativeInt { underlying } => underlying.hash(hasher),
        }
    }

    /// Check if two parameter type lists are equivalent position by position.
    pub fn signatures_equivalent(&self, a: &[Idx], b: &[Idx]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| self.are_equivalent(x, y))
    }
}
