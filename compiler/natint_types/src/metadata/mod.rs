//! Native integer flags for metadata.
//!
//! Metadata has no `nint`: a signature stores the underlying type and a
//! list of flags, one per pointer-sized occurrence in pre-order, telling
//! which occurrences were spelled as native integers.

use crate::subst::TypeFolder;
use crate::{Idx, TypeContext};

/// A flag list that does not fit the erased type.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum MetadataError {
    #[error("native integer flags do not match the type: expected {expected}, found {found}")]
    FlagCountMismatch { expected: usize, found: usize },
}

/// Replaces views by their underlying types, recording a flag per occurrence.
struct Erase<'ctx> {
    ctx: &'ctx TypeContext,
    flags: Vec<bool>,
}

impl<'ctx> TypeFolder<'ctx> for Erase<'ctx> {
    fn context(&self) -> &'ctx TypeContext {
        self.ctx
    }

    fn fold(&mut self, ty: Idx) -> Idx {
        if self.ctx.is_pointer_sized(ty) {
            self.flags.push(self.ctx.is_native_integer(ty));
            self.ctx.strip_native(ty)
        } else {
            self.super_fold(ty)
        }
    }
}

/// Restores views from a flag list.
struct Restore<'ctx, 'a> {
    ctx: &'ctx TypeContext,
    flags: std::slice::Iter<'a, bool>,
}

impl<'ctx> TypeFolder<'ctx> for Restore<'ctx, '_> {
    fn context(&self) -> &'ctx TypeContext {
        self.ctx
    }

    fn fold(&mut self, ty: Idx) -> Idx {
        if !self.ctx.is_pointer_sized(ty) {
            return self.super_fold(ty);
        }
        let underlying = self.ctx.strip_native(ty);
        match self.flags.next().copied() {
            Some(true) => self
                .ctx
                .get_or_create_native_view(underlying)
                .unwrap_or(underlying),
            _ => underlying,
        }
    }
}

impl TypeContext {
    /// Erase native views, returning the erased type and its flags.
    pub fn encode_native_flags(&self, ty: Idx) -> (Idx, Vec<bool>) {
        let mut erase = Erase {
            ctx: self,
            flags: Vec::new(),
        };
        let erased = erase.fold(ty);
        (erased, erase.flags)
    }

    /// Number of pointer-sized occurrences in a type.
    pub fn count_native_positions(&self, ty: Idx) -> usize {
        self.encode_native_flags(ty).1.len()
    }

    /// Restore native views from flags produced by [`encode_native_flags`](Self::encode_native_flags).
    pub fn decode_native_flags(&self, erased: Idx, flags: &[bool]) -> Result<Idx, MetadataError> {
        let expected = self.count_native_positions(erased);
        if expected != flags.len() {
            return Err(MetadataError::FlagCountMismatch {
                expected,
                found: flags.len(),
            });
        }
        let mut restore = Restore {
            ctx: self,
            flags: flags.iter(),
        };
        Ok(restore.fold(erased))
    }

    /// Like [`decode_native_flags`](Self::decode_native_flags), but a
    /// malformed flag list falls back to the erased type.
    pub fn decode_native_flags_lossy(&self, erased: Idx, flags: &[bool]) -> Idx {
        self.decode_native_flags(erased, flags)
            .unwrap_or_else(|err| {
                tracing::debug!(%err, "ignoring native integer flags");
                self.encode_native_flags(erased).0
            })
    }
}

#[cfg(test)]
mod tests;
