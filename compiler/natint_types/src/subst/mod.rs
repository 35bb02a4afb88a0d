//! Structural type folding and the substitutions built on it.
//!
//! Substitution is how a native view borrows its underlying type's members
//! and interfaces: every occurrence of the underlying type is replaced by
//! the view, lazily, whenever a member or interface list is requested.

use smallvec::SmallVec;

use crate::{Idx, TypeContext, TypeData};

/// Transform types by structural recursion.
///
/// The default [`fold`](TypeFolder::fold) rebuilds wrappers and generic
/// applications from folded children and hands leaves to the
/// `fold_*` hooks. Unchanged types keep their `Idx`.
pub trait TypeFolder<'ctx> {
    fn context(&self) -> &'ctx TypeContext;

    fn fold(&mut self, ty: Idx) -> Idx {
        self.super_fold(ty)
    }

    /// Fold children, then rebuild.
    fn super_fold(&mut self, ty: Idx) -> Idx {
        let ctx = self.context();
        match ctx.data(ty) {
            TypeData::Nullable(inner) => {
                let folded = self.fold(inner);
                if folded == inner {
                    ty
                } else {
                    ctx.nullable(folded)
                }
            }
            TypeData::Pointer(pointee) => {
                let folded = self.fold(pointee);
                if folded == pointee {
                    ty
                } else {
                    ctx.pointer(folded)
                }
            }
            TypeData::Applied { generic, args } => {
                let folded: SmallVec<[Idx; 2]> = args.iter().map(|&arg| self.fold(arg)).collect();
                if folded == args {
                    ty
                } else {
                    ctx.pool.intern(TypeData::Applied {
                        generic,
                        args: folded,
                    })
                }
            }
            TypeData::NativeInt { underlying } => self.fold_native(ty, underlying),
            TypeData::TypeParam(ordinal) => self.fold_param(ty, ordinal),
            TypeData::Primitive(_) | TypeData::Named(_) | TypeData::Missing(_) => {
                self.fold_leaf(ty)
            }
        }
    }

    fn fold_native(&mut self, view: Idx, _underlying: Idx) -> Idx {
        view
    }

    fn fold_param(&mut self, param: Idx, _ordinal: u32) -> Idx {
        param
    }

    /// Primitive, named and missing types.
    fn fold_leaf(&mut self, ty: Idx) -> Idx {
        ty
    }
}

/// Replace every occurrence of one type (by identity) with another.
struct Replace<'ctx> {
    ctx: &'ctx TypeContext,
    from: Idx,
    to: Idx,
}

impl<'ctx> TypeFolder<'ctx> for Replace<'ctx> {
    fn context(&self) -> &'ctx TypeContext {
        self.ctx
    }

    fn fold(&mut self, ty: Idx) -> Idx {
        if ty == self.from {
            self.to
        } else {
            self.super_fold(ty)
        }
    }
}

/// Replace generic parameters by type arguments.
struct Instantiate<'ctx, 'a> {
    ctx: &'ctx TypeContext,
    args: &'a [Idx],
}

impl<'ctx> TypeFolder<'ctx> for Instantiate<'ctx, '_> {
    fn context(&self) -> &'ctx TypeContext {
        self.ctx
    }

    fn fold(&mut self, ty: Idx) -> Idx {
        if self.ctx.flags(ty).has_type_param() {
            self.super_fold(ty)
        } else {
            ty
        }
    }

    fn fold_param(&mut self, param: Idx, ordinal: u32) -> Idx {
        self.args.get(ordinal as usize).copied().unwrap_or(param)
    }
}

impl TypeContext {
    /// Replace every occurrence of `from` in `ty` with `to`.
    pub fn substitute(&self, ty: Idx, from: Idx, to: Idx) -> Idx {
        Replace {
            ctx: self,
            from,
            to,
        }
        .fold(ty)
    }

    /// Replace generic parameters in `ty` by `args`, by ordinal.
    pub fn instantiate_params(&self, ty: Idx, args: &[Idx]) -> Idx {
        if args.is_empty() {
            return ty;
        }
        Instantiate { ctx: self, args }.fold(ty)
    }
}
