//! Mapping types between type contexts.
//!
//! A symbol compiled against one set of assemblies is used from a
//! compilation that references another. Declared types are found again by
//! namespace, name and arity (preferring an assembly of the same name);
//! anything the destination lacks becomes a fresh missing type. Native
//! views are never carried over: the view is re-created over the
//! destination's underlying type, so a retargeted `nint` is equivalent to
//! the destination's `System.IntPtr`, resolved or missing.

use natint_ir::Name;
use smallvec::SmallVec;

use crate::members::Member;
use crate::{DefId, Idx, MissingType, OverlayError, TypeContext, TypeData};

/// A field re-hosted in another context.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RetargetedField {
    pub containing: Idx,
    pub name: Name,
    pub ty: Idx,
}

struct Retargeter<'a> {
    from: &'a TypeContext,
    to: &'a TypeContext,
}

impl Retargeter<'_> {
    fn name(&self, name: Name) -> Name {
        self.to.name(self.from.lookup(name))
    }

    fn retarget(&self, idx: Idx) -> Result<Idx, OverlayError> {
        Ok(match self.from.data(idx) {
            TypeData::Primitive(_) => idx,
            TypeData::Nullable(inner) => self.to.nullable(self.retarget(inner)?),
            TypeData::Pointer(pointee) => self.to.pointer(self.retarget(pointee)?),
            TypeData::TypeParam(ordinal) => self.to.pool().type_param(ordinal),
            TypeData::NativeInt { underlying } => {
                let underlying = self.retarget(underlying)?;
                self.to.get_or_create_native_view(underlying)?
            }
            TypeData::Named(def) => self.declared(def, &[])?,
            TypeData::Applied { generic, args } => self.declared(generic, &args)?,
            TypeData::Missing(missing) => self.missing(missing, &[])?,
        })
    }

    fn declared(&self, def: DefId, args: &[Idx]) -> Result<Idx, OverlayError> {
        let Some(decl) = self.from.def(def) else {
            return Ok(Idx::ERROR);
        };
        let assembly = self
            .from
            .assembly(decl.assembly)
            .map_or(Name::EMPTY, |a| a.name);
        self.missing(
            MissingType {
                assembly,
                namespace: decl.namespace,
                name: decl.name,
                arity: decl.arity,
                special: decl.special,
            },
            args,
        )
    }

    /// Find a declaration by its names in the destination, or make a missing type.
    fn missing(&self, reference: MissingType, args: &[Idx]) -> Result<Idx, OverlayError> {
        let assembly = self.name(reference.assembly);
        let namespace = self.name(reference.namespace);
        let name = self.name(reference.name);

        if let Some(found) = self
            .to
            .find_type(namespace, name, reference.arity, Some(assembly))
        {
            let args = args
                .iter()
                .map(|&arg| self.retarget(arg))
                .collect::<Result<SmallVec<[Idx; 2]>, _>>()?;
            return Ok(self.to.instantiate(found, &args));
        }
        tracing::debug!(
            namespace = self.to.lookup(namespace),
            name = self.to.lookup(name),
            "retargeted type is missing in destination"
        );
        Ok(self
            .to
            .missing_type(assembly, namespace, name, reference.arity))
    }
}

impl TypeContext {
    /// Map a type of `from` into this context.
    #[tracing::instrument(level = "debug", skip(self, from))]
    pub fn retarget_type(&self, from: &TypeContext, idx: Idx) -> Result<Idx, OverlayError> {
        Retargeter { from, to: self }.retarget(idx)
    }

    /// Map a field of `from` into this context.
    pub fn retarget_field(
        &self,
        from: &TypeContext,
        field: &Member,
    ) -> Result<RetargetedField, OverlayError> {
        let retargeter = Retargeter { from, to: self };
        Ok(RetargetedField {
            containing: retargeter.retarget(field.containing)?,
            name: retargeter.name(field.name),
            ty: retargeter.retarget(field.ret)?,
        })
    }
}
