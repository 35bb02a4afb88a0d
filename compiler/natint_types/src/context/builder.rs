//! Declaration-time construction of a [`TypeContext`].

use std::ops::Deref;

use natint_ir::{Name, SharedInterner};
use smallvec::SmallVec;

use super::{raw_index, TypeContext};
use crate::{
    Assembly, AssemblyId, DefId, Idx, MemberDef, Param, SpecialType, TypeData, TypeDef,
    TypeFlags, TypeKind,
};

/// Declares assemblies and types, then freezes them into a [`TypeContext`].
///
/// A declaration's type exists as soon as it is declared, so members and
/// interfaces may refer to the declaring type itself (`IEquatable<IntPtr>`
/// on `IntPtr`). All read-only context queries, including native view
/// creation, are available while building through `Deref`.
pub struct ContextBuilder {
    ctx: TypeContext,
}

impl ContextBuilder {
    pub fn new(interner: SharedInterner) -> Self {
        ContextBuilder {
            ctx: TypeContext::new(interner),
        }
    }

    /// Register an assembly.
    pub fn add_assembly(&mut self, name: &str, version: [u16; 4]) -> AssemblyId {
        let id = AssemblyId::from_raw(raw_index(self.ctx.assemblies.len()));
        let name = self.ctx.name(name);
        self.ctx.assemblies.push(Assembly { name, version });
        id
    }

    /// Special types resolve from this assembly first.
    pub fn set_core_library(&mut self, assembly: AssemblyId) {
        self.ctx.core_library = Some(assembly);
        self.ctx.specials.clear();
    }

    /// Declare a type. Generic declarations get `arity` type parameters.
    pub fn declare_type(
        &mut self,
        assembly: AssemblyId,
        namespace: &str,
        name: &str,
        kind: TypeKind,
        arity: u32,
    ) -> DefId {
        let namespace = self.ctx.name(namespace);
        let name = self.ctx.name(name);
        let special = self.ctx.special_by_name(namespace, name, arity);
        let id = DefId::from_raw(raw_index(self.ctx.defs.len()));

        let self_ty = if arity == 0 {
            let flags = declared_flags(kind, special);
            self.ctx.pool.intern_declared(TypeData::Named(id), flags)
        } else {
            let params: SmallVec<[Idx; 2]> = (0..arity).map(|i| self.ctx.pool.type_param(i)).collect();
            self.ctx.pool.applied(id, &params)
        };

        self.ctx.defs.push(TypeDef {
            name,
            namespace,
            assembly,
            kind,
            arity,
            special,
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            self_ty,
        });

        if let Some(special) = special {
            // A previous lookup may have cached a missing type.
            self.ctx.specials.remove(&special);
        }
        tracing::trace!(?id, ?special, "declared type");
        id
    }

    pub fn set_base(&mut self, def: DefId, base: Idx) {
        if let Some(d) = self.ctx.defs.get_mut(def.index()) {
            d.base = Some(base);
        }
    }

    pub fn add_interface(&mut self, def: DefId, interface: Idx) {
        if let Some(d) = self.ctx.defs.get_mut(def.index()) {
            d.interfaces.push(interface);
        }
    }

    pub fn add_member(&mut self, def: DefId, member: MemberDef) {
        if let Some(d) = self.ctx.defs.get_mut(def.index()) {
            d.members.push(member);
        }
    }

    /// A parameter with an interned name.
    pub fn param(&self, name: &str, ty: Idx) -> Param {
        Param {
            name: self.ctx.name(name),
            ty,
        }
    }

    /// Intern a name.
    pub fn intern(&self, s: &str) -> Name {
        self.ctx.name(s)
    }

    /// Freeze the declarations.
    pub fn build(self) -> TypeContext {
        tracing::debug!(
            assemblies = self.ctx.assemblies.len(),
            types = self.ctx.defs.len(),
            "built type context"
        );
        self.ctx
    }
}

impl Deref for ContextBuilder {
    type Target = TypeContext;

    fn deref(&self) -> &TypeContext {
        &self.ctx
    }
}

/// Flags of a non-generic declaration.
fn declared_flags(kind: TypeKind, special: Option<SpecialType>) -> TypeFlags {
    let Some(special) = special else {
        return if kind == TypeKind::Struct {
            TypeFlags::IS_VALUE_TYPE
        } else {
            TypeFlags::empty()
        };
    };
    let mut flags = TypeFlags::IS_NUMERIC
        | TypeFlags::IS_INTEGRAL
        | TypeFlags::HAS_POINTER_SIZED
        | TypeFlags::IS_VALUE_TYPE;
    if !special.is_signed() {
        flags |= TypeFlags::IS_UNSIGNED;
    }
    flags
}
