//! The per-compilation type context.
//!
//! A `TypeContext` owns the pool, the declarations, and the overlay caches
//! (native views keyed by underlying type, special types keyed by tag).
//! It is built once through [`ContextBuilder`] and is immutable apart from
//! the append-only pool and caches, so it can be shared across threads.

mod builder;
mod format;

pub use builder::ContextBuilder;

use dashmap::DashMap;
use natint_ir::{Name, SharedInterner};
use rustc_hash::FxBuildHasher;

use crate::{
    Assembly, AssemblyId, DefId, Idx, MissingType, Pool, SpecialType, Tag, TypeData, TypeDef,
    TypeFlags,
};

/// Types, declarations and overlay caches of one compilation.
pub struct TypeContext {
    pub(crate) interner: SharedInterner,
    pub(crate) pool: Pool,
    pub(crate) assemblies: Vec<Assembly>,
    pub(crate) defs: Vec<TypeDef>,
    pub(crate) core_library: Option<AssemblyId>,
    /// Underlying pointer-sized type -> its native view.
    pub(crate) views: DashMap<Idx, Idx, FxBuildHasher>,
    /// Resolved (or missing) `System.IntPtr` / `System.UIntPtr`.
    pub(crate) specials: DashMap<SpecialType, Idx, FxBuildHasher>,
}

impl TypeContext {
    pub(crate) fn new(interner: SharedInterner) -> Self {
        TypeContext {
            interner,
            pool: Pool::new(),
            assemblies: Vec::new(),
            defs: Vec::new(),
            core_library: None,
            views: DashMap::with_hasher(FxBuildHasher),
            specials: DashMap::with_hasher(FxBuildHasher),
        }
    }

    // === Accessors ===

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Intern a string through the shared interner.
    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    /// Resolve an interned name to its string.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.interner.lookup(name)
    }

    pub fn data(&self, idx: Idx) -> TypeData {
        self.pool.data(idx)
    }

    pub fn tag(&self, idx: Idx) -> Tag {
        self.pool.tag(idx)
    }

    pub fn flags(&self, idx: Idx) -> TypeFlags {
        self.pool.flags(idx)
    }

    pub fn def(&self, id: DefId) -> Option<&TypeDef> {
        self.defs.get(id.index())
    }

    pub fn defs(&self) -> impl Iterator<Item = (DefId, &TypeDef)> {
        self.defs
            .iter()
            .enumerate()
            .map(|(i, def)| (DefId::from_raw(raw_index(i)), def))
    }

    pub fn assembly(&self, id: AssemblyId) -> Option<&Assembly> {
        self.assemblies.get(id.raw() as usize)
    }

    /// The assembly that provides the special types, when one was set.
    pub fn core_library(&self) -> Option<AssemblyId> {
        self.core_library
    }

    /// Declaration behind a `Named` or `Applied` type.
    pub fn def_of(&self, idx: Idx) -> Option<DefId> {
        match self.data(idx) {
            TypeData::Named(def) | TypeData::Applied { generic: def, .. } => Some(def),
            _ => None,
        }
    }

    // === Construction ===

    /// `inner?`.
    pub fn nullable(&self, inner: Idx) -> Idx {
        self.pool.nullable(inner)
    }

    /// `pointee*`.
    pub fn pointer(&self, pointee: Idx) -> Idx {
        self.pool.pointer(pointee)
    }

    /// Apply a declaration to type arguments.
    ///
    /// Non-generic declarations ignore `args` and return their own type.
    pub fn instantiate(&self, def: DefId, args: &[Idx]) -> Idx {
        match self.def(def) {
            Some(d) if d.arity == 0 => d.self_ty,
            Some(_) => self.pool.applied(def, args),
            None => Idx::ERROR,
        }
    }

    /// The type of a declaration as seen from inside it.
    pub fn self_type(&self, def: DefId) -> Idx {
        self.def(def).map_or(Idx::ERROR, |d| d.self_ty)
    }

    /// Allocate a new missing type.
    ///
    /// Every call yields a distinct instance; instances compare equal by
    /// value. A reference to `System.IntPtr`/`System.UIntPtr` carries the
    /// matching special-type tag.
    pub fn missing_type(&self, assembly: Name, namespace: Name, name: Name, arity: u32) -> Idx {
        let special = self.special_by_name(namespace, name, arity);
        self.pool.fresh(TypeData::Missing(MissingType {
            assembly,
            namespace,
            name,
            arity,
            special,
        }))
    }

    // === Lookup ===

    /// Find a declaration by namespace, name and arity.
    ///
    /// Declarations in `preferred` win over declarations elsewhere;
    /// otherwise the first declared match wins.
    pub fn find_type(
        &self,
        namespace: Name,
        name: Name,
        arity: u32,
        preferred: Option<Name>,
    ) -> Option<DefId> {
        let mut first = None;
        for (id, def) in self.defs() {
            if def.namespace != namespace || def.name != name || def.arity != arity {
                continue;
            }
            let asm_name = self.assembly(def.assembly).map(|a| a.name);
            if preferred.is_some() && asm_name == preferred {
                return Some(id);
            }
            first.get_or_insert(id);
        }
        first
    }

    /// The special type a `(namespace, name, arity)` triple denotes.
    pub(crate) fn special_by_name(
        &self,
        namespace: Name,
        name: Name,
        arity: u32,
    ) -> Option<SpecialType> {
        if arity != 0 || self.lookup(namespace) != SpecialType::NAMESPACE {
            return None;
        }
        [SpecialType::IntPtr, SpecialType::UIntPtr]
            .into_iter()
            .find(|s| self.lookup(name) == s.metadata_name())
    }

    /// Check if a type is (or wraps only) an error or missing type.
    ///
    /// A native view is erroneous exactly when its underlying type is.
    pub fn is_error(&self, idx: Idx) -> bool {
        match self.data(idx) {
            TypeData::Primitive(kind) => kind.idx() == Idx::ERROR,
            TypeData::Missing(_) => true,
            TypeData::NativeInt { underlying } => self.is_error(underlying),
            _ => false,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "declaration counts never exceed u32::MAX"
)]
pub(crate) fn raw_index(i: usize) -> u32 {
    i as u32
}

#[cfg(test)]
mod tests;
