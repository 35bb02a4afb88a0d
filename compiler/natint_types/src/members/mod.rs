//! Member and interface queries.
//!
//! Members of a native view are the members of its underlying type with
//! every occurrence of the underlying type replaced by the view. The view
//! adds nothing and hides nothing; its members report no overridden
//! member and never carry `OVERRIDE`, because the view has no base type of
//! its own. Nothing is stored: the substitution runs on each request.

use natint_ir::{Name, Span};
use smallvec::SmallVec;

use crate::{
    DefId, Idx, MemberDef, MemberFlags, MemberKind, Param, TypeCheckError, TypeContext, TypeData,
};

/// Longest base chain followed before giving up on a cycle.
const MAX_BASE_DEPTH: usize = 64;

/// Identifies a declared member: its declaration and position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemberRef {
    pub def: DefId,
    pub slot: u32,
}

/// A member as seen through a particular type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Member {
    /// The type the member was requested on (a view for view members).
    pub containing: Idx,
    /// The declaration this member comes from.
    pub origin: MemberRef,
    pub name: Name,
    pub kind: MemberKind,
    pub params: SmallVec<[Param; 2]>,
    pub ret: Idx,
    pub flags: MemberFlags,
    /// Base member this member overrides.
    pub overridden: Option<MemberRef>,
    pub span: Span,
}

impl Member {
    /// Parameter types in order.
    pub fn param_types(&self) -> SmallVec<[Idx; 4]> {
        self.params.iter().map(|p| p.ty).collect()
    }
}

impl TypeContext {
    /// Members of a type, in declaration order.
    ///
    /// Missing types (and views over them) have no members.
    pub fn members(&self, ty: Idx) -> Vec<Member> {
        match self.data(ty) {
            TypeData::NativeInt { underlying } => self
                .members(underlying)
                .into_iter()
                .map(|member| self.view_member(member, underlying, ty))
                .collect(),
            TypeData::Named(_) | TypeData::Applied { .. } => {
                let base = self.base_type(ty);
                let mut members = self.declared_members(ty);
                for member in &mut members {
                    if member.flags.contains(MemberFlags::OVERRIDE) {
                        member.overridden = self.find_overridden(base, member);
                    }
                }
                members
            }
            _ => Vec::new(),
        }
    }

    /// Members declared directly on a declared type, without override links.
    pub(crate) fn declared_members(&self, ty: Idx) -> Vec<Member> {
        let (def, args) = match self.data(ty) {
            TypeData::Named(def) => (def, SmallVec::new()),
            TypeData::Applied { generic, args } => (generic, args),
            _ => return Vec::new(),
        };
        let Some(decl) = self.def(def) else {
            return Vec::new();
        };
        decl.members
            .iter()
            .enumerate()
            .map(|(slot, member)| self.instantiate_member(ty, def, slot, member, &args))
            .collect()
    }

    fn instantiate_member(
        &self,
        containing: Idx,
        def: DefId,
        slot: usize,
        member: &MemberDef,
        args: &[Idx],
    ) -> Member {
        Member {
            containing,
            origin: MemberRef {
                def,
                slot: crate::context::raw_index(slot),
            },
            name: member.name,
            kind: member.kind,
            params: member
                .params
                .iter()
                .map(|p| Param {
                    name: p.name,
                    ty: self.instantiate_params(p.ty, args),
                })
                .collect(),
            ret: self.instantiate_params(member.ret, args),
            flags: member.flags,
            overridden: None,
            span: member.span,
        }
    }

    fn view_member(&self, member: Member, underlying: Idx, view: Idx) -> Member {
        Member {
            containing: view,
            params: member
                .params
                .iter()
                .map(|p| Param {
                    name: p.name,
                    ty: self.substitute(p.ty, underlying, view),
                })
                .collect(),
            ret: self.substitute(member.ret, underlying, view),
            flags: member.flags - MemberFlags::OVERRIDE,
            overridden: None,
            ..member
        }
    }

    /// The base type of a declared type, instantiated for `ty`'s arguments.
    pub fn base_type(&self, ty: Idx) -> Option<Idx> {
        match self.data(ty) {
            TypeData::Named(def) => self.def(def).and_then(|d| d.base),
            TypeData::Applied { generic, args } => self
                .def(generic)
                .and_then(|d| d.base)
                .map(|base| self.instantiate_params(base, &args)),
            _ => None,
        }
    }

    /// Base types from the direct base outwards.
    pub fn base_chain(&self, ty: Idx) -> Vec<Idx> {
        let mut chain = Vec::new();
        let mut current = self.base_type(ty);
        while let Some(base) = current {
            if chain.len() >= MAX_BASE_DEPTH || chain.contains(&base) || base == ty {
                tracing::debug!(?ty, "base chain cycle or depth limit");
                break;
            }
            chain.push(base);
            current = self.base_type(base);
        }
        chain
    }

    /// The virtual base member `member` overrides, searching from `base` outwards.
    fn find_overridden(&self, base: Option<Idx>, member: &Member) -> Option<MemberRef> {
        let base = base?;
        let params = member.param_types();
        std::iter::once(base)
            .chain(self.base_chain(base))
            .flat_map(|ty| self.declared_members(ty))
            .find(|candidate| {
                candidate.name == member.name
                    && candidate.kind == member.kind
                    && candidate.flags.is_overridable()
                    && self.signatures_equivalent(&candidate.param_types(), &params)
            })
            .map(|candidate| candidate.origin)
    }

    /// Members named `name`, or `NoSuchMember`.
    pub fn lookup_member(
        &self,
        ty: Idx,
        name: Name,
        span: Span,
    ) -> Result<Vec<Member>, TypeCheckError> {
        let found: Vec<Member> = self
            .members(ty)
            .into_iter()
            .filter(|m| m.name == name)
            .collect();
        if found.is_empty() {
            Err(TypeCheckError::no_such_member(span, ty, name))
        } else {
            Ok(found)
        }
    }

    /// Interfaces a type declares, as seen through that type.
    ///
    /// For a view, each interface of the underlying type is rewritten with
    /// the underlying type replaced by the view.
    pub fn interfaces(&self, ty: Idx) -> Vec<Idx> {
        match self.data(ty) {
            TypeData::NativeInt { underlying } => self
                .interfaces(underlying)
                .into_iter()
                .map(|interface| self.substitute(interface, underlying, ty))
                .collect(),
            TypeData::Named(def) => self
                .def(def)
                .map(|d| d.interfaces.clone())
                .unwrap_or_default(),
            TypeData::Applied { generic, args } => self
                .def(generic)
                .map(|d| {
                    d.interfaces
                        .iter()
                        .map(|&i| self.instantiate_params(i, &args))
                        .collect()
                })
                .unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    /// Interfaces of `ty` declared as `namespace.name` with `arity` parameters.
    pub fn find_interfaces(&self, ty: Idx, namespace: &str, name: &str, arity: u32) -> Vec<Idx> {
        self.interfaces(ty)
            .into_iter()
            .filter(|&interface| {
                self.def_of(interface)
                    .and_then(|def| self.def(def))
                    .is_some_and(|d| {
                        d.arity == arity
                            && self.lookup(d.name) == name
                            && self.lookup(d.namespace) == namespace
                    })
            })
            .collect()
    }

    /// Render a member, e.g. `nint nint.op_Addition(nint pointer, int offset)`.
    pub fn display_member(&self, member: &Member) -> String {
        let mut out = format!(
            "{} {}.{}",
            self.display(member.ret),
            self.display(member.containing),
            self.lookup(member.name)
        );
        if member.kind.has_signature() {
            let params: Vec<String> = member
                .params
                .iter()
                .map(|p| format!("{} {}", self.display(p.ty), self.lookup(p.name)))
                .collect();
            out.push('(');
            out.push_str(&params.join(", "));
            out.push(')');
        }
        out
    }
}
