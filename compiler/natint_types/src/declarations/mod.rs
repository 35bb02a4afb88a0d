//! Declaration checks that depend on signature equivalence.
//!
//! A `nint` parameter and an `IntPtr` parameter are the same parameter
//! type, so `F(nint)` and `F(System.IntPtr)` in one type collide, and in a
//! derived type one hides the other.

use crate::members::Member;
use crate::{DefId, Idx, MemberFlags, TypeCheckError, TypeContext};

/// Names of the virtual members every type inherits from `object`.
const OBJECT_VIRTUALS: &[&str] = &["ToString", "GetHashCode", "Equals"];

impl TypeContext {
    /// Check if two members of one type cannot coexist.
    fn same_slot(&self, a: &Member, b: &Member) -> bool {
        if a.name != b.name {
            return false;
        }
        if !(a.kind.has_signature() && b.kind.has_signature()) {
            return true;
        }
        if !self.signatures_equivalent(&a.param_types(), &b.param_types()) {
            return false;
        }
        // Conversion operators also differ by their result type.
        let name = self.lookup(a.name);
        if name == "op_Explicit" || name == "op_Implicit" {
            return self.are_equivalent(a.ret, b.ret);
        }
        true
    }

    /// Check if `member` overrides something `object` declares.
    fn overrides_object_member(&self, member: &Member) -> bool {
        let name = self.lookup(member.name);
        if !OBJECT_VIRTUALS.contains(&name) {
            return false;
        }
        match member.params.as_slice() {
            [] => name != "Equals",
            [param] => name == "Equals" && param.ty == Idx::OBJECT,
            _ => false,
        }
    }

    /// Check the members of a declaration against each other and its bases.
    ///
    /// Reports duplicate members (error), members hiding an inherited
    /// member without `new` (warning) and `override` without a matching
    /// virtual base member (error).
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn check_declarations(&self, def: DefId) -> Vec<TypeCheckError> {
        let ty = self.self_type(def);
        let members = self.members(ty);
        let bases = self.base_chain(ty);
        let mut errors = Vec::new();

        for (i, member) in members.iter().enumerate() {
            if let Some(earlier) = members[..i]
                .iter()
                .find(|earlier| self.same_slot(earlier, member))
            {
                errors.push(
                    TypeCheckError::duplicate_member(member.span, ty, member.name)
                        .with_related(earlier.span),
                );
                continue;
            }

            if member.flags.contains(MemberFlags::OVERRIDE) {
                if member.overridden.is_none() && !self.overrides_object_member(member) {
                    errors.push(TypeCheckError::no_member_to_override(
                        member.span,
                        ty,
                        member.name,
                    ));
                }
                continue;
            }

            if member.flags.contains(MemberFlags::NEW) {
                continue;
            }
            let hidden = bases.iter().find_map(|&base| {
                self.declared_members(base)
                    .iter()
                    .find(|inherited| self.same_slot(inherited, member))
                    .map(|inherited| (base, inherited.span))
            });
            if let Some((base, inherited_span)) = hidden {
                errors.push(
                    TypeCheckError::hides_inherited(member.span, ty, member.name, base)
                        .with_related(inherited_span),
                );
            }
        }
        errors
    }
}
