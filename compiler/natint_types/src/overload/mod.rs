//! Overload resolution over parameter lists.
//!
//! Candidates are compared argument by argument with the better-conversion
//! rules. Two parameter types that are equivalent are equally good, so a
//! `nint` overload and an `IntPtr` overload of the same slot are always
//! ambiguous: the native view never wins by preference.

use std::cmp::Ordering;

use natint_ir::{Name, Span};
use smallvec::SmallVec;

use crate::members::Member;
use crate::operators::Operand;
use crate::value::in_range;
use crate::{Idx, NumericKind, TypeCheckError, TypeContext, Value};

impl TypeContext {
    /// Check if an argument converts implicitly to a parameter type.
    ///
    /// An `int` constant also converts to any integral type whose range
    /// contains it; for native targets, the portable range.
    pub fn argument_converts(&self, arg: &Operand, param: Idx) -> bool {
        if self.converts_implicitly(arg.ty, param) {
            return true;
        }
        let Some(Value::Int { value, .. }) = arg.constant else {
            return false;
        };
        if arg.ty != Idx::INT {
            return false;
        }
        match self.numeric_kind(param) {
            Some(kind) if kind.is_integral() && kind != NumericKind::Char => {
                let range = match kind.fixed_bits() {
                    Some(bits) => kind.range_at(bits),
                    None => kind.portable_range(),
                };
                in_range(value, range)
            }
            _ => false,
        }
    }

    /// Which of two parameter types is the better target for an argument.
    ///
    /// `Less` prefers `t1`, `Greater` prefers `t2`, `Equal` is a tie.
    pub fn better_conversion(&self, arg: &Operand, t1: Idx, t2: Idx) -> Ordering {
        if self.are_equivalent(t1, t2) {
            return Ordering::Equal;
        }
        if self.are_equivalent(arg.ty, t1) {
            return Ordering::Less;
        }
        if self.are_equivalent(arg.ty, t2) {
            return Ordering::Greater;
        }
        match (
            self.converts_implicitly(t1, t2),
            self.converts_implicitly(t2, t1),
        ) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
        match (self.numeric_kind(t1), self.numeric_kind(t2)) {
            (Some(k1), Some(k2)) if k1.is_integral() && k2.is_integral() => {
                match (k1.is_signed_integral(), k2.is_signed_integral()) {
                    (true, false) => Ordering::Less,
                    (false, true) => Ordering::Greater,
                    _ => Ordering::Equal,
                }
            }
            _ => Ordering::Equal,
        }
    }

    /// Check if candidate `a` is better than candidate `b` for `args`.
    fn better_candidate(&self, a: &[Idx], b: &[Idx], args: &[Operand]) -> bool {
        let mut better_somewhere = false;
        for ((&t1, &t2), arg) in a.iter().zip(b).zip(args) {
            match self.better_conversion(arg, t1, t2) {
                Ordering::Less => better_somewhere = true,
                Ordering::Greater => return false,
                Ordering::Equal => {}
            }
        }
        better_somewhere
    }

    /// Pick the best candidate parameter list for `args`.
    ///
    /// Returns the index of the winner. Reports `NoApplicableOverload`
    /// when no candidate accepts the arguments and `AmbiguousCall` when
    /// no applicable candidate beats all others.
    #[tracing::instrument(level = "trace", skip_all, fields(candidates = candidates.len()))]
    pub fn resolve_overload(
        &self,
        candidates: &[&[Idx]],
        args: &[Operand],
        span: Span,
    ) -> Result<usize, TypeCheckError> {
        let applicable: SmallVec<[usize; 4]> = candidates
            .iter()
            .enumerate()
            .filter(|(_, params)| {
                params.len() == args.len()
                    && params
                        .iter()
                        .zip(args)
                        .all(|(&param, arg)| self.argument_converts(arg, param))
            })
            .map(|(i, _)| i)
            .collect();

        match applicable.as_slice() {
            [] => return Err(TypeCheckError::no_overload(span, args.len())),
            [only] => return Ok(*only),
            _ => {}
        }

        let beats_all = |i: usize| {
            applicable
                .iter()
                .filter(|&&j| j != i)
                .all(|&j| self.better_candidate(candidates[i], candidates[j], args))
        };
        if let Some(&best) = applicable.iter().find(|&&i| beats_all(i)) {
            return Ok(best);
        }

        let unbeaten: SmallVec<[usize; 2]> = applicable
            .iter()
            .copied()
            .filter(|&i| {
                !applicable
                    .iter()
                    .any(|&j| j != i && self.better_candidate(candidates[j], candidates[i], args))
            })
            .collect();
        tracing::debug!(?unbeaten, "ambiguous call");
        Err(TypeCheckError::ambiguous_call(span, &unbeaten))
    }

    /// Resolve a call to the methods named `name` on `ty`.
    pub fn resolve_call(
        &self,
        ty: Idx,
        name: Name,
        args: &[Operand],
        span: Span,
    ) -> Result<Member, TypeCheckError> {
        let mut members = self.lookup_member(ty, name, span)?;
        members.retain(|m| m.kind.has_signature());
        let params: Vec<SmallVec<[Idx; 4]>> = members.iter().map(Member::param_types).collect();
        let candidates: Vec<&[Idx]> = params.iter().map(SmallVec::as_slice).collect();
        let best = self.resolve_overload(&candidates, args, span)?;
        Ok(members.swap_remove(best))
    }
}

#[cfg(test)]
mod tests;
