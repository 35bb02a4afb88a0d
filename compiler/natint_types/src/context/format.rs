//! Rendering types as source spellings.
//!
//! Native views render as `nint`/`nuint` and their underlying types by
//! metadata name, so the two stay textually distinguishable even though
//! they are equivalent.

use std::fmt::Write;

use natint_ir::Name;

use super::TypeContext;
use crate::{Idx, TypeData};

impl TypeContext {
    /// Render a type, e.g. `nint?`, `void*`, `System.IEquatable<nint>`.
    pub fn display(&self, idx: Idx) -> String {
        let mut out = String::new();
        self.write_type(&mut out, idx);
        out
    }

    fn write_type(&self, out: &mut String, idx: Idx) {
        match self.data(idx) {
            TypeData::Primitive(kind) => out.push_str(kind.idx().name().unwrap_or("<error>")),
            TypeData::Nullable(inner) => {
                self.write_type(out, inner);
                out.push('?');
            }
            TypeData::Pointer(pointee) => {
                self.write_type(out, pointee);
                out.push('*');
            }
            TypeData::Named(def) => match self.def(def) {
                Some(d) => self.write_qualified(out, d.namespace, d.name),
                None => out.push_str("<error>"),
            },
            TypeData::Applied { generic, args } => {
                match self.def(generic) {
                    Some(d) => self.write_qualified(out, d.namespace, d.name),
                    None => out.push_str("<error>"),
                }
                out.push('<');
                for (i, &arg) in args.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(out, arg);
                }
                out.push('>');
            }
            TypeData::TypeParam(0) => out.push('T'),
            TypeData::TypeParam(n) => {
                let _ = write!(out, "T{n}");
            }
            TypeData::NativeInt { underlying } => {
                let keyword = self
                    .special_type_of(underlying)
                    .map_or("<native>", |s| s.keyword());
                out.push_str(keyword);
            }
            TypeData::Missing(missing) => {
                self.write_qualified(out, missing.namespace, missing.name);
                if missing.arity > 0 {
                    let _ = write!(out, "`{}", missing.arity);
                }
            }
        }
    }

    fn write_qualified(&self, out: &mut String, namespace: Name, name: Name) {
        let namespace = self.lookup(namespace);
        if !namespace.is_empty() {
            out.push_str(namespace);
            out.push('.');
        }
        out.push_str(self.lookup(name));
    }
}
