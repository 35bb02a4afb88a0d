//! Binding type spellings to types.
//!
//! `nint` and `nuint` are contextual keywords: a type or alias with that
//! name in scope wins over the keyword, and binds to that type, which is
//! not a native integer. Without one, the keywords bind to the native
//! views. Older language versions still bind the keywords but report that
//! the feature is unavailable.

use natint_diagnostic::DiagnosticQueue;
use natint_ir::{Name, Span};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::{CheckOptions, Idx, LanguageVersion, PrimitiveKind, SpecialType, TypeCheckError, TypeContext};

/// Names visible where a spelling is bound.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    /// Types and aliases declared in scope, by simple name.
    types: FxHashMap<Name, Idx>,
    /// Namespaces imported with `using`.
    usings: Vec<Name>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a type or alias named `name`.
    pub fn declare(&mut self, name: Name, ty: Idx) {
        self.types.insert(name, ty);
    }

    /// Import a namespace.
    pub fn using(&mut self, namespace: Name) {
        if !self.usings.contains(&namespace) {
            self.usings.push(namespace);
        }
    }

    pub fn lookup(&self, name: Name) -> Option<Idx> {
        self.types.get(&name).copied()
    }
}

/// Parsed spelling: `A.B<C, D>?*`.
#[derive(Debug)]
struct TypeSyntax<'s> {
    path: SmallVec<[&'s str; 2]>,
    args: Vec<TypeSyntax<'s>>,
    /// `?` and `*`, left to right.
    suffixes: SmallVec<[u8; 2]>,
}

struct Parser<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Parser<'s> {
    fn skip_ws(&mut self) {
        while self.src.as_bytes().get(self.pos).is_some_and(u8::is_ascii_whitespace) {
            self.pos += 1;
        }
    }

    fn peek(&mut self) -> Option<u8> {
        self.skip_ws();
        self.src.as_bytes().get(self.pos).copied()
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Option<&'s str> {
        self.skip_ws();
        let bytes = self.src.as_bytes();
        let start = self.pos;
        while bytes
            .get(self.pos)
            .is_some_and(|&b| b == b'_' || b.is_ascii_alphanumeric())
        {
            self.pos += 1;
        }
        let ident = self.src.get(start..self.pos)?;
        if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
            None
        } else {
            Some(ident)
        }
    }

    fn parse_type(&mut self) -> Option<TypeSyntax<'s>> {
        let mut path = SmallVec::new();
        path.push(self.ident()?);
        while self.eat(b'.') {
            path.push(self.ident()?);
        }

        let mut args = Vec::new();
        if self.eat(b'<') {
            loop {
                args.push(self.parse_type()?);
                if self.eat(b'>') {
                    break;
                }
                if !self.eat(b',') {
                    return None;
                }
            }
        }

        let mut suffixes = SmallVec::new();
        while let Some(suffix @ (b'?' | b'*')) = self.peek() {
            self.pos += 1;
            suffixes.push(suffix);
        }
        Some(TypeSyntax {
            path,
            args,
            suffixes,
        })
    }

    fn parse(src: &'s str) -> Option<TypeSyntax<'s>> {
        let mut parser = Parser { src, pos: 0 };
        let syntax = parser.parse_type()?;
        parser.peek().is_none().then_some(syntax)
    }
}

/// Binds one spelling, reporting into a queue.
struct Binder<'a> {
    ctx: &'a TypeContext,
    scope: &'a Scope,
    span: Span,
    options: CheckOptions,
    queue: &'a mut DiagnosticQueue,
}

impl Binder<'_> {
    fn report(&mut self, err: &TypeCheckError) {
        err.report(self.ctx, self.queue);
    }

    fn bind(&mut self, syntax: &TypeSyntax<'_>) -> Idx {
        let args: SmallVec<[Idx; 2]> = syntax.args.iter().map(|arg| self.bind(arg)).collect();
        let mut ty = match syntax.path.as_slice() {
            [simple] => self.bind_simple(simple, &args),
            [namespace @ .., name] => self.bind_qualified(&namespace.join("."), name, &args),
            [] => Idx::ERROR,
        };
        for &suffix in &syntax.suffixes {
            ty = if suffix == b'?' {
                self.ctx.nullable(ty)
            } else {
                self.ctx.pointer(ty)
            };
        }
        ty
    }

    fn bind_simple(&mut self, name: &str, args: &[Idx]) -> Idx {
        if args.is_empty() {
            let interned = self.ctx.name(name);
            if let Some(ty) = self.scope.lookup(interned) {
                return ty;
            }
            if let Some(kind) = PrimitiveKind::ALL
                .into_iter()
                .filter(|k| *k != PrimitiveKind::Error)
                .find(|k| k.idx().name() == Some(name))
            {
                return kind.idx();
            }
            if let Some(special) = [SpecialType::IntPtr, SpecialType::UIntPtr]
                .into_iter()
                .find(|s| s.keyword() == name)
            {
                return self.bind_native_keyword(special);
            }
        }

        let name_id = self.ctx.name(name);
        let arity = arity_of(args);
        let found = std::iter::once(Name::EMPTY)
            .chain(self.scope.usings.iter().copied())
            .find_map(|namespace| self.ctx.find_type(namespace, name_id, arity, None));
        match found {
            Some(def) => self.ctx.instantiate(def, args),
            None => {
                self.report(&TypeCheckError::unknown_type(self.span, name));
                Idx::ERROR
            }
        }
    }

    fn bind_native_keyword(&mut self, special: SpecialType) -> Idx {
        if !self.options.language_version.supports_native_integers() {
            self.report(&TypeCheckError::feature_not_available(
                self.span,
                "native-sized integers",
                LanguageVersion::NATIVE_INTEGERS,
            ));
        }
        let view = self.ctx.native_integer(special.is_signed());
        if self.ctx.is_error(view) {
            self.report(&TypeCheckError::unresolved_underlying(self.span, special));
        }
        view
    }

    fn bind_qualified(&mut self, namespace: &str, name: &str, args: &[Idx]) -> Idx {
        let namespace_id = self.ctx.name(namespace);
        let name_id = self.ctx.name(name);
        let arity = arity_of(args);
        if let Some(def) = self.ctx.find_type(namespace_id, name_id, arity, None) {
            return self.ctx.instantiate(def, args);
        }
        if let Some(special) = self.ctx.special_by_name(namespace_id, name_id, arity) {
            self.report(&TypeCheckError::unresolved_underlying(self.span, special));
            return self.ctx.special_type(special);
        }
        self.report(&TypeCheckError::unknown_type(
            self.span,
            format!("{namespace}.{name}"),
        ));
        Idx::ERROR
    }
}

fn arity_of(args: &[Idx]) -> u32 {
    crate::context::raw_index(args.len())
}

impl TypeContext {
    /// Bind a type spelling such as `nint`, `System.IntPtr?` or
    /// `System.IEquatable<nuint>`.
    ///
    /// Diagnostics go to `queue`; unbindable spellings yield [`Idx::ERROR`].
    pub fn bind_type_spelling(
        &self,
        scope: &Scope,
        spelling: &str,
        span: Span,
        options: CheckOptions,
        queue: &mut DiagnosticQueue,
    ) -> Idx {
        let Some(syntax) = Parser::parse(spelling) else {
            TypeCheckError::unknown_type(span, spelling).report(self, queue);
            return Idx::ERROR;
        };
        Binder {
            ctx: self,
            scope,
            span,
            options,
            queue,
        }
        .bind(&syntax)
    }
}

#[cfg(test)]
mod tests;
