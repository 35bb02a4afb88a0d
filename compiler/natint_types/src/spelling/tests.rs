use natint_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::*;
use crate::test_helpers::{core_builder, core_context, empty_context};

const SPAN: Span = Span::new(4, 8);

fn bind(ctx: &TypeContext, scope: &Scope, spelling: &str) -> (Idx, Vec<ErrorCode>) {
    bind_with(ctx, scope, spelling, CheckOptions::default())
}

fn bind_with(
    ctx: &TypeContext,
    scope: &Scope,
    spelling: &str,
    options: CheckOptions,
) -> (Idx, Vec<ErrorCode>) {
    let mut queue = DiagnosticQueue::new();
    let ty = ctx.bind_type_spelling(scope, spelling, SPAN, options, &mut queue);
    (ty, queue.flush().into_iter().map(|d| d.code).collect())
}

#[test]
fn keywords_bind_to_views() {
    let ctx = core_context();
    let scope = Scope::new();
    let nint = ctx.native_integer(true);
    let nuint = ctx.native_integer(false);

    assert_eq!(bind(&ctx, &scope, "nint"), (nint, vec![]));
    assert_eq!(bind(&ctx, &scope, "nuint?"), (ctx.nullable(nuint), vec![]));
    assert_eq!(bind(&ctx, &scope, "nint*"), (ctx.pointer(nint), vec![]));
    assert_eq!(bind(&ctx, &scope, " nint ? "), (ctx.nullable(nint), vec![]));
}

#[test]
fn primitive_keywords() {
    let ctx = core_context();
    let scope = Scope::new();

    assert_eq!(bind(&ctx, &scope, "int").0, Idx::INT);
    assert_eq!(bind(&ctx, &scope, "object").0, Idx::OBJECT);
    assert_eq!(bind(&ctx, &scope, "void*").0, ctx.pointer(Idx::VOID));
    assert_eq!(bind(&ctx, &scope, "ulong?*").0, ctx.pointer(ctx.nullable(Idx::ULONG)));
}

#[test]
fn qualified_names_bind_to_underlying_types() {
    let (builder, core) = core_builder();
    let ctx = builder.build();
    let scope = Scope::new();
    let int_ptr = ctx.special_type(SpecialType::IntPtr);
    let nint = ctx.native_integer(true);

    let (ty, errors) = bind(&ctx, &scope, "System.IntPtr");
    assert_eq!(ty, int_ptr);
    assert!(errors.is_empty());
    assert!(!ctx.is_native_integer(ty));

    assert_eq!(
        bind(&ctx, &scope, "System.IEquatable<nint>").0,
        ctx.instantiate(core.equatable, &[nint])
    );

    let mut with_using = Scope::new();
    with_using.using(ctx.name("System"));
    with_using.using(ctx.name("System"));
    assert_eq!(
        bind(&ctx, &with_using, "IEquatable<System.UIntPtr>").0,
        ctx.instantiate(core.equatable, &[ctx.special_type(SpecialType::UIntPtr)])
    );
    assert_eq!(bind(&ctx, &with_using, "IntPtr").0, int_ptr);
}

#[test]
fn declared_type_shadows_keyword() {
    let (mut builder, _) = core_builder();
    let asm = builder.add_assembly("App", [1, 0, 0, 0]);
    let def = builder.declare_type(asm, "App", "nint", crate::TypeKind::Class, 0);
    let ctx = builder.build();
    let shadow = ctx.self_type(def);

    let mut scope = Scope::new();
    scope.declare(ctx.name("nint"), shadow);
    assert_eq!(scope.lookup(ctx.name("nint")), Some(shadow));

    let (ty, errors) = bind(&ctx, &scope, "nint");
    assert_eq!(ty, shadow);
    assert!(errors.is_empty());
    assert!(!ctx.is_native_integer(ty));
    // `nuint` is unaffected.
    assert_eq!(bind(&ctx, &scope, "nuint").0, ctx.native_integer(false));
}

#[test]
fn old_language_version_reports_feature() {
    let ctx = core_context();
    let scope = Scope::new();
    let options = CheckOptions::default().with_language_version(LanguageVersion::V8);

    let (ty, errors) = bind_with(&ctx, &scope, "nint", options);
    assert_eq!(ty, ctx.native_integer(true));
    assert_eq!(errors, vec![ErrorCode::E0002]);

    let (_, errors) = bind_with(&ctx, &scope, "System.IntPtr", options);
    assert!(errors.is_empty());
}

#[test]
fn missing_underlying_reports_unresolved() {
    let ctx = empty_context();
    let scope = Scope::new();

    let (ty, errors) = bind(&ctx, &scope, "nuint");
    assert!(ctx.is_native_integer(ty));
    assert_eq!(errors, vec![ErrorCode::E0001]);

    let (ty, errors) = bind(&ctx, &scope, "System.IntPtr");
    assert_eq!(ty, ctx.special_type(SpecialType::IntPtr));
    assert_eq!(errors, vec![ErrorCode::E0001]);
}

#[test]
fn unknown_and_malformed_spellings() {
    let ctx = core_context();
    let scope = Scope::new();

    for spelling in ["Widget", "System.Widget", "nint<", "int nint", "", "9lives", "A<B"] {
        let (ty, errors) = bind(&ctx, &scope, spelling);
        assert_eq!(ty, Idx::ERROR, "{spelling:?}");
        assert_eq!(errors, vec![ErrorCode::E0004], "{spelling:?}");
    }
}
