use super::*;
use crate::{MissingType, SpecialType};
use natint_ir::Name;

#[test]
fn primitives_at_fixed_indices() {
    let pool = Pool::new();
    for kind in PrimitiveKind::ALL {
        assert_eq!(pool.data(kind.idx()), TypeData::Primitive(kind));
        assert_eq!(pool.tag(kind.idx()), Tag::Primitive);
    }
    assert_eq!(pool.len(), Idx::FIRST_DYNAMIC as usize);
    assert!(!pool.is_empty());
}

#[test]
fn primitive_flags() {
    let pool = Pool::new();
    assert!(pool.flags(Idx::UINT).contains(TypeFlags::IS_UNSIGNED));
    assert!(pool.flags(Idx::INT).contains(TypeFlags::IS_INTEGRAL));
    assert!(!pool.flags(Idx::INT).contains(TypeFlags::IS_UNSIGNED));
    assert!(pool.flags(Idx::DOUBLE).contains(TypeFlags::IS_NUMERIC));
    assert!(!pool.flags(Idx::DOUBLE).contains(TypeFlags::IS_INTEGRAL));
    assert!(!pool.flags(Idx::STRING).contains(TypeFlags::IS_VALUE_TYPE));
    assert!(pool.flags(Idx::ERROR).contains(TypeFlags::HAS_ERROR));
}

#[test]
fn structural_types_are_interned() {
    let pool = Pool::new();
    let a = pool.nullable(Idx::INT);
    let b = pool.nullable(Idx::INT);
    assert_eq!(a, b);
    assert_eq!(pool.nullable(a), a);

    let p = pool.pointer(Idx::VOID);
    assert_eq!(pool.pointer(Idx::VOID), p);
    assert_ne!(p, a);
    assert!(pool.flags(p).contains(TypeFlags::IS_POINTER));
}

#[test]
fn fresh_entries_are_never_shared() {
    let pool = Pool::new();
    let missing = MissingType {
        assembly: Name::EMPTY,
        namespace: Name::EMPTY,
        name: Name::EMPTY,
        arity: 0,
        special: Some(SpecialType::IntPtr),
    };
    let a = pool.fresh(TypeData::Missing(missing));
    let b = pool.fresh(TypeData::Missing(missing));
    assert_ne!(a, b);
    assert_eq!(pool.data(a), pool.data(b));
    assert!(pool.flags(a).contains(TypeFlags::HAS_MISSING | TypeFlags::HAS_POINTER_SIZED));
}

#[test]
fn flags_propagate_through_wrappers() {
    let pool = Pool::new();
    let missing = pool.fresh(TypeData::Missing(MissingType {
        assembly: Name::EMPTY,
        namespace: Name::EMPTY,
        name: Name::EMPTY,
        arity: 0,
        special: Some(SpecialType::UIntPtr),
    }));
    let view = pool.fresh(TypeData::NativeInt {
        underlying: missing,
    });
    let nullable = pool.nullable(view);

    let flags = pool.flags(nullable);
    assert!(flags.has_native_int());
    assert!(flags.has_missing());
    assert!(flags.contains(TypeFlags::IS_NULLABLE));
    assert!(!flags.contains(TypeFlags::IS_NATIVE));

    let param = pool.type_param(0);
    let applied = pool.applied(DefId::from_raw(0), &[param, view]);
    assert!(pool.flags(applied).has_type_param());
    assert!(pool.flags(applied).has_native_int());
}

#[test]
fn foreign_index_reads_as_error() {
    let pool = Pool::new();
    let foreign = Idx::from_raw(10_000);
    assert_eq!(pool.data(foreign), TypeData::Primitive(PrimitiveKind::Error));
    assert!(pool.flags(foreign).contains(TypeFlags::HAS_ERROR));
}
