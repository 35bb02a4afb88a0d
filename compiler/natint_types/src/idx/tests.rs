use super::*;

#[test]
fn primitive_indices_are_dense_and_fixed() {
    let prims = [
        Idx::OBJECT,
        Idx::STRING,
        Idx::BOOL,
        Idx::CHAR,
        Idx::SBYTE,
        Idx::BYTE,
        Idx::SHORT,
        Idx::USHORT,
        Idx::INT,
        Idx::UINT,
        Idx::LONG,
        Idx::ULONG,
        Idx::FLOAT,
        Idx::DOUBLE,
        Idx::DECIMAL,
        Idx::VOID,
        Idx::ERROR,
    ];
    assert_eq!(prims.len() as u32, Idx::PRIMITIVE_COUNT);
    for (i, idx) in prims.iter().enumerate() {
        assert_eq!(idx.raw() as usize, i);
        assert!(idx.is_primitive());
        assert!(idx.name().is_some());
    }
}

#[test]
fn dynamic_indices_have_no_name() {
    let idx = Idx::from_raw(Idx::FIRST_DYNAMIC);
    assert!(!idx.is_primitive());
    assert_eq!(idx.name(), None);
    assert_eq!(idx.to_string(), "type#32");
    assert_eq!(format!("{idx:?}"), "Idx(32)");
}

#[test]
fn display_and_debug_for_primitives() {
    assert_eq!(Idx::ULONG.to_string(), "ulong");
    assert_eq!(format!("{:?}", Idx::INT), "Idx::INT");
    assert_eq!(Idx::NONE.to_string(), "<none>");
    assert!(Idx::NONE.is_none());
}
