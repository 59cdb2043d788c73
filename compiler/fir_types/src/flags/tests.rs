use super::*;

#[test]
fn intrinsic_flags() {
    let flags = TypeFlags::from_tag(Tag::Real);
    assert!(flags.contains(TypeFlags::IS_FIR | TypeFlags::IS_INTRINSIC));
    assert!(!flags.contains(TypeFlags::IS_AGGREGATE));
    assert!(!flags.has_invalid());
}

#[test]
fn descriptors_are_aggregates() {
    for tag in [Tag::Box, Tag::BoxChar, Tag::BoxProc] {
        let flags = TypeFlags::from_tag(tag);
        assert!(flags.contains(TypeFlags::IS_DESCRIPTOR));
        assert!(flags.contains(TypeFlags::IS_AGGREGATE));
    }
}

#[test]
fn record_flags() {
    let flags = TypeFlags::from_tag(Tag::Record);
    assert!(flags.contains(TypeFlags::IS_AGGREGATE));
    assert!(flags.contains(TypeFlags::HAS_RECORD));
    assert!(!flags.contains(TypeFlags::IS_INDIRECTION));
}

#[test]
fn invalid_is_neither_fir_nor_std() {
    let flags = TypeFlags::from_tag(Tag::Invalid);
    assert!(flags.has_invalid());
    assert!(!flags.intersects(TypeFlags::IS_FIR | TypeFlags::IS_STD));
}

#[test]
fn host_flags() {
    let flags = TypeFlags::from_tag(Tag::Function);
    assert!(flags.contains(TypeFlags::IS_STD));
    assert!(!flags.contains(TypeFlags::IS_FIR));
}

#[test]
fn propagate_mask_excludes_categories() {
    assert!(!TypeFlags::PROPAGATE_MASK.contains(TypeFlags::IS_FIR));
    assert!(TypeFlags::PROPAGATE_MASK.contains(TypeFlags::HAS_RECORD));
}
