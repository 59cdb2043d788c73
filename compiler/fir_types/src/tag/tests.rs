use super::*;

#[test]
fn tag_values_in_expected_ranges() {
    assert!((16..32).contains(&(Tag::Character as u8)));
    assert!((16..32).contains(&(Tag::Real as u8)));

    assert!((32..48).contains(&(Tag::Reference as u8)));
    assert!((32..48).contains(&(Tag::Heap as u8)));

    assert!((48..64).contains(&(Tag::Box as u8)));
    assert!((48..64).contains(&(Tag::BoxProc as u8)));

    assert!((80..96).contains(&(Tag::Dims as u8)));
    assert!((80..96).contains(&(Tag::TypeDesc as u8)));

    assert!(Tag::Function as u8 >= 224);
}

#[test]
fn category_predicates() {
    assert!(Tag::Logical.is_intrinsic());
    assert!(!Tag::BoxChar.is_intrinsic());

    assert!(Tag::Pointer.is_indirection());
    assert!(!Tag::Box.is_indirection());

    assert!(Tag::BoxChar.is_descriptor());
    assert!(!Tag::Sequence.is_descriptor());

    assert!(Tag::Len.is_metadata());
    assert!(!Tag::Record.is_metadata());
}

#[test]
fn fir_and_std_are_disjoint() {
    for tag in [Tag::Integer, Tag::Record, Tag::Dims, Tag::Box] {
        assert!(tag.is_fir());
        assert!(!tag.is_std());
    }
    for tag in [Tag::StdInteger, Tag::StdFloat, Tag::StdIndex, Tag::Function] {
        assert!(tag.is_std());
        assert!(!tag.is_fir());
    }
    assert!(!Tag::Invalid.is_fir());
    assert!(!Tag::Invalid.is_std());
}

#[test]
fn uses_extra_is_correct() {
    assert!(Tag::Box.uses_extra());
    assert!(Tag::Sequence.uses_extra());
    assert!(Tag::Function.uses_extra());

    assert!(!Tag::BoxChar.uses_extra());
    assert!(!Tag::Pointer.uses_extra());
    assert!(!Tag::Record.uses_extra());
}

#[test]
fn keywords_match_surface_syntax() {
    assert_eq!(Tag::Integer.keyword(), "int");
    assert_eq!(Tag::Sequence.keyword(), "array");
    assert_eq!(Tag::Record.keyword(), "type");
    assert_eq!(Tag::TypeDesc.to_string(), "tdesc");
    assert_eq!(format!("{:?}", Tag::Heap), "Tag::heap");
}
