use facet_shared::{ByteBuffer, ObjectTable};

/// Checks both tables hold the same Objects with the same component layout
/// and the same serialized state
pub fn assert_objects_match(expected: &ObjectTable, actual: &ObjectTable) {
    let expected_ids: Vec<_> = expected.ids().collect();
    let actual_ids: Vec<_> = actual.ids().collect();
    assert_eq!(expected_ids, actual_ids, "object ids differ");

    for object in expected.iter() {
        let other = actual
            .get(object.id())
            .unwrap_or_else(|| panic!("object {} missing", object.id()));
        assert_eq!(object.kinds(), other.kinds(), "layout of {} differs", object.id());

        let mut expected_state = ByteBuffer::new();
        object.network_serialize_all(&mut expected_state);
        let mut actual_state = ByteBuffer::new();
        other.network_serialize_all(&mut actual_state);
        assert_eq!(
            expected_state.as_bytes(),
            actual_state.as_bytes(),
            "state of {} differs",
            object.id()
        );
    }
}
