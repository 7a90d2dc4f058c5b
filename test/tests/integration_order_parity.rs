/// Integration tests for the combined payload of an Object
///
/// Payloads carry no field tags, so both sides must walk components in the
/// same registration order. A receiver with another order must end up with
/// an error or visibly different state, never a silent match.

use facet_shared::{
    ByteBuffer, ComponentKind, Health, HealthStat, Object, ObjectError, ObjectId, ObjectTemplate,
    Position, PositionStat, TemplateId,
};

fn soldier_template() -> ObjectTemplate {
    ObjectTemplate::new(TemplateId::new(1), "soldier")
        .with_stat(HealthStat::new(100))
        .with_stat(PositionStat::default())
}

fn source() -> Object {
    let mut object = Object::from_template(ObjectId::new(1), &soldier_template()).unwrap();
    object.get_mut::<Health>().unwrap().set_health(42);
    object.get_mut::<Position>().unwrap().set(7.0, 8.0, 9.0);
    object
}

#[test]
fn same_order_reproduces_every_component() {
    let source = source();
    let mut payload = ByteBuffer::new();
    source.network_serialize_all(&mut payload);

    let mut receiver = Object::from_template(ObjectId::new(1), &soldier_template()).unwrap();
    receiver.network_unserialize_all(&mut payload).unwrap();

    assert!(payload.is_exhausted());
    assert_eq!(receiver.get::<Health>().unwrap().health(), 42);
    assert_eq!(receiver.get::<Health>().unwrap().max_health(), 100);
    assert_eq!(receiver.get::<Position>().unwrap().coords(), (7.0, 8.0, 9.0));
}

#[test]
fn serialize_is_idempotent() {
    let source = source();
    let mut first = ByteBuffer::new();
    source.network_serialize_all(&mut first);
    let mut second = ByteBuffer::new();
    source.network_serialize_all(&mut second);

    assert_eq!(first, second);
    assert_eq!(first.len(), source.byte_length());
}

#[test]
fn reordered_receiver_is_detectably_wrong() {
    let mut payload = ByteBuffer::new();
    source().network_serialize_all(&mut payload);

    let mut receiver = Object::from_layout(
        ObjectId::new(1),
        None,
        &[ComponentKind::Position, ComponentKind::Health],
    )
    .unwrap();
    let before = receiver.clone();

    // Health ends up reading the bits of 8.0 and 9.0 as max and current,
    // and 9.0 has the larger bit pattern
    let error = receiver.network_unserialize_all(&mut payload).unwrap_err();
    assert!(matches!(
        error,
        ObjectError::Component { object, .. } if object == ObjectId::new(1)
    ));
    assert_eq!(receiver, before);
}

#[test]
fn missing_component_on_receiver_leaves_bytes_over() {
    let mut payload = ByteBuffer::new();
    source().network_serialize_all(&mut payload);

    let mut receiver = Object::from_layout(ObjectId::new(1), None, &[ComponentKind::Health]).unwrap();
    receiver.network_unserialize_all(&mut payload).unwrap();

    assert_eq!(payload.remaining(), 12);
}
