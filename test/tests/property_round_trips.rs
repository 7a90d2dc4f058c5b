/// PROPERTY-BASED TESTS: Component payload round trips
///
/// For every valid value, serializing a component and reading it into a
/// differently initialized component of the same kind reproduces the
/// value exactly.

use proptest::prelude::*;
use facet_shared::{
    ByteBuffer, Component, ComponentKind, Health, HealthStat, Lifespan, LifespanStat, Object,
    ObjectId, ObjectTemplate, Position, PositionStat, Replicate, TemplateId,
};

fn finite() -> impl Strategy<Value = f32> {
    prop::num::f32::NORMAL | prop::num::f32::ZERO | prop::num::f32::SUBNORMAL
}

fn health_strategy() -> impl Strategy<Value = (i32, i32)> {
    (1i32..=i32::MAX).prop_flat_map(|max| (Just(max), 0i32..=max))
}

proptest! {
    /// Health keeps both max and current health
    #[test]
    fn prop_health_round_trip((max, health) in health_strategy()) {
        let stat = HealthStat::new(max).with_initial_health(health);
        let source = Health::construct(ObjectId::new(1), &stat).unwrap();

        let mut buffer = ByteBuffer::new();
        source.network_serialize(&mut buffer);
        prop_assert_eq!(buffer.len(), source.byte_length());

        let mut target = Health::construct(ObjectId::new(2), &HealthStat::new(7)).unwrap();
        target.network_unserialize(&mut buffer).unwrap();
        prop_assert_eq!(target.max_health(), max);
        prop_assert_eq!(target.health(), health);
        prop_assert!(buffer.is_exhausted());
    }

    /// Position keeps each coordinate bit for bit
    #[test]
    fn prop_position_round_trip(x in finite(), y in finite(), z in finite()) {
        let source = Position::construct(ObjectId::new(1), &PositionStat::new(x, y, z)).unwrap();

        let mut buffer = ByteBuffer::new();
        source.network_serialize(&mut buffer);

        let mut target = Position::construct(ObjectId::new(2), &PositionStat::default()).unwrap();
        target.network_unserialize(&mut buffer).unwrap();
        prop_assert_eq!(target.x().to_bits(), x.to_bits());
        prop_assert_eq!(target.y().to_bits(), y.to_bits());
        prop_assert_eq!(target.z().to_bits(), z.to_bits());
    }

    /// Lifespan keeps the remaining time
    #[test]
    fn prop_lifespan_round_trip(seconds in 0.001f32..1.0e6) {
        let source = Lifespan::construct(ObjectId::new(1), &LifespanStat::new(seconds)).unwrap();

        let mut buffer = ByteBuffer::new();
        source.network_serialize(&mut buffer);

        let mut target = Lifespan::construct(ObjectId::new(2), &LifespanStat::default()).unwrap();
        target.network_unserialize(&mut buffer).unwrap();
        prop_assert_eq!(target.remaining(), seconds);
    }

    /// Reading a component from any strict prefix of its payload fails
    /// and leaves the component as it was
    #[test]
    fn prop_short_payload_is_rejected((max, health) in health_strategy(), cut in 0usize..8) {
        let stat = HealthStat::new(max).with_initial_health(health);
        let mut buffer = ByteBuffer::new();
        Health::construct(ObjectId::new(1), &stat).unwrap().network_serialize(&mut buffer);
        let mut short = ByteBuffer::from_slice(&buffer.as_bytes()[..cut]);

        let mut target = Component::blank(ComponentKind::Health, ObjectId::new(2)).unwrap();
        let before = target.clone();
        let error = target.network_unserialize(&mut short).unwrap_err();
        prop_assert!(error.is_bounds());
        prop_assert_eq!(target, before);
    }

    /// A whole Object survives serialize all then unserialize all
    #[test]
    fn prop_object_round_trip((max, health) in health_strategy(), x in finite(), seconds in 0.001f32..100.0) {
        let template = ObjectTemplate::new(TemplateId::new(1), "any")
            .with_stat(HealthStat::new(max))
            .with_stat(PositionStat::default())
            .with_stat(LifespanStat::new(1.0));
        let mut source = Object::from_template(ObjectId::new(1), &template).unwrap();
        source.get_mut::<Health>().unwrap().set_health(health);
        source.get_mut::<Position>().unwrap().set(x, 0.0, 0.0);
        source.insert(Lifespan::construct(ObjectId::new(1), &LifespanStat::new(seconds)).unwrap());

        let mut buffer = ByteBuffer::new();
        source.network_serialize_all(&mut buffer);

        let mut target = Object::from_template(ObjectId::new(1), &template).unwrap();
        target.network_unserialize_all(&mut buffer).unwrap();
        prop_assert_eq!(target.get::<Health>(), source.get::<Health>());
        prop_assert_eq!(target.get::<Position>().unwrap().x().to_bits(), x.to_bits());
        prop_assert_eq!(target.get::<Lifespan>().unwrap().remaining(), seconds);
    }
}
