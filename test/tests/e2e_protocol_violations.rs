/// END-TO-END: Bad input from the wire
///
/// A message that cannot be applied is rejected on its own. Other messages
/// in the same packet, and every other Object, must be left alone.

use facet_client::{Client, DespawnEvent, RejectedEvent, UpdateEvent};
use facet_server::RejectedEvent as ServerRejectedEvent;
use facet_shared::{
    ByteBuffer, ComponentKind, Health, HostType, ObjectId, PacketHeader, PacketWriter, Serde,
    SyncConfig, SyncError, SyncMessage, SyncMessageType, PROTOCOL_VERSION,
};
use facet_test::{test_client, test_server, tick_and_exchange, SOLDIER};

fn synced_pair() -> (facet_server::Server, Client, ObjectId, ObjectId) {
    let mut server = test_server();
    let mut client = test_client();
    let first = server.spawn(SOLDIER).unwrap();
    let second = server.spawn(SOLDIER).unwrap();
    tick_and_exchange(&mut server, &mut [&mut client], 0.016);
    (server, client, first, second)
}

fn packet(client: &Client, config: &SyncConfig, messages: &[SyncMessage]) -> Vec<u8> {
    let mut writer = PacketWriter::new(config, client.server_tick().unwrap_or(0));
    for message in messages {
        writer.push(message).unwrap();
    }
    writer.finish().remove(0)
}

fn health_update(object: ObjectId, max_health: i32, health: i32) -> SyncMessage {
    let mut payload = ByteBuffer::new();
    payload.write(max_health);
    payload.write(health);
    SyncMessage::Update {
        object,
        kind: ComponentKind::Health,
        payload,
    }
}

fn health(client: &Client, object: ObjectId) -> i32 {
    client.object(object).unwrap().get::<Health>().unwrap().health()
}

#[test]
fn out_of_range_update_only_affects_its_message() {
    let (_server, mut client, first, second) = synced_pair();
    let bytes = packet(
        &client,
        &SyncConfig::default(),
        &[health_update(first, 100, 150), health_update(second, 100, 42)],
    );

    client.receive(bytes).unwrap();
    let mut events = client.tick(0.016);

    let rejected: Vec<SyncError> = events.read::<RejectedEvent>().collect();
    assert_eq!(rejected.len(), 1);
    assert_eq!(rejected[0].object(), Some(first));
    assert_eq!(
        events.read::<UpdateEvent>().collect::<Vec<_>>(),
        vec![(second, ComponentKind::Health)]
    );
    assert_eq!(health(&client, first), 100);
    assert_eq!(health(&client, second), 42);
}

#[test]
fn truncated_update_is_a_bounds_error() {
    let (_server, mut client, first, _) = synced_pair();
    let update = SyncMessage::Update {
        object: first,
        kind: ComponentKind::Health,
        payload: ByteBuffer::from_slice(&[100, 0]),
    };
    client
        .receive(packet(&client, &SyncConfig::default(), &[update]))
        .unwrap();

    let mut events = client.tick(0.016);
    let rejected: Vec<SyncError> = events.read::<RejectedEvent>().collect();
    assert_eq!(rejected.len(), 1);
    assert!(rejected[0].is_bounds());
    assert_eq!(health(&client, first), 100);
}

#[test]
fn oversized_update_is_refused_before_writing() {
    let (_server, mut client, first, _) = synced_pair();
    let mut update = health_update(first, 100, 7);
    if let SyncMessage::Update { payload, .. } = &mut update {
        payload.write(0u8);
    }
    client
        .receive(packet(&client, &SyncConfig::default(), &[update]))
        .unwrap();

    let mut events = client.tick(0.016);
    assert_eq!(
        events.read::<RejectedEvent>().collect::<Vec<_>>(),
        vec![SyncError::TrailingBytes {
            message_type: SyncMessageType::Update,
            remaining: 1,
        }]
    );
    assert_eq!(health(&client, first), 100);
}

#[test]
fn other_protocol_version_is_refused_whole() {
    let (_server, mut client, first, _) = synced_pair();
    let config = SyncConfig {
        protocol_version: PROTOCOL_VERSION + 1,
        ..SyncConfig::default()
    };
    client
        .receive(packet(&client, &config, &[SyncMessage::Despawn { object: first }]))
        .unwrap();

    let mut events = client.tick(0.016);
    assert_eq!(
        events.read::<RejectedEvent>().collect::<Vec<_>>(),
        vec![SyncError::VersionMismatch {
            expected: PROTOCOL_VERSION,
            received: PROTOCOL_VERSION + 1,
        }]
    );
    assert!(client.object(first).is_some());
}

#[test]
fn unknown_message_type_is_skipped() {
    let (_server, mut client, first, _) = synced_pair();

    let mut buffer = ByteBuffer::new();
    PacketHeader {
        protocol_version: PROTOCOL_VERSION,
        tick: client.server_tick().unwrap(),
        message_count: 2,
    }
    .ser(&mut buffer);
    buffer.write(9u8);
    buffer.write(0u16);
    SyncMessage::Despawn { object: first }
        .write(&mut buffer)
        .unwrap();
    client.receive(buffer.into_bytes()).unwrap();

    let mut events = client.tick(0.016);
    assert_eq!(
        events.read::<RejectedEvent>().collect::<Vec<_>>(),
        vec![SyncError::UnknownMessageType { value: 9 }]
    );
    assert_eq!(events.read::<DespawnEvent>().count(), 1);
    assert!(client.object(first).is_none());
}

#[test]
fn stale_update_is_dropped_but_stale_despawn_applies() {
    let (mut server, mut client, first, second) = synced_pair();
    server
        .object_mut(first)
        .unwrap()
        .get_mut::<Health>()
        .unwrap()
        .apply_damage(1);
    tick_and_exchange(&mut server, &mut [&mut client], 0.016);
    assert_eq!(client.server_tick(), Some(1));

    let mut writer = PacketWriter::new(&SyncConfig::default(), 0);
    writer.push(&health_update(first, 100, 5)).unwrap();
    writer.push(&SyncMessage::Despawn { object: second }).unwrap();
    client.receive(writer.finish().remove(0)).unwrap();

    let mut events = client.tick(0.016);
    assert!(!events.has::<UpdateEvent>());
    assert!(!events.has::<RejectedEvent>());
    assert_eq!(events.read::<DespawnEvent>().count(), 1);
    assert_eq!(client.object(first).unwrap().get::<Health>().unwrap().health(), 99);
    assert!(client.object(second).is_none());
    assert_eq!(client.server_tick(), Some(1));
}

#[test]
fn peers_refuse_messages_meant_for_the_other_side() {
    let (mut server, mut client, first, _) = synced_pair();

    client
        .receive(packet(
            &client,
            &SyncConfig::default(),
            &[SyncMessage::RequestSnapshot { object: None }],
        ))
        .unwrap();
    let mut events = client.tick(0.016);
    assert_eq!(
        events.read::<RejectedEvent>().collect::<Vec<_>>(),
        vec![SyncError::UnexpectedMessage {
            message_type: SyncMessageType::RequestSnapshot,
            receiver: HostType::Client,
        }]
    );

    server
        .receive(packet(
            &client,
            &SyncConfig::default(),
            &[SyncMessage::Despawn { object: first }],
        ))
        .unwrap();
    let mut server_events = server.tick(0.016);
    assert_eq!(
        server_events.read::<ServerRejectedEvent>().collect::<Vec<_>>(),
        vec![SyncError::UnexpectedMessage {
            message_type: SyncMessageType::Despawn,
            receiver: HostType::Server,
        }]
    );
    assert!(server.object(first).is_some());
}

#[test]
fn update_for_unknown_object_asks_for_a_snapshot() {
    let (mut server, mut client, _, _) = synced_pair();
    let ghost = ObjectId::new(77);
    client
        .receive(packet(
            &client,
            &SyncConfig::default(),
            &[health_update(ghost, 100, 1)],
        ))
        .unwrap();

    let mut events = client.tick(0.016);
    assert_eq!(
        events.read::<RejectedEvent>().collect::<Vec<_>>(),
        vec![SyncError::UnknownObject { object: ghost }]
    );

    let requests = client.collect_outgoing().unwrap();
    assert_eq!(requests.len(), 1);
    // the server does not know it either
    server.receive(requests[0].clone()).unwrap();
    let mut server_events = server.tick(0.016);
    assert_eq!(
        server_events.read::<ServerRejectedEvent>().collect::<Vec<_>>(),
        vec![SyncError::UnknownObject { object: ghost }]
    );
}
