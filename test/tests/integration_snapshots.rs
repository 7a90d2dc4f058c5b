/// Integration tests for full-state resends: snapshot requests, recovery of
/// missed spawns and late joiners

use facet_client::{RejectedEvent, SnapshotEvent, SpawnEvent};
use facet_shared::{Health, Position, SyncMessage};
use facet_test::{
    assert_objects_match, exchange_packets, test_client, test_server, tick_and_exchange, CRATE,
    SOLDIER,
};

#[test]
fn requested_snapshot_returns_full_state() {
    let mut server = test_server();
    let mut client = test_client();
    let id = server.spawn(SOLDIER).unwrap();
    tick_and_exchange(&mut server, &mut [&mut client], 0.016);

    let request = client.request_snapshot(Some(id)).unwrap();
    server.receive(request).unwrap();

    let packets = server.collect_outgoing().unwrap();
    assert_eq!(packets.len(), 1);
    let messages: Vec<SyncMessage> = facet_shared::PacketReader::new(
        packets[0].clone(),
        server.config().sync.protocol_version,
    )
    .unwrap()
    .map(Result::unwrap)
    .collect();
    assert!(matches!(&messages[..], [SyncMessage::Snapshot(record)] if record.object == id));

    client.receive(packets[0].clone()).unwrap();
    let mut events = client.tick(0.016);
    assert_eq!(events.read::<SnapshotEvent>().collect::<Vec<_>>(), vec![id]);
    assert_objects_match(server.objects(), client.objects());
}

#[test]
fn request_for_everything_snapshots_every_object() {
    let mut server = test_server();
    let mut client = test_client();
    let ids = [
        server.spawn(SOLDIER).unwrap(),
        server.spawn(CRATE).unwrap(),
    ];
    tick_and_exchange(&mut server, &mut [&mut client], 0.016);

    server.receive(client.request_snapshot(None).unwrap()).unwrap();
    let mut events = tick_and_exchange(&mut server, &mut [&mut client], 0.016);

    assert_eq!(events[0].read::<SnapshotEvent>().collect::<Vec<_>>(), ids.to_vec());
}

#[test]
fn missed_spawn_is_recovered_through_a_snapshot() {
    let mut server = test_server();
    let mut client = test_client();
    let id = server.spawn(SOLDIER).unwrap();

    // the spawn packet is lost
    server.tick(0.016);
    server.collect_outgoing().unwrap();

    server
        .object_mut(id)
        .unwrap()
        .get_mut::<Health>()
        .unwrap()
        .apply_damage(10);
    let mut events = tick_and_exchange(&mut server, &mut [&mut client], 0.016);
    assert!(events[0].has::<RejectedEvent>());
    assert!(client.object(id).is_none());

    // one round carries the request to the server, the next brings the
    // snapshot back
    tick_and_exchange(&mut server, &mut [&mut client], 0.016);
    let mut events = tick_and_exchange(&mut server, &mut [&mut client], 0.016);
    assert_eq!(events[0].read::<SpawnEvent>().collect::<Vec<_>>(), vec![id]);
    assert_eq!(client.object(id).unwrap().get::<Health>().unwrap().health(), 90);
    assert_objects_match(server.objects(), client.objects());
}

#[test]
fn late_joiner_catches_up_from_snapshot_all() {
    let mut server = test_server();
    let mut early = test_client();
    let first = server.spawn(SOLDIER).unwrap();
    server.spawn(CRATE).unwrap();
    tick_and_exchange(&mut server, &mut [&mut early], 0.016);

    server
        .object_mut(first)
        .unwrap()
        .get_mut::<Position>()
        .unwrap()
        .set(4.0, 5.0, 6.0);
    tick_and_exchange(&mut server, &mut [&mut early], 0.016);

    let mut late = test_client();
    for packet in server.snapshot_all().unwrap() {
        late.receive(packet).unwrap();
    }
    let mut events = late.tick(0.016);
    assert_eq!(events.read::<SpawnEvent>().count(), 2);
    assert_objects_match(server.objects(), late.objects());

    // both keep following later changes
    server
        .object_mut(first)
        .unwrap()
        .get_mut::<Health>()
        .unwrap()
        .apply_damage(5);
    server.tick(0.016);
    exchange_packets(&mut server, &mut [&mut early, &mut late]);
    early.tick(0.016);
    late.tick(0.016);
    assert_objects_match(server.objects(), early.objects());
    assert_objects_match(server.objects(), late.objects());
}

#[test]
fn late_joiner_gets_queued_spawns_once() {
    let mut server = test_server();
    let mut early = test_client();
    let first = server.spawn(SOLDIER).unwrap();
    tick_and_exchange(&mut server, &mut [&mut early], 0.016);

    let queued = server.spawn(CRATE).unwrap();

    let mut late = test_client();
    for packet in server.snapshot_all().unwrap() {
        late.receive(packet).unwrap();
    }
    let mut events = late.tick(0.016);
    assert_eq!(events.read::<SpawnEvent>().collect::<Vec<_>>(), vec![first]);

    let mut events = tick_and_exchange(&mut server, &mut [&mut early, &mut late], 0.016);
    for client_events in events.iter_mut() {
        assert!(!client_events.has::<RejectedEvent>());
        assert_eq!(client_events.read::<SpawnEvent>().collect::<Vec<_>>(), vec![queued]);
    }
    assert_objects_match(server.objects(), early.objects());
    assert_objects_match(server.objects(), late.objects());
}
