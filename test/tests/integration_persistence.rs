/// Integration tests for saving and loading the server's world

use facet_client::{DespawnEvent, SpawnEvent};
use facet_server::{FacetServerError, Server, ServerConfig};
use facet_shared::{
    write_chunk, ByteBuffer, ChunkTag, ComponentKind, Health, Lifespan, LifespanStat, ObjectId,
    PersistError, Position, Replicate, HEADER_TAG,
};
use facet_test::{
    assert_objects_match, test_client, test_registry, test_server, tick_and_exchange, CRATE,
    FLARE, SOLDIER,
};

fn populated_server() -> Server {
    let mut server = test_server();
    let soldier = server.spawn(SOLDIER).unwrap();
    let crate_id = server.spawn(CRATE).unwrap();
    server.spawn(FLARE).unwrap();

    let object = server.object_mut(soldier).unwrap();
    object.get_mut::<Health>().unwrap().apply_damage(25);
    object.get_mut::<Position>().unwrap().set(1.5, -2.0, 8.0);

    // layout no longer matches the template
    let lifespan = Lifespan::construct(crate_id, &LifespanStat::new(30.0)).unwrap();
    server.object_mut(crate_id).unwrap().insert(lifespan);
    server
}

#[test]
fn save_then_load_restores_every_object() {
    let server = populated_server();
    let bytes = server.save_world().unwrap();

    let mut restored = Server::new(ServerConfig::default(), test_registry());
    restored.load_world(&bytes).unwrap();

    assert_objects_match(server.objects(), restored.objects());
    assert_eq!(
        restored.object(ObjectId::new(1)).unwrap().kinds(),
        vec![ComponentKind::Health, ComponentKind::Lifespan]
    );
}

#[test]
fn loaded_objects_get_fresh_ids_afterwards() {
    let server = populated_server();
    let bytes = server.save_world().unwrap();

    let mut restored = test_server();
    restored.load_world(&bytes).unwrap();
    assert_eq!(restored.spawn(CRATE).unwrap(), ObjectId::new(3));
}

#[test]
fn load_replaces_what_clients_see() {
    let saved = populated_server().save_world().unwrap();

    let mut server = test_server();
    let mut client = test_client();
    let old = server.spawn(SOLDIER).unwrap();
    tick_and_exchange(&mut server, &mut [&mut client], 0.0);

    server.load_world(&saved).unwrap();
    let mut events = tick_and_exchange(&mut server, &mut [&mut client], 0.0);

    let despawned: Vec<_> = events[0].read::<DespawnEvent>().map(|(id, _)| id).collect();
    assert_eq!(despawned, vec![old]);
    assert_eq!(events[0].read::<SpawnEvent>().count(), 3);
    assert_objects_match(server.objects(), client.objects());
}

#[test]
fn unknown_chunks_are_ignored() {
    let server = populated_server();
    let mut buffer = ByteBuffer::from_bytes(server.save_world().unwrap());
    write_chunk(&mut buffer, ChunkTag::new(*b"NOTE"), b"saved by a newer build").unwrap();

    let mut restored = test_server();
    restored.load_world(buffer.as_bytes()).unwrap();
    assert_objects_match(server.objects(), restored.objects());
}

#[test]
fn failed_load_keeps_the_current_world() {
    let mut server = populated_server();
    let before = server.save_world().unwrap();

    let mut header = ByteBuffer::new();
    header.write(99u16);
    header.write(0u32);
    let mut bad = ByteBuffer::new();
    write_chunk(&mut bad, HEADER_TAG, header.as_bytes()).unwrap();

    assert!(matches!(
        server.load_world(bad.as_bytes()),
        Err(FacetServerError::Persist(PersistError::UnsupportedVersion { version: 99, .. }))
    ));
    assert_eq!(server.save_world().unwrap(), before);
}
