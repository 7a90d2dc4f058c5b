/// Integration tests for spreading messages over several packets

use facet_client::{Client, ClientConfig, SpawnEvent};
use facet_server::{FacetServerError, Server, ServerConfig};
use facet_shared::{Health, PacketReader, SyncConfig, SyncError, SyncMessageType};
use facet_test::{assert_objects_match, test_registry, SOLDIER};

fn small_packets(max_packet_bytes: usize) -> SyncConfig {
    SyncConfig {
        max_packet_bytes,
        ..SyncConfig::default()
    }
}

#[test]
fn spawns_are_split_to_fit_the_limit() {
    // two soldier spawns (35 bytes each) plus the header
    let config = small_packets(100);
    let mut server = Server::new(
        ServerConfig {
            sync: config.clone(),
            ..ServerConfig::default()
        },
        test_registry(),
    );
    let mut client = Client::new(
        ClientConfig {
            sync: config.clone(),
            ..ClientConfig::default()
        },
        test_registry(),
    );
    for _ in 0..10 {
        server.spawn(SOLDIER).unwrap();
    }

    let packets = server.collect_outgoing().unwrap();
    assert_eq!(packets.len(), 5);
    for packet in &packets {
        assert!(packet.len() <= config.max_packet_bytes);
        let reader = PacketReader::new(packet.clone(), config.protocol_version).unwrap();
        assert_eq!(reader.header().message_count, 2);
    }

    for packet in packets {
        client.receive(packet).unwrap();
    }
    let mut events = client.tick(0.016);
    assert_eq!(events.read::<SpawnEvent>().count(), 10);
    assert_objects_match(server.objects(), client.objects());
}

#[test]
fn updates_share_packets_in_object_order() {
    let mut server = Server::new(ServerConfig::default(), test_registry());
    let ids: Vec<_> = (0..3).map(|_| server.spawn(SOLDIER).unwrap()).collect();
    server.collect_outgoing().unwrap();

    for id in ids.iter().rev() {
        server
            .object_mut(*id)
            .unwrap()
            .get_mut::<Health>()
            .unwrap()
            .apply_damage(1);
    }
    let packets = server.collect_outgoing().unwrap();
    assert_eq!(packets.len(), 1);

    let objects: Vec<_> = PacketReader::new(packets[0].clone(), server.config().sync.protocol_version)
        .unwrap()
        .map(|message| message.unwrap().object().unwrap())
        .collect();
    assert_eq!(objects, ids);
}

#[test]
fn message_larger_than_a_packet_is_an_error() {
    let mut server = Server::new(
        ServerConfig {
            sync: small_packets(20),
            ..ServerConfig::default()
        },
        test_registry(),
    );
    server.spawn(SOLDIER).unwrap();

    assert_eq!(
        server.collect_outgoing(),
        Err(FacetServerError::Sync(SyncError::MessageTooLarge {
            message_type: SyncMessageType::Spawn,
            size: 35,
            max: 20,
        }))
    );
}
