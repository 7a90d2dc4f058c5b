pub mod assertions;

pub use assertions::assert_objects_match;
pub use packet_exchange::{exchange_packets, exchange_packets_n_times, tick_and_exchange};
pub use test_client::test_client;
pub use test_server::test_server;

/// Routes `log` output through env_logger once per test binary
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
