mod server;
pub use server::Server;

mod server_config;
pub use server_config::ServerConfig;

mod outgoing_queue;
pub use outgoing_queue::OutgoingQueue;
