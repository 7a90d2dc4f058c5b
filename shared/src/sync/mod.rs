pub mod config;
pub mod error;
pub mod message;
pub mod message_type;
pub mod packet;
pub mod packet_writer;
