pub mod component;
pub mod component_kind;
pub mod error;
pub mod health;
pub mod lifespan;
pub mod position;
pub mod replicate;
