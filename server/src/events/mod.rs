mod tick_events;

pub use tick_events::*;
