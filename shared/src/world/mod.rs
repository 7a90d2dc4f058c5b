pub mod component;
pub mod object;
pub mod stat;
