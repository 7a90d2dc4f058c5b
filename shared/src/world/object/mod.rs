pub mod error;
pub mod id_generator;
pub mod object;
pub mod object_record;
pub mod object_table;
