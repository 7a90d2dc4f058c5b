pub mod error;
pub mod object_template;
pub mod stat_definition;
pub mod template_registry;
