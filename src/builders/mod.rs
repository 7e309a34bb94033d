//! Builders to construct broker components from configuration.

pub mod broker_builder;

pub use broker_builder::build_broker;
