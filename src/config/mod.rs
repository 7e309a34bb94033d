//! Configuration models for the broker and its server.

pub mod broker;

pub use broker::BrokerConfig;
