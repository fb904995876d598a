//! Generic HTTP request adapter for beutils integrations

pub mod http;

pub use http::{Adapter, AdapterConfig, RestAdapter};
