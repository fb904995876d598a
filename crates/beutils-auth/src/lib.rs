//! User management and API token service for beutils

pub mod model;
pub mod service;

pub use model::{AuthContext, NewUser, TokenResult};
