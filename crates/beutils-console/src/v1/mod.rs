//! Console API v1

pub mod auth;
pub mod currency;
pub mod health;
pub mod location;
pub mod route;
pub mod telegram;
pub mod user;

pub use route::routes;
