//! HTTP API surface for beutils
//!
//! Actix handlers, routing, and the two request-cycle middlewares:
//! Content-Case negotiation and token authentication.

pub mod middleware;
pub mod model;
pub mod state;
pub mod v1;

pub use model::ApiResult;
pub use state::AppState;
