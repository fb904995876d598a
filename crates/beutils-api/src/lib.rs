//! Shared API models and constants for beutils
//!
//! This crate defines the pagination envelope, paging query parameters,
//! the Content-Case negotiation convention, and input validation limits
//! used across the HTTP surface.

pub mod model;
pub mod validation;

pub use model::{ContentCase, Page, PageQuery};
