//! beutils Persistence - database entities and lifecycle hooks
//!
//! This crate provides:
//! - SeaORM entity definitions for the location hierarchy, currencies,
//!   users, and API tokens
//! - Save-time derivation in `ActiveModelBehavior` hooks (slugs, normalized
//!   emails, denormalized ancestor references, timestamps)
//! - `location_sync`: explicit ancestor derivation for any row carrying the
//!   five location foreign keys

pub mod entity;
pub mod location_sync;
pub mod naming;

// Re-export sea-orm for convenience
pub use sea_orm;

// Re-export entity prelude
pub use entity::prelude::*;

pub use location_sync::{LocationRefs, sync_ancestors};
pub use naming::full_name;
