//! Location hierarchy services for beutils
//!
//! This crate provides:
//! - `variant`: the five presentation variants of the human-readable
//!   location string, as pure component-list computations
//! - `annotate`: a query-expression builder adding a `location` string
//!   column to any select over an entity carrying the location foreign keys
//! - `service`: ancestor derivation and per-level listing services

pub mod annotate;
pub mod service;
pub mod variant;

pub use annotate::{AnnotateOptions, LOCATION_COLUMN, LocationRelated, annotate_location};
pub use service::{LocationSets, list_all};
pub use variant::{Level, LocationVariant, Segment, VariantPlan};

// Ancestor derivation for host rows lives next to the entities
pub use beutils_persistence::{LocationRefs, sync_ancestors};
