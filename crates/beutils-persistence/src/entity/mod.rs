//! SeaORM entities for beutils
//!
//! Save-time derivation (slugs, normalized emails, denormalized ancestor
//! references, timestamps) lives in each entity's `ActiveModelBehavior`.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, Value};

pub mod prelude;

pub mod auth_token;
pub mod city;
pub mod country;
pub mod currency;
pub mod region;
pub mod state;
pub mod subregion;
pub mod users;

/// Current value of an active field, set or unchanged
pub(crate) fn value_of<V>(value: &ActiveValue<V>) -> Option<&V>
where
    V: Into<Value>,
{
    match value {
        ActiveValue::Set(v) | ActiveValue::Unchanged(v) => Some(v),
        ActiveValue::NotSet => None,
    }
}

/// Maintain `created_at` / `updated_at` on save
pub(crate) fn stamp(
    created_at: &mut ActiveValue<DateTime<Utc>>,
    updated_at: &mut ActiveValue<DateTime<Utc>>,
    insert: bool,
) {
    let now = Utc::now();
    if insert {
        *created_at = ActiveValue::Set(now);
    }
    *updated_at = ActiveValue::Set(now);
}
