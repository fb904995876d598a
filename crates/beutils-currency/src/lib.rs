//! Currency services for beutils

pub mod service;

pub use service::{
    NewCurrency, bulk_create, bulk_delete, create, emoji, emoji_u, find_by_code, search_page,
};
