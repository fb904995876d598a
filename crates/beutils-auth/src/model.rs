//! Auth models

use serde::{Deserialize, Serialize};

/// Input payload for creating a user
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub has_eastern_name: bool,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
    pub telegram_user_id: Option<i64>,
    pub telegram_chat_id: Option<i64>,
    pub region_id: Option<i64>,
    pub subregion_id: Option<i64>,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub city_id: Option<i64>,
}

/// Token obtain response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenResult {
    pub token: String,
}

/// Authenticated request context resolved from a token
#[derive(Clone, Debug, Default)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}
