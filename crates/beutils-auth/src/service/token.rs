//! Opaque API token service
//!
//! Tokens are 20 random bytes hex-encoded to a 40-character key, stored one
//! per user. The key itself is the credential; there is nothing to decode.

use chrono::Utc;
use rand::RngCore;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use beutils_persistence::entity::{auth_token, users};

use crate::model::AuthContext;

/// Generate a fresh 40-character hex token key
pub fn generate_key() -> String {
    let mut bytes = [0u8; 20];
    rand::rng().fill_bytes(&mut bytes);
    const_hex::encode(bytes)
}

/// Return the user's token key, creating one on first use
pub async fn obtain_or_create<C>(db: &C, user_id: i64) -> anyhow::Result<String>
where
    C: ConnectionTrait,
{
    if let Some(token) = auth_token::Entity::find()
        .filter(auth_token::Column::UserId.eq(user_id))
        .one(db)
        .await?
    {
        return Ok(token.key);
    }

    let token = auth_token::ActiveModel {
        key: Set(generate_key()),
        user_id: Set(user_id),
        created_at: Set(Utc::now()),
    }
    .insert(db)
    .await?;

    Ok(token.key)
}

/// Resolve a token key to its user's auth context
pub async fn authenticate_token<C>(db: &C, key: &str) -> anyhow::Result<Option<AuthContext>>
where
    C: ConnectionTrait,
{
    let Some((_, Some(user))) = auth_token::Entity::find_by_id(key)
        .find_also_related(users::Entity)
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    Ok(Some(AuthContext {
        user_id: user.id,
        email: user.email,
        is_staff: user.is_staff,
        is_superuser: user.is_superuser,
    }))
}
