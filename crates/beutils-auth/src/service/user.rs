//! User service

use beutils_common::{BeutilsError, slugify};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

use beutils_persistence::entity::users;

use crate::model::NewUser;

/// Create and save a regular user with a given email and password
pub async fn create_user<C>(db: &C, new_user: NewUser) -> anyhow::Result<users::Model>
where
    C: ConnectionTrait,
{
    let mut new_user = new_user;
    new_user.is_staff = Some(new_user.is_staff.unwrap_or(false));
    new_user.is_superuser = Some(new_user.is_superuser.unwrap_or(false));
    save_user(db, new_user).await
}

/// Create and save a superuser with the given email and password
pub async fn create_superuser<C>(db: &C, new_user: NewUser) -> anyhow::Result<users::Model>
where
    C: ConnectionTrait,
{
    if new_user.is_staff == Some(false) {
        return Err(BeutilsError::validation("Superuser must have is_staff=True.").into());
    }
    if new_user.is_superuser == Some(false) {
        return Err(BeutilsError::validation("Superuser must have is_superuser=True").into());
    }

    let mut new_user = new_user;
    new_user.is_staff = Some(true);
    new_user.is_superuser = Some(true);
    save_user(db, new_user).await
}

async fn save_user<C>(db: &C, new_user: NewUser) -> anyhow::Result<users::Model>
where
    C: ConnectionTrait,
{
    if new_user.email.trim().is_empty() {
        return Err(BeutilsError::validation("An email address is required").into());
    }

    let password_hash = bcrypt::hash(&new_user.password, bcrypt::DEFAULT_COST)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;

    let user = users::ActiveModel {
        email: Set(new_user.email),
        password: Set(password_hash),
        first_name: Set(new_user.first_name),
        middle_name: Set(new_user.middle_name),
        last_name: Set(new_user.last_name),
        has_eastern_name: Set(new_user.has_eastern_name),
        email_verified: Set(false),
        is_staff: Set(new_user.is_staff.unwrap_or(false)),
        is_superuser: Set(new_user.is_superuser.unwrap_or(false)),
        telegram_user_id: Set(new_user.telegram_user_id),
        telegram_chat_id: Set(new_user.telegram_chat_id),
        region_id: Set(new_user.region_id),
        subregion_id: Set(new_user.subregion_id),
        country_id: Set(new_user.country_id),
        state_id: Set(new_user.state_id),
        city_id: Set(new_user.city_id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(user)
}

/// Find a user by email, case-insensitively.
///
/// Emails are stored normalized, so normalizing the lookup key is enough.
pub async fn find_by_email<C>(db: &C, email: &str) -> anyhow::Result<Option<users::Model>>
where
    C: ConnectionTrait,
{
    let user = users::Entity::find()
        .filter(users::Column::Email.eq(slugify(email)))
        .one(db)
        .await?;
    Ok(user)
}

/// Verify a user's credentials, returning the user on success
pub async fn authenticate<C>(
    db: &C,
    email: &str,
    password: &str,
) -> anyhow::Result<Option<users::Model>>
where
    C: ConnectionTrait,
{
    let Some(user) = find_by_email(db, email).await? else {
        return Ok(None);
    };

    let verified = bcrypt::verify(password, &user.password)
        .map_err(|e| anyhow::anyhow!("Failed to verify password: {}", e))?;

    Ok(verified.then_some(user))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    fn stored_user(email: &str, password_hash: &str) -> users::Model {
        users::Model {
            id: 1,
            email: email.to_string(),
            password: password_hash.to_string(),
            first_name: "Ada".to_string(),
            middle_name: String::new(),
            last_name: "Lovelace".to_string(),
            has_eastern_name: false,
            email_verified: true,
            is_staff: false,
            is_superuser: false,
            telegram_user_id: None,
            telegram_chat_id: None,
            region_id: None,
            subregion_id: None,
            country_id: None,
            state_id: None,
            city_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_user_requires_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = create_user(&db, NewUser::default()).await.unwrap_err();
        assert!(err.to_string().contains("An email address is required"));
    }

    #[tokio::test]
    async fn test_create_superuser_rejects_explicit_non_staff() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let new_user = NewUser {
            email: "root@example.com".to_string(),
            password: "secret".to_string(),
            is_staff: Some(false),
            ..Default::default()
        };
        let err = create_superuser(&db, new_user).await.unwrap_err();
        assert!(err.to_string().contains("Superuser must have is_staff=True."));
    }

    #[tokio::test]
    async fn test_create_superuser_rejects_explicit_non_superuser() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let new_user = NewUser {
            email: "root@example.com".to_string(),
            password: "secret".to_string(),
            is_superuser: Some(false),
            ..Default::default()
        };
        let err = create_superuser(&db, new_user).await.unwrap_err();
        assert!(
            err.to_string()
                .contains("Superuser must have is_superuser=True")
        );
    }

    #[tokio::test]
    async fn test_authenticate_rejects_wrong_password() {
        let hash = bcrypt::hash("right-password", 4).expect("hash");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_user("ada@example.com", &hash)]])
            .into_connection();

        let user = authenticate(&db, "ada@example.com", "wrong-password")
            .await
            .expect("authenticate");
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_authenticate_accepts_correct_password() {
        let hash = bcrypt::hash("right-password", 4).expect("hash");
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![stored_user("ada@example.com", &hash)]])
            .into_connection();

        let user = authenticate(&db, "Ada@Example.com", "right-password")
            .await
            .expect("authenticate");
        assert_eq!(user.expect("user").email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let user = authenticate(&db, "ghost@example.com", "whatever")
            .await
            .expect("authenticate");
        assert!(user.is_none());
    }
}
