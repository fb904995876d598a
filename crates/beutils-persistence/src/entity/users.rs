//! `SeaORM` Entity for the users table
//!
//! Users carry normalized emails, person names, optional Telegram
//! credentials, and the five nullable location references. The hook
//! normalizes the email, strips the name fields, and synchronizes the
//! ancestor keys from the deepest provided location level.

use beutils_common::slugify;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::location_sync::{LocationRefs, sync_ancestors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub has_eastern_name: bool,
    pub email_verified: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    #[sea_orm(unique, nullable)]
    pub telegram_user_id: Option<i64>,
    #[sea_orm(unique, nullable)]
    pub telegram_chat_id: Option<i64>,
    pub region_id: Option<i64>,
    pub subregion_id: Option<i64>,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub city_id: Option<i64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::region::Entity",
        from = "Column::RegionId",
        to = "super::region::Column::Id"
    )]
    Region,
    #[sea_orm(
        belongs_to = "super::subregion::Entity",
        from = "Column::SubregionId",
        to = "super::subregion::Column::Id"
    )]
    Subregion,
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id"
    )]
    Country,
    #[sea_orm(
        belongs_to = "super::state::Entity",
        from = "Column::StateId",
        to = "super::state::Column::Id"
    )]
    State,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id"
    )]
    City,
}

impl Model {
    /// Display name assembled from the person name fields
    pub fn full_name(&self) -> String {
        crate::naming::full_name(
            &self.first_name,
            &self.middle_name,
            &self.last_name,
            self.has_eastern_name,
        )
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        // Emails are lookup keys: transliterated, lowercased, trimmed
        if let Some(email) = super::value_of(&self.email) {
            self.email = Set(slugify(email));
        }

        // Strip person names
        if let Some(first_name) = super::value_of(&self.first_name) {
            self.first_name = Set(first_name.trim().to_string());
        }
        if let Some(middle_name) = super::value_of(&self.middle_name) {
            self.middle_name = Set(middle_name.trim().to_string());
        }
        if let Some(last_name) = super::value_of(&self.last_name) {
            self.last_name = Set(last_name.trim().to_string());
        }

        // Synchronize location ancestors from the deepest provided level
        if self.city_id.is_set()
            || self.state_id.is_set()
            || self.country_id.is_set()
            || self.subregion_id.is_set()
        {
            let mut refs = LocationRefs {
                region_id: super::value_of(&self.region_id).copied().flatten(),
                subregion_id: super::value_of(&self.subregion_id).copied().flatten(),
                country_id: super::value_of(&self.country_id).copied().flatten(),
                state_id: super::value_of(&self.state_id).copied().flatten(),
                city_id: super::value_of(&self.city_id).copied().flatten(),
            };
            sync_ancestors(db, &mut refs).await?;
            self.region_id = Set(refs.region_id);
            self.subregion_id = Set(refs.subregion_id);
            self.country_id = Set(refs.country_id);
            self.state_id = Set(refs.state_id);
        }

        super::stamp(&mut self.created_at, &mut self.updated_at, insert);
        Ok(self)
    }
}
