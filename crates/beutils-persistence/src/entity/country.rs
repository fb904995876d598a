//! `SeaORM` Entity for the countries table
//!
//! Countries belong to a subregion and denormalize the region reference;
//! the hook keeps the ancestor key in sync with the subregion.

use beutils_common::slugify;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "countries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub emoji: String,
    pub emoji_u: String,
    pub iso2: String,
    pub iso3: String,
    pub region_id: i64,
    pub subregion_id: i64,
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
}

impl Related<super::region::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Region.def()
    }
}

impl Related<super::subregion::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subregion.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if let Some(name) = super::value_of(&self.name) {
            self.slug = Set(slugify(name));
        }

        // Synchronize the denormalized region reference
        if let Some(subregion_id) = super::value_of(&self.subregion_id).copied() {
            let subregion = super::subregion::Entity::find_by_id(subregion_id)
                .one(db)
                .await?
                .ok_or_else(|| DbErr::Custom(format!("subregion {subregion_id} does not exist")))?;
            self.region_id = Set(subregion.region_id);
        }

        super::stamp(&mut self.created_at, &mut self.updated_at, insert);
        Ok(self)
    }
}
