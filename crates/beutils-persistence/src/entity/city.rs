//! `SeaORM` Entity for the cities table

use beutils_common::slugify;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "cities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub region_id: i64,
    pub subregion_id: i64,
    pub country_id: i64,
    pub state_id: i64,
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
}

impl Related<super::state::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::State.def()
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

        // Synchronize the denormalized ancestor references. The state row
        // already carries its own ancestors, so one lookup is enough.
        if let Some(state_id) = super::value_of(&self.state_id).copied() {
            let state = super::state::Entity::find_by_id(state_id)
                .one(db)
                .await?
                .ok_or_else(|| DbErr::Custom(format!("state {state_id} does not exist")))?;
            self.region_id = Set(state.region_id);
            self.subregion_id = Set(state.subregion_id);
            self.country_id = Set(state.country_id);
        }

        super::stamp(&mut self.created_at, &mut self.updated_at, insert);
        Ok(self)
    }
}
