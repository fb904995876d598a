//! `SeaORM` Entity for the currencies table
//!
//! Fiat currencies may reference an issuing country; crypto currencies do
//! not. The hook rejects empty required fields and normalizes the code.

use beutils_common::slugify;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum CurrencyKind {
    #[sea_orm(string_value = "crypto")]
    Crypto,
    #[sea_orm(string_value = "fiat")]
    Fiat,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "currencies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub name_plural: String,
    #[sea_orm(unique)]
    pub code: String,
    #[sea_orm(unique, nullable)]
    pub number: Option<i32>,
    pub symbol: String,
    pub symbol_native: String,
    pub kind: CurrencyKind,
    pub country_id: Option<i64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::country::Entity",
        from = "Column::CountryId",
        to = "super::country::Column::Id"
    )]
    Country,
}

impl Related<super::country::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Country.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        // Required fields may not be empty
        if super::value_of(&self.name).is_some_and(|name| name.is_empty()) {
            return Err(DbErr::Custom("Name cannot be an empty string".to_string()));
        }
        if super::value_of(&self.code).is_some_and(|code| code.is_empty()) {
            return Err(DbErr::Custom("Code cannot be an empty string".to_string()));
        }
        if super::value_of(&self.number).is_some_and(|number| matches!(number, Some(0))) {
            return Err(DbErr::Custom(
                "Number cannot be an empty string".to_string(),
            ));
        }

        if let Some(name) = super::value_of(&self.name) {
            self.slug = Set(slugify(name));
        }
        if let Some(code) = super::value_of(&self.code) {
            self.code = Set(code.trim().to_uppercase());
        }

        super::stamp(&mut self.created_at, &mut self.updated_at, insert);
        Ok(self)
    }
}
