//! Currency service

use beutils_api::{Page, PageQuery};
use sea_orm::sea_query::{Asterisk, Condition, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Deserialize;

use beutils_persistence::entity::country;
use beutils_persistence::entity::currency::{self, CurrencyKind};

/// Input payload for creating a currency
#[derive(Clone, Debug, Deserialize)]
pub struct NewCurrency {
    pub name: String,
    pub name_plural: String,
    pub code: String,
    pub number: Option<i32>,
    pub symbol: String,
    pub symbol_native: String,
    pub kind: CurrencyKind,
    pub country_id: Option<i64>,
}

impl NewCurrency {
    fn into_active_model(self) -> currency::ActiveModel {
        currency::ActiveModel {
            name: Set(self.name),
            name_plural: Set(self.name_plural),
            code: Set(self.code),
            number: Set(self.number),
            symbol: Set(self.symbol),
            symbol_native: Set(self.symbol_native),
            kind: Set(self.kind),
            country_id: Set(self.country_id),
            ..Default::default()
        }
    }
}

/// Create a single currency; slug, code casing, and validation run in the
/// entity hook.
pub async fn create<C>(db: &C, new_currency: NewCurrency) -> anyhow::Result<currency::Model>
where
    C: ConnectionTrait,
{
    let model = new_currency.into_active_model().insert(db).await?;
    Ok(model)
}

/// Create a batch of currencies, returning the created rows in input order
pub async fn bulk_create<C>(
    db: &C,
    new_currencies: Vec<NewCurrency>,
) -> anyhow::Result<Vec<currency::Model>>
where
    C: ConnectionTrait,
{
    let mut created = Vec::with_capacity(new_currencies.len());
    for new_currency in new_currencies {
        created.push(new_currency.into_active_model().insert(db).await?);
    }
    Ok(created)
}

/// Delete currencies by id, returning the number of deleted rows
pub async fn bulk_delete<C>(db: &C, ids: &[i64]) -> anyhow::Result<u64>
where
    C: ConnectionTrait,
{
    if ids.is_empty() {
        return Ok(0);
    }
    let result = currency::Entity::delete_many()
        .filter(currency::Column::Id.is_in(ids.iter().copied()))
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}

/// One page of currencies, filtered by name or code
pub async fn search_page<C>(
    db: &C,
    search: &str,
    page: &PageQuery,
) -> anyhow::Result<Page<currency::Model>>
where
    C: ConnectionTrait,
{
    let mut select = currency::Entity::find();
    if !search.is_empty() {
        select = select.filter(
            Condition::any()
                .add(currency::Column::Name.contains(search))
                .add(currency::Column::Code.contains(&search.to_uppercase())),
        );
    }

    let total_count = select
        .clone()
        .select_only()
        .column_as(Expr::col(Asterisk).count(), "count")
        .into_tuple::<i64>()
        .one(db)
        .await?
        .unwrap_or_default() as u64;
    if total_count == 0 {
        return Ok(Page::empty());
    }

    let page_items = select
        .order_by_asc(currency::Column::Slug)
        .offset(page.offset())
        .limit(page.page_size())
        .all(db)
        .await?;

    Ok(Page::new(
        total_count,
        page.page(),
        page.page_size(),
        page_items,
    ))
}

/// Look a currency up by its code, case-insensitively
pub async fn find_by_code<C>(db: &C, code: &str) -> anyhow::Result<Option<currency::Model>>
where
    C: ConnectionTrait,
{
    let currency = currency::Entity::find()
        .filter(currency::Column::Code.eq(code.trim().to_uppercase()))
        .one(db)
        .await?;
    Ok(currency)
}

/// Emoji of a currency: the issuing country's flag for fiat currencies,
/// the EU flag for the euro, empty otherwise.
pub fn emoji(currency: &currency::Model, country: Option<&country::Model>) -> String {
    if currency.kind == CurrencyKind::Fiat {
        if let Some(country) = country
            && !country.emoji.is_empty()
        {
            return country.emoji.clone();
        }
        if currency.code == "EUR" {
            return "🇪🇺".to_string();
        }
    }
    String::new()
}

/// Unicode escape form of the currency emoji
pub fn emoji_u(currency: &currency::Model, country: Option<&country::Model>) -> String {
    if currency.kind == CurrencyKind::Fiat {
        if let Some(country) = country
            && !country.emoji_u.is_empty()
        {
            return country.emoji_u.clone();
        }
        if currency.code == "EUR" {
            return "U+1F1EA U+1F1FA".to_string();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    fn fiat(code: &str, country_id: Option<i64>) -> currency::Model {
        currency::Model {
            id: 1,
            name: code.to_string(),
            slug: code.to_lowercase(),
            name_plural: code.to_string(),
            code: code.to_string(),
            number: Some(1),
            symbol: "$".to_string(),
            symbol_native: "$".to_string(),
            kind: CurrencyKind::Fiat,
            country_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn united_states() -> country::Model {
        country::Model {
            id: 7,
            name: "United States".to_string(),
            slug: "united states".to_string(),
            emoji: "🇺🇸".to_string(),
            emoji_u: "U+1F1FA U+1F1F8".to_string(),
            iso2: "US".to_string(),
            iso3: "USA".to_string(),
            region_id: 1,
            subregion_id: 2,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_fiat_currency_uses_country_emoji() {
        let usd = fiat("USD", Some(7));
        let us = united_states();
        assert_eq!(emoji(&usd, Some(&us)), "🇺🇸");
        assert_eq!(emoji_u(&usd, Some(&us)), "U+1F1FA U+1F1F8");
    }

    #[test]
    fn test_euro_falls_back_to_eu_flag() {
        let eur = fiat("EUR", None);
        assert_eq!(emoji(&eur, None), "🇪🇺");
        assert_eq!(emoji_u(&eur, None), "U+1F1EA U+1F1FA");
    }

    #[test]
    fn test_countryless_fiat_has_no_emoji() {
        let xxx = fiat("XXX", None);
        assert_eq!(emoji(&xxx, None), "");
        assert_eq!(emoji_u(&xxx, None), "");
    }

    #[test]
    fn test_crypto_has_no_emoji() {
        let mut btc = fiat("BTC", Some(7));
        btc.kind = CurrencyKind::Crypto;
        assert_eq!(emoji(&btc, Some(&united_states())), "");
    }

    #[tokio::test]
    async fn test_create_rejects_empty_name() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = create(
            &db,
            NewCurrency {
                name: String::new(),
                name_plural: "None".to_string(),
                code: "XTS".to_string(),
                number: Some(963),
                symbol: "?".to_string(),
                symbol_native: "?".to_string(),
                kind: CurrencyKind::Fiat,
                country_id: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Name cannot be an empty string"));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_code() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let err = create(
            &db,
            NewCurrency {
                name: "Test Currency".to_string(),
                name_plural: "Test Currencies".to_string(),
                code: String::new(),
                number: Some(963),
                symbol: "?".to_string(),
                symbol_native: "?".to_string(),
                kind: CurrencyKind::Fiat,
                country_id: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("Code cannot be an empty string"));
    }

    #[tokio::test]
    async fn test_bulk_delete_with_no_ids_touches_nothing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let deleted = bulk_delete(&db, &[]).await.expect("bulk delete");
        assert_eq!(deleted, 0);
    }
}
