//! Seed fiat currencies
//!
//! Creates the common fiat currencies, linked to their issuing country by
//! ISO3 code when that country exists. The euro is supranational and stays
//! countryless.

use std::collections::HashMap;

use beutils_common::slugify;
use beutils_persistence::entity::{country, currency};
use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use sea_orm_migration::prelude::*;

/// name, plural name, code, ISO 4217 number, symbol, native symbol, country ISO3
type FiatSeed = (
    &'static str,
    &'static str,
    &'static str,
    i32,
    &'static str,
    &'static str,
    Option<&'static str>,
);

const FIAT_CURRENCIES: &[FiatSeed] = &[
    ("US Dollar", "US dollars", "USD", 840, "$", "$", Some("USA")),
    ("Euro", "Euros", "EUR", 978, "€", "€", None),
    ("British Pound", "British pounds", "GBP", 826, "£", "£", Some("GBR")),
    ("Japanese Yen", "Japanese yen", "JPY", 392, "¥", "￥", Some("JPN")),
    ("Chinese Yuan", "Chinese yuan", "CNY", 156, "CN¥", "￥", Some("CHN")),
    ("Swiss Franc", "Swiss francs", "CHF", 756, "CHF", "CHF", Some("CHE")),
    ("Canadian Dollar", "Canadian dollars", "CAD", 124, "CA$", "$", Some("CAN")),
    ("Australian Dollar", "Australian dollars", "AUD", 36, "AU$", "$", Some("AUS")),
    ("New Zealand Dollar", "New Zealand dollars", "NZD", 554, "NZ$", "$", Some("NZL")),
    ("Swedish Krona", "Swedish kronor", "SEK", 752, "kr", "kr", Some("SWE")),
    ("Norwegian Krone", "Norwegian kroner", "NOK", 578, "kr", "kr", Some("NOR")),
    ("Danish Krone", "Danish kroner", "DKK", 208, "kr", "kr", Some("DNK")),
    ("Indian Rupee", "Indian rupees", "INR", 356, "₹", "₹", Some("IND")),
    ("Brazilian Real", "Brazilian reals", "BRL", 986, "R$", "R$", Some("BRA")),
    ("Mexican Peso", "Mexican pesos", "MXN", 484, "MX$", "$", Some("MEX")),
    ("South African Rand", "South African rand", "ZAR", 710, "R", "R", Some("ZAF")),
    ("South Korean Won", "South Korean won", "KRW", 410, "₩", "₩", Some("KOR")),
    ("Singapore Dollar", "Singapore dollars", "SGD", 702, "SGD", "$", Some("SGP")),
    ("Hong Kong Dollar", "Hong Kong dollars", "HKD", 344, "HK$", "$", Some("HKG")),
    ("Russian Ruble", "Russian rubles", "RUB", 643, "₽", "₽", Some("RUS")),
    ("Turkish Lira", "Turkish lira", "TRY", 949, "₺", "₺", Some("TUR")),
    ("Polish Zloty", "Polish zlotys", "PLN", 985, "zł", "zł", Some("POL")),
    ("Thai Baht", "Thai baht", "THB", 764, "฿", "฿", Some("THA")),
    ("UAE Dirham", "UAE dirhams", "AED", 784, "AED", "د.إ.‏", Some("ARE")),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // Resolve issuing countries by ISO3
        let countries: HashMap<String, i64> = country::Entity::find()
            .all(db)
            .await?
            .into_iter()
            .filter(|c| !c.iso3.is_empty())
            .map(|c| (c.iso3.clone(), c.id))
            .collect();

        let mut seeds: Vec<&FiatSeed> = FIAT_CURRENCIES.iter().collect();
        seeds.sort_by_key(|(name, ..)| slugify(name));

        let now = Utc::now();
        let models: Vec<currency::ActiveModel> = seeds
            .into_iter()
            .map(
                |&(name, name_plural, code, number, symbol, symbol_native, iso3)| {
                    currency::ActiveModel {
                        name: Set(name.to_string()),
                        slug: Set(slugify(name)),
                        name_plural: Set(name_plural.to_string()),
                        code: Set(code.to_string()),
                        number: Set(Some(number)),
                        symbol: Set(symbol.to_string()),
                        symbol_native: Set(symbol_native.to_string()),
                        kind: Set(currency::CurrencyKind::Fiat),
                        country_id: Set(iso3.and_then(|iso3| countries.get(iso3).copied())),
                        created_at: Set(now),
                        updated_at: Set(now),
                        ..Default::default()
                    }
                },
            )
            .collect();

        currency::Entity::insert_many(models).exec(db).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        let codes: Vec<&str> = FIAT_CURRENCIES.iter().map(|(_, _, code, ..)| *code).collect();
        currency::Entity::delete_many()
            .filter(currency::Column::Code.is_in(codes))
            .exec(db)
            .await?;

        Ok(())
    }
}
