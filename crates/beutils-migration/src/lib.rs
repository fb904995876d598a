//! Database migrations for beutils

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_location_tables;
mod m20240101_000002_create_currency_table;
mod m20240101_000003_create_user_tables;
mod m20240101_000004_seed_fiat_currencies;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_location_tables::Migration),
            Box::new(m20240101_000002_create_currency_table::Migration),
            Box::new(m20240101_000003_create_user_tables::Migration),
            Box::new(m20240101_000004_seed_fiat_currencies::Migration),
        ]
    }
}
