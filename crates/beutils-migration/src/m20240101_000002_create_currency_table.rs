//! Create the currencies table
//!
//! The country reference is protected: a country with currencies cannot be
//! deleted.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Currencies::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Currencies::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Currencies::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Currencies::Slug)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Currencies::NamePlural)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Currencies::Code)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Currencies::Number).integer().unique_key())
                    .col(ColumnDef::new(Currencies::Symbol).string_len(5).not_null())
                    .col(
                        ColumnDef::new(Currencies::SymbolNative)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Currencies::Kind).string_len(10).not_null())
                    .col(ColumnDef::new(Currencies::CountryId).big_integer())
                    .col(
                        ColumnDef::new(Currencies::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Currencies::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_currencies_country_id")
                            .from(Currencies::Table, Currencies::CountryId)
                            .to(Countries::Table, Countries::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Currencies::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Currencies {
    Table,
    Id,
    Name,
    Slug,
    NamePlural,
    Code,
    Number,
    Symbol,
    SymbolNative,
    Kind,
    CountryId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Countries {
    Table,
    Id,
}
