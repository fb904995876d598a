//! Listing services for the location hierarchy

use beutils_api::{Page, PageQuery};
use sea_orm::sea_query::{Asterisk, Expr};
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};
use serde::Serialize;

use beutils_persistence::entity::{city, country, region, state, subregion};

/// All five levels of the hierarchy for one search term
#[derive(Clone, Debug, Serialize)]
pub struct LocationSets {
    pub regions: Page<region::Model>,
    pub subregions: Page<subregion::Model>,
    pub countries: Page<country::Model>,
    pub states: Page<state::Model>,
    pub cities: Page<city::Model>,
}

/// List every level at once, filtered by a name search term
pub async fn list_all<C>(db: &C, search: &str, page: &PageQuery) -> anyhow::Result<LocationSets>
where
    C: ConnectionTrait,
{
    Ok(LocationSets {
        regions: search_page::<region::Entity, _>(db, region::Column::Name, search, page).await?,
        subregions: search_page::<subregion::Entity, _>(db, subregion::Column::Name, search, page)
            .await?,
        countries: search_page::<country::Entity, _>(db, country::Column::Name, search, page)
            .await?,
        states: search_page::<state::Entity, _>(db, state::Column::Name, search, page).await?,
        cities: search_page::<city::Entity, _>(db, city::Column::Name, search, page).await?,
    })
}

/// One page of a level, filtered by a name search term
pub async fn search_page<E, C>(
    db: &C,
    name_column: E::Column,
    search: &str,
    page: &PageQuery,
) -> anyhow::Result<Page<E::Model>>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut select = E::find();
    if !search.is_empty() {
        select = select.filter(name_column.contains(search));
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
        .order_by_asc(name_column)
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
