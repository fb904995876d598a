//! Explicit ancestor derivation for location references
//!
//! Any row carrying the five location foreign keys keeps its ancestor keys
//! consistent with the deepest level it references. Each level table already
//! denormalizes its own ancestors, so a single lookup per sync is enough.

use sea_orm::entity::prelude::*;

use crate::entity::{city, country, state, subregion};

/// The five location foreign keys of a host row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocationRefs {
    pub region_id: Option<i64>,
    pub subregion_id: Option<i64>,
    pub country_id: Option<i64>,
    pub state_id: Option<i64>,
    pub city_id: Option<i64>,
}

/// Fill ancestor keys from the deepest provided level.
///
/// A city reference overrides state, country, subregion, and region; a state
/// reference overrides country, subregion, and region; and so on. A missing
/// referenced row is an error.
pub async fn sync_ancestors<C>(db: &C, refs: &mut LocationRefs) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    if let Some(city_id) = refs.city_id {
        let city = city::Entity::find_by_id(city_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::Custom(format!("city {city_id} does not exist")))?;
        refs.region_id = Some(city.region_id);
        refs.subregion_id = Some(city.subregion_id);
        refs.country_id = Some(city.country_id);
        refs.state_id = Some(city.state_id);
    } else if let Some(state_id) = refs.state_id {
        let state = state::Entity::find_by_id(state_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::Custom(format!("state {state_id} does not exist")))?;
        refs.region_id = Some(state.region_id);
        refs.subregion_id = Some(state.subregion_id);
        refs.country_id = Some(state.country_id);
    } else if let Some(country_id) = refs.country_id {
        let country = country::Entity::find_by_id(country_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::Custom(format!("country {country_id} does not exist")))?;
        refs.region_id = Some(country.region_id);
        refs.subregion_id = Some(country.subregion_id);
    } else if let Some(subregion_id) = refs.subregion_id {
        let subregion = subregion::Entity::find_by_id(subregion_id)
            .one(db)
            .await?
            .ok_or_else(|| DbErr::Custom(format!("subregion {subregion_id} does not exist")))?;
        refs.region_id = Some(subregion.region_id);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    fn sample_city() -> city::Model {
        city::Model {
            id: 9,
            name: "Lisbon".to_string(),
            slug: "lisbon".to_string(),
            region_id: 1,
            subregion_id: 2,
            country_id: 3,
            state_id: 4,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_city_overrides_all_ancestors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample_city()]])
            .into_connection();

        let mut refs = LocationRefs {
            city_id: Some(9),
            // Stale ancestors get overwritten
            region_id: Some(77),
            country_id: Some(88),
            ..Default::default()
        };
        sync_ancestors(&db, &mut refs).await.expect("sync");

        assert_eq!(refs.region_id, Some(1));
        assert_eq!(refs.subregion_id, Some(2));
        assert_eq!(refs.country_id, Some(3));
        assert_eq!(refs.state_id, Some(4));
        assert_eq!(refs.city_id, Some(9));
    }

    #[tokio::test]
    async fn test_subregion_only_fills_region() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![subregion::Model {
                id: 2,
                name: "Southern Europe".to_string(),
                slug: "southern europe".to_string(),
                region_id: 1,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            }]])
            .into_connection();

        let mut refs = LocationRefs {
            subregion_id: Some(2),
            ..Default::default()
        };
        sync_ancestors(&db, &mut refs).await.expect("sync");

        assert_eq!(refs.region_id, Some(1));
        assert_eq!(refs.country_id, None);
        assert_eq!(refs.state_id, None);
        assert_eq!(refs.city_id, None);
    }

    #[tokio::test]
    async fn test_empty_refs_are_untouched() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let mut refs = LocationRefs::default();
        sync_ancestors(&db, &mut refs).await.expect("sync");
        assert_eq!(refs, LocationRefs::default());
    }

    #[tokio::test]
    async fn test_missing_city_is_an_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<city::Model>::new()])
            .into_connection();

        let mut refs = LocationRefs {
            city_id: Some(404),
            ..Default::default()
        };
        let err = sync_ancestors(&db, &mut refs).await.unwrap_err();
        assert!(err.to_string().contains("city 404 does not exist"));
    }
}
