//! Location listing endpoints
//!
//! One request returns all five levels of the hierarchy for a search term,
//! each level paginated independently.

use actix_web::{HttpResponse, Responder, Scope, get, web};
use serde::Deserialize;

use beutils_api::PageQuery;
use beutils_location::service;

use crate::model::ApiResult;
use crate::state::AppState;

pub fn routes() -> Scope {
    web::scope("/locations").service(list_locations)
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl ListParams {
    fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[get("")]
async fn list_locations(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> impl Responder {
    let search = params.search.as_deref().unwrap_or_default();

    match service::list_all(&state.db, search, &params.page_query()).await {
        Ok(sets) => HttpResponse::Ok().json(sets),
        Err(err) => ApiResult::http_internal_error(err),
    }
}
