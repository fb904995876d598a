//! Currency endpoints, including the bulk actions

use actix_web::{HttpResponse, Responder, Scope, get, post, web};
use serde::Deserialize;
use tracing::info;

use beutils_api::PageQuery;
use beutils_api::validation::{validate_currency_code, validate_name};
use beutils_currency::{NewCurrency, service};

use crate::model::{ApiResult, BulkDeleteData};
use crate::state::AppState;

pub fn routes() -> Scope {
    web::scope("/currencies")
        .service(list_currencies)
        .service(create_currency)
        .service(bulk_create_currencies)
        .service(bulk_delete_currencies)
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
async fn list_currencies(
    state: web::Data<AppState>,
    params: web::Query<ListParams>,
) -> impl Responder {
    let search = params.search.as_deref().unwrap_or_default();

    match service::search_page(&state.db, search, &params.page_query()).await {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => ApiResult::http_internal_error(err),
    }
}

/// Shape checks shared by the create actions; emptiness and uniqueness are
/// enforced by the entity hook and the database.
fn check_currency(data: &NewCurrency) -> Result<(), HttpResponse> {
    if !data.name.is_empty() && validate_name(&data.name).is_err() {
        return Err(ApiResult::http_bad_request("Enter a valid currency name."));
    }
    if !data.code.is_empty() && validate_currency_code(&data.code).is_err() {
        return Err(ApiResult::http_bad_request("Enter a valid currency code."));
    }
    Ok(())
}

#[post("")]
async fn create_currency(
    state: web::Data<AppState>,
    data: web::Json<NewCurrency>,
) -> impl Responder {
    if let Err(response) = check_currency(&data) {
        return response;
    }

    match service::create(&state.db, data.into_inner()).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => ApiResult::http_service_error(&err),
    }
}

#[post("/bulk-create")]
async fn bulk_create_currencies(
    state: web::Data<AppState>,
    data: web::Json<Vec<NewCurrency>>,
) -> impl Responder {
    for new_currency in data.iter() {
        if let Err(response) = check_currency(new_currency) {
            return response;
        }
    }

    match service::bulk_create(&state.db, data.into_inner()).await {
        Ok(created) => {
            info!(count = created.len(), "bulk created currencies");
            HttpResponse::Created().json(created)
        }
        Err(err) => ApiResult::http_service_error(&err),
    }
}

#[post("/bulk-delete")]
async fn bulk_delete_currencies(
    state: web::Data<AppState>,
    data: web::Json<BulkDeleteData>,
) -> impl Responder {
    match service::bulk_delete(&state.db, &data.ids).await {
        Ok(deleted) => {
            info!(count = deleted, "bulk deleted currencies");
            HttpResponse::NoContent().finish()
        }
        Err(err) => ApiResult::http_internal_error(err),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::web::Data;
    use actix_web::{App, test};
    use beutils_storage::LocalStorage;
    use beutils_tasks::{TaskPolicy, TaskRunner};
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
    use serde_json::json;

    use super::*;

    fn state_with(db: DatabaseConnection) -> AppState {
        let storage = Arc::new(LocalStorage::new("/tmp/beutils-test", "/media"));
        AppState::new(
            db,
            TaskRunner::new(TaskPolicy::Plain),
            None,
            storage.clone(),
            storage,
        )
    }

    #[actix_web::test]
    async fn test_bulk_delete_returns_no_content() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 2,
            }])
            .into_connection();

        let app = test::init_service(
            App::new()
                .app_data(Data::new(state_with(db)))
                .service(routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/currencies/bulk-delete")
            .set_json(json!({"ids": [1, 2]}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_create_currency_validation_maps_to_bad_request() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let app = test::init_service(
            App::new()
                .app_data(Data::new(state_with(db)))
                .service(routes()),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/currencies")
            .set_json(json!({
                "name": "",
                "name_plural": "None",
                "code": "XTS",
                "number": 963,
                "symbol": "?",
                "symbol_native": "?",
                "kind": "fiat",
                "country_id": null
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert!(
            body["data"]
                .as_str()
                .unwrap_or_default()
                .contains("Name cannot be an empty string")
        );
    }
}
