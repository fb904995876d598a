//! User endpoints
//!
//! The listing is annotated with the human-readable `location` string; the
//! presentation variant and mirroring are query-negotiable.

use actix_web::{HttpResponse, Responder, Scope, get, post, web};
use sea_orm::sea_query::{Asterisk, Condition, Expr};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};

use beutils_api::validation::validate_email;
use beutils_api::{Page, PageQuery};
use beutils_auth::model::NewUser;
use beutils_auth::service::user as user_service;
use beutils_location::annotate::{AnnotateOptions, annotate_location};
use beutils_location::variant::LocationVariant;
use beutils_persistence::entity::users;
use beutils_persistence::full_name;

use crate::model::ApiResult;
use crate::state::AppState;

pub fn routes() -> Scope {
    web::scope("/users").service(list_users).service(create_user)
}

#[derive(Debug, Deserialize)]
pub struct UserListParams {
    pub search: Option<String>,
    pub variant: Option<u8>,
    pub mirror: Option<bool>,
    pub page: Option<u64>,
    pub page_size: Option<u64>,
}

impl UserListParams {
    fn page_query(&self) -> PageQuery {
        PageQuery {
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, FromQueryResult)]
struct UserRow {
    id: i64,
    email: String,
    first_name: String,
    middle_name: String,
    last_name: String,
    has_eastern_name: bool,
    email_verified: bool,
    location: String,
}

#[derive(Debug, Serialize)]
pub struct UserData {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub full_name: String,
    pub email_verified: bool,
    pub location: String,
}

impl From<UserRow> for UserData {
    fn from(row: UserRow) -> Self {
        let full_name = full_name(
            &row.first_name,
            &row.middle_name,
            &row.last_name,
            row.has_eastern_name,
        );
        Self {
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            middle_name: row.middle_name,
            last_name: row.last_name,
            full_name,
            email_verified: row.email_verified,
            location: row.location,
        }
    }
}

#[get("")]
async fn list_users(
    state: web::Data<AppState>,
    params: web::Query<UserListParams>,
) -> impl Responder {
    let mut select = users::Entity::find();
    if let Some(search) = params.search.as_deref().filter(|s| !s.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(users::Column::Email.contains(search))
                .add(users::Column::FirstName.contains(search))
                .add(users::Column::LastName.contains(search)),
        );
    }

    let count = select
        .clone()
        .select_only()
        .column_as(Expr::col(Asterisk).count(), "count")
        .into_tuple::<i64>()
        .one(&state.db)
        .await;
    let total_count = match count {
        Ok(total_count) => total_count.unwrap_or_default() as u64,
        Err(err) => return ApiResult::http_internal_error(err),
    };

    let options = AnnotateOptions {
        variant: params
            .variant
            .map(LocationVariant::from_number)
            .unwrap_or_default(),
        mirror: params.mirror.unwrap_or(false),
        ..Default::default()
    };

    let page_query = params.page_query();
    let rows = annotate_location(select, &options)
        .order_by_asc(users::Column::Id)
        .offset(page_query.offset())
        .limit(page_query.page_size())
        .into_model::<UserRow>()
        .all(&state.db)
        .await;

    match rows {
        Ok(rows) => {
            let page = Page::new(
                total_count,
                page_query.page(),
                page_query.page_size(),
                rows,
            )
            .map(UserData::from);
            HttpResponse::Ok().json(page)
        }
        Err(err) => ApiResult::http_internal_error(err),
    }
}

#[post("")]
async fn create_user(state: web::Data<AppState>, data: web::Json<NewUser>) -> impl Responder {
    if validate_email(&data.email).is_err() {
        return ApiResult::http_bad_request("Enter a valid email address.");
    }

    match user_service::create_user(&state.db, data.into_inner()).await {
        Ok(created) => HttpResponse::Created().json(created),
        Err(err) => ApiResult::http_service_error(&err),
    }
}
