//! Token-obtain endpoint

use actix_web::{HttpResponse, Responder, Scope, post, web};
use tracing::info;

use beutils_auth::model::TokenResult;
use beutils_auth::service::{token, user};

use crate::model::{ApiResult, TokenObtainData};
use crate::state::AppState;

pub fn routes() -> Scope {
    web::scope("/auth").service(obtain_token)
}

#[post("/token")]
async fn obtain_token(
    state: web::Data<AppState>,
    data: web::Json<TokenObtainData>,
) -> impl Responder {
    let data = data.into_inner();

    let authenticated = match user::authenticate(&state.db, &data.email, &data.password).await {
        Ok(authenticated) => authenticated,
        Err(err) => return ApiResult::http_internal_error(err),
    };

    let Some(account) = authenticated else {
        return ApiResult::http_unauthorized("Unable to log in with provided credentials.");
    };

    match token::obtain_or_create(&state.db, account.id).await {
        Ok(key) => {
            info!(user_id = account.id, "issued api token");
            HttpResponse::Ok().json(TokenResult { token: key })
        }
        Err(err) => ApiResult::http_internal_error(err),
    }
}
