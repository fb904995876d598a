// Token authentication middleware
//
// Requests authenticate with an opaque API token: `Authorization: Token
// <key>` (an `accessToken` header or query parameter also works). The token
// resolves against the database; everything except the public endpoints
// requires a valid one.

use std::rc::Rc;

use actix_service::forward_ready;
use actix_utils::future::{Ready, ok};
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::web::Data;
use actix_web::{Error, HttpMessage};
use futures::future::LocalBoxFuture;
use tracing::error;

use beutils_api::model::{ACCESS_TOKEN, AUTHORIZATION_HEADER, TOKEN_PREFIX};
use beutils_auth::service::token;

use crate::model::ApiResult;
use crate::state::AppState;

/// Paths reachable without a token
const PUBLIC_PATHS: &[&str] = &[
    "/api/v1/health",
    "/api/v1/auth/token",
    "/api/v1/telegram/webhook",
];

// Authentication middleware transformer
pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware {
            service: Rc::new(service),
        })
    }
}

pub struct AuthenticationMiddleware<S> {
    service: Rc<S>,
}

/// Extract the token key from a request using 3 sources in priority order:
/// 1. `Authorization: Token <key>` header
/// 2. `accessToken` HTTP header
/// 3. `accessToken` query parameter
fn extract_token(req: &ServiceRequest) -> Option<String> {
    if let Some(header_val) = req.headers().get(AUTHORIZATION_HEADER)
        && let Ok(s) = header_val.to_str()
        && let Some(key) = s.trim().strip_prefix(TOKEN_PREFIX)
    {
        let key = key.trim();
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }

    if let Some(header_val) = req.headers().get(ACCESS_TOKEN)
        && let Ok(s) = header_val.to_str()
    {
        let trimmed = s.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    if let Some(query) = req.uri().query() {
        for pair in query.split('&') {
            if let Some((key, value)) = pair.split_once('=')
                && key == ACCESS_TOKEN
                && !value.is_empty()
            {
                return Some(value.to_string());
            }
        }
    }

    None
}

fn is_public(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    PUBLIC_PATHS.contains(&path)
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if Method::OPTIONS == *req.method() || is_public(req.path()) {
                let res = service.call(req).await?;
                return Ok(res.map_into_left_body());
            }

            let Some(key) = extract_token(&req) else {
                return Ok(reject(
                    req,
                    "Authentication credentials were not provided.",
                ));
            };

            let Some(state) = req.app_data::<Data<AppState>>().cloned() else {
                return Ok(reject(req, "Authentication is not configured."));
            };

            match token::authenticate_token(&state.db, &key).await {
                Ok(Some(context)) => {
                    req.extensions_mut().insert(context);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Ok(None) => Ok(reject(req, "Invalid token.")),
                Err(err) => {
                    error!(error = %err, "token authentication failed");
                    let response = ApiResult::http_internal_error("authentication failed");
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn reject<B>(req: ServiceRequest, detail: &str) -> ServiceResponse<EitherBody<B>> {
    let response = ApiResult::http_unauthorized(detail);
    req.into_response(response).map_into_right_body()
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};
    use beutils_storage::LocalStorage;
    use beutils_tasks::{TaskPolicy, TaskRunner};
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;

    fn mock_state() -> AppState {
        let storage = Arc::new(LocalStorage::new("/tmp/beutils-test", "/media"));
        AppState::new(
            MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            TaskRunner::new(TaskPolicy::Plain),
            None,
            storage.clone(),
            storage,
        )
    }

    async fn protected() -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({"ok": true}))
    }

    async fn health() -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({"status": "UP"}))
    }

    fn app_with_state(
        state: AppState,
    ) -> App<
        impl actix_service::ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<EitherBody<actix_web::body::BoxBody>>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(Data::new(state))
            .wrap(Authentication)
            .route("/api/v1/users", web::get().to(protected))
            .route("/api/v1/health", web::get().to(health))
    }

    #[actix_web::test]
    async fn test_missing_token_is_unauthorized() {
        let app = test::init_service(app_with_state(mock_state())).await;

        let req = test::TestRequest::get().uri("/api/v1/users").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["data"], "Authentication credentials were not provided.");
    }

    #[actix_web::test]
    async fn test_public_path_passes_without_token() {
        let app = test::init_service(app_with_state(mock_state())).await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_bearer_scheme_is_not_accepted() {
        let app = test::init_service(app_with_state(mock_state())).await;

        let req = test::TestRequest::get()
            .uri("/api/v1/users")
            .insert_header((AUTHORIZATION_HEADER, "Bearer some-jwt"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_extract_token_priority() {
        let req = test::TestRequest::get()
            .uri("/api/v1/users?accessToken=from-query")
            .insert_header((AUTHORIZATION_HEADER, "Token from-header"))
            .to_srv_request();
        assert_eq!(extract_token(&req).as_deref(), Some("from-header"));

        let req = test::TestRequest::get()
            .uri("/api/v1/users?accessToken=from-query")
            .to_srv_request();
        assert_eq!(extract_token(&req).as_deref(), Some("from-query"));
    }

    #[test]
    fn test_is_public() {
        assert!(is_public("/api/v1/health"));
        assert!(is_public("/api/v1/auth/token/"));
        assert!(!is_public("/api/v1/currencies"));
    }
}
