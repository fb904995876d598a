//! Console request and response models

use actix_web::HttpResponse;
use beutils_common::BeutilsError;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};

/// API result wrapper for error and status responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: 0,
            message: "success".to_string(),
            data,
        }
    }

    pub fn http_success(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Self::success(data))
    }
}

impl ApiResult<String> {
    /// Internal server error response from an error
    pub fn http_internal_error<E: std::fmt::Display>(err: E) -> HttpResponse {
        HttpResponse::InternalServerError().json(Self {
            code: 500,
            message: "error".to_string(),
            data: err.to_string(),
        })
    }

    /// Bad request error response
    pub fn http_bad_request<E: std::fmt::Display>(err: E) -> HttpResponse {
        HttpResponse::BadRequest().json(Self {
            code: 400,
            message: "error".to_string(),
            data: err.to_string(),
        })
    }

    /// Unauthorized response with a detail message
    pub fn http_unauthorized(detail: &str) -> HttpResponse {
        HttpResponse::Unauthorized().json(Self {
            code: 401,
            message: "unauthorized".to_string(),
            data: detail.to_string(),
        })
    }

    /// Map a service error onto 400 for validation failures, 500 otherwise
    pub fn http_service_error(err: &anyhow::Error) -> HttpResponse {
        if is_validation_error(err) {
            Self::http_bad_request(err)
        } else {
            Self::http_internal_error(err)
        }
    }
}

/// Validation failures surface as `BeutilsError::Validation` from services
/// or `DbErr::Custom` from entity hooks.
fn is_validation_error(err: &anyhow::Error) -> bool {
    if matches!(err.downcast_ref::<BeutilsError>(), Some(BeutilsError::Validation(_))) {
        return true;
    }
    matches!(err.downcast_ref::<DbErr>(), Some(DbErr::Custom(_)))
}

/// Body of the bulk-delete action
#[derive(Clone, Debug, Deserialize)]
pub struct BulkDeleteData {
    pub ids: Vec<i64>,
}

/// Body of the token-obtain endpoint
#[derive(Clone, Debug, Deserialize)]
pub struct TokenObtainData {
    pub email: String,
    pub password: String,
}
