//! Liveness endpoint

use actix_web::{HttpResponse, Responder, Scope, get, web};
use serde_json::json;

pub fn routes() -> Scope {
    web::scope("/health").service(liveness)
}

#[get("")]
async fn liveness() -> impl Responder {
    HttpResponse::Ok().json(json!({"status": "UP"}))
}
