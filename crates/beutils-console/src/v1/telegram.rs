//! Telegram webhook ingestion

use actix_web::{HttpResponse, Responder, Scope, post, web};
use serde_json::{Value, json};
use tracing::warn;

use crate::model::ApiResult;
use crate::state::AppState;

pub fn routes() -> Scope {
    web::scope("/telegram").service(webhook)
}

#[post("/webhook")]
async fn webhook(state: web::Data<AppState>, data: web::Json<Value>) -> impl Responder {
    let Some(bot) = &state.bot else {
        return HttpResponse::ServiceUnavailable().json(ApiResult {
            code: 503,
            message: "error".to_string(),
            data: "telegram bot is not configured".to_string(),
        });
    };

    match bot.process_webhook(data.into_inner()).await {
        Ok(()) => HttpResponse::Ok().json(json!({"ok": true})),
        Err(err) => {
            warn!(error = %err, "undecodable telegram webhook payload");
            ApiResult::http_bad_request(err)
        }
    }
}
