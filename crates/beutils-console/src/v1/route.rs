//! Console v1 routing configuration

use actix_web::{Scope, web};

use super::{auth, currency, health, location, telegram, user};

/// Create the v1 console routes
pub fn routes() -> Scope {
    web::scope("/api/v1")
        .service(health::routes())
        .service(auth::routes())
        .service(location::routes())
        .service(user::routes())
        .service(currency::routes())
        .service(telegram::routes())
}
