//! HTTP server wiring

use actix_cors::Cors;
use actix_files::Files;
use actix_web::dev::Server;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use tracing::info;

use beutils_api::model::CONTENT_CASE_HEADER;
use beutils_console::middleware::{Authentication, ContentCaseNegotiation};
use beutils_console::{AppState, v1};

use crate::settings::Settings;

/// Build and start the HTTP server
pub fn run(settings: &Settings, state: AppState) -> anyhow::Result<Server> {
    let address = settings.server_address();
    let port = settings.server_port();
    let serve_local_files = settings.use_local_storage();
    let static_root = settings.static_root();
    let media_root = settings.media_root();

    info!(%address, port, "starting http server");

    let server = HttpServer::new(move || {
        // Allow any origin; the Content-Case header takes part in
        // preflight negotiation.
        let cors = Cors::permissive().expose_headers([CONTENT_CASE_HEADER]);

        let mut app = App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(Authentication)
            .wrap(ContentCaseNegotiation)
            .wrap(cors)
            .wrap(Logger::default())
            .service(v1::routes());

        // Local environments serve static and media files from disk
        if serve_local_files {
            app = app
                .service(Files::new("/static", static_root.clone()))
                .service(Files::new("/media", media_root.clone()));
        }

        app
    })
    .bind((address, port))?
    .run();

    Ok(server)
}
