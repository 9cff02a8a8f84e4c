use axum::http::{self, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::ApplicationSettings;
use crate::server::controllers::files::FileController;
use super::handlers::files;

pub fn routes(controller: FileController, app: &ApplicationSettings) -> Router {
    let origins = if app.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(app.cors_origins.iter().filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {o:?}");
                None
            }
        }))
    };

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            http::header::CONTENT_TYPE,
            http::header::ACCEPT,
        ]);

    Router::new()
        .merge(files::routes(controller, app.max_filesize))
        .route("/ping", get(ping))
        .route("/health", get(health_check))
        .layer(cors)
}

async fn ping() -> &'static str {
    "pong"
}

async fn health_check() -> &'static str {
    ""
}
