pub mod controllers;
pub mod error;
pub mod models;
pub mod validation;
pub mod web;
use axum::{
    middleware,
    response::{IntoResponse, Response},
    serve::serve,
    Json, Router,
};
use controllers::files::{FileController, FileControllerInner};
use error::ServerError;
use std::sync::Arc;
use tracing::{trace, warn};
use web::*;

use crate::config::Settings;
use tokio::net::TcpListener;

use error::ServerResult;

/// Creates the root directory if it isn't there yet.
pub async fn init(settings: &Settings) -> ServerResult<()> {
    trace!(
        "Creating root directory: {:?}",
        &settings.directories.root_dir
    );
    tokio::fs::create_dir_all(&settings.directories.root_dir).await?;
    Ok(())
}

pub fn file_controller(settings: &Settings) -> FileController {
    Arc::new(FileControllerInner::new(settings.directories.root_dir.clone()))
}

pub fn create_server(settings: &Settings) -> Router {
    let file_controller = file_controller(settings);

    Router::new()
        .merge(routes::routes(file_controller, &settings.application))
        .layer(middleware::map_response(main_response_mapper))
        .layer(middleware::from_fn(web::middleware::trace_request))
}

pub async fn run(settings: &Settings) -> ServerResult<()> {
    init(settings).await?;
    trace!("Created required directories.");

    let routes = create_server(settings);

    let host = &settings.application.host;
    let port = settings.application.port;

    trace!("Binding to {host}:{port}...");
    let listener = TcpListener::bind(format!("{host}:{port}")).await?;
    trace!("Listener bound successfully.");

    println!(
        "Serving {} on {}",
        settings.directories.root_dir.to_string_lossy(),
        listener.local_addr()?
    );
    serve(listener, routes.into_make_service()).await?;
    Ok(())
}

async fn main_response_mapper(res: Response) -> Response {
    let error = res.extensions().get::<ServerError>();

    let error_response = error.map(|err| {
        let (status_code, client_err) = err.to_status_and_client_error();
        warn!("Request error ({}): {}", err.as_ref(), err);
        (status_code, Json(client_err)).into_response()
    });

    error_response.unwrap_or(res)
}
