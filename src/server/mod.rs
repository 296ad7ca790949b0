mod handlers;

use std::net::SocketAddr;

use axum::{
    extract::Extension,
    routing::{get, post, put},
    Router,
};

use crate::api::DynAPI;
use crate::error::{unexpected_error, Error};
use crate::server::handlers::{form, reports, routes, suggestions};

pub fn router(api: DynAPI) -> Router {
    Router::new()
        .route("/form", get(form::find))
        .route("/form/start", put(form::select_start))
        .route("/form/end", put(form::select_end))
        .route("/form/waypoints", put(form::set_waypoints))
        .route(
            "/suggestions/:field",
            get(suggestions::list).post(suggestions::query),
        )
        .route("/route", get(routes::find).post(routes::show))
        .route("/route/map", get(routes::map))
        .route("/report", get(reports::export))
        .layer(Extension(api))
}

/// Serves until ctrl-c.
pub async fn serve(api: DynAPI, addr: SocketAddr) -> Result<(), Error> {
    let app = router(api);

    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| {
            tracing::error!(%err, "server failed");
            unexpected_error()
        })
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "failed to listen for ctrl-c");
        return;
    }

    tracing::info!("shutting down");
}
