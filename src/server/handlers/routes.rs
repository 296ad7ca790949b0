use axum::extract::{Extension, Json};
use serde::Serialize;

use crate::api::{DynAPI, RouteAPI};
use crate::entities::RouteOutcome;
use crate::error::Error;
use crate::map::MapView;

pub const FOUND_NOTICE: &str = "Path successfully found!";

#[derive(Serialize)]
pub struct ShowResponse {
    notice: &'static str,
    #[serde(flatten)]
    outcome: RouteOutcome,
}

pub async fn show(Extension(api): Extension<DynAPI>) -> Result<Json<ShowResponse>, Error> {
    let outcome = api.show_path().await?;

    Ok(ShowResponse {
        notice: FOUND_NOTICE,
        outcome,
    }
    .into())
}

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<RouteOutcome>, Error> {
    let outcome = api.current_route().await?;

    Ok(outcome.into())
}

pub async fn map(Extension(api): Extension<DynAPI>) -> Result<Json<MapView>, Error> {
    let view = api.map_view().await?;

    Ok(view.into())
}
