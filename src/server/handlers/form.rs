use axum::extract::{Extension, Json};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, FormAPI};
use crate::entities::{Form, LocationCandidate};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct SelectStartParams {
    start: LocationCandidate,
}

#[derive(Serialize, Deserialize)]
pub struct SelectEndParams {
    end: Option<LocationCandidate>,
}

#[derive(Serialize, Deserialize)]
pub struct SetWaypointsParams {
    waypoints: Vec<LocationCandidate>,
}

pub async fn find(Extension(api): Extension<DynAPI>) -> Result<Json<Form>, Error> {
    let form = api.form().await?;

    Ok(form.into())
}

pub async fn select_start(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SelectStartParams>,
) -> Result<Json<Form>, Error> {
    let form = api.select_start(params.start).await?;

    Ok(form.into())
}

pub async fn select_end(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SelectEndParams>,
) -> Result<Json<Form>, Error> {
    let form = api.select_end(params.end).await?;

    Ok(form.into())
}

pub async fn set_waypoints(
    Extension(api): Extension<DynAPI>,
    Json(params): Json<SetWaypointsParams>,
) -> Result<Json<Form>, Error> {
    let form = api.set_waypoints(params.waypoints).await?;

    Ok(form.into())
}
