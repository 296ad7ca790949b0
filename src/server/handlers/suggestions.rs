use axum::extract::{Extension, Json, Path};
use serde::{Deserialize, Serialize};

use crate::api::{DynAPI, SuggestionAPI};
use crate::entities::{Field, LocationCandidate};
use crate::error::Error;

#[derive(Serialize, Deserialize)]
pub struct QueryParams {
    #[serde(default)]
    input: String,
}

pub async fn query(
    Extension(api): Extension<DynAPI>,
    Path(field): Path<Field>,
    Json(params): Json<QueryParams>,
) -> Result<Json<()>, Error> {
    api.query_suggestions(field, params.input).await?;

    Ok(().into())
}

pub async fn list(
    Extension(api): Extension<DynAPI>,
    Path(field): Path<Field>,
) -> Result<Json<Vec<LocationCandidate>>, Error> {
    let suggestions = api.suggestions(field).await?;

    Ok(suggestions.into())
}
