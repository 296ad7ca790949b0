use async_trait::async_trait;
use reqwest::Response as HttpResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::MapService;
use crate::{
    config::MapsConfig,
    entities::{DirectionsRequest, LocationCandidate, RouteLeg, RouteResult},
    error::{invalid_input_error, upstream_error, Error},
};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub description: String,
}

pub type PlaceSuggestions = Vec<PlaceSuggestion>;

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response<T> {
    status: String,
    predictions: Option<T>,
    error_message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    routes: Vec<Route>,
    error_message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct Route {
    overview_polyline: Polyline,
    waypoint_order: Option<Vec<usize>>,
    #[serde(default)]
    legs: Vec<Leg>,
}

#[derive(Clone, Debug, Deserialize)]
struct Polyline {
    points: String,
}

#[derive(Clone, Debug, Deserialize)]
struct Leg {
    start_address: String,
    end_address: String,
    distance: Measure,
    duration: Measure,
}

#[derive(Clone, Debug, Deserialize)]
struct Measure {
    value: u64,
}

/// Google Maps Places Autocomplete and Directions client.
#[derive(Clone, Debug)]
pub struct GoogleMaps {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl GoogleMaps {
    pub fn new(config: &MapsConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("https://{}{}", self.api_base, path)
    }
}

#[async_trait]
impl MapService for GoogleMaps {
    #[tracing::instrument(skip(self))]
    async fn place_suggestions(
        &self,
        input: String,
        session_token: Uuid,
    ) -> Result<Vec<LocationCandidate>, Error> {
        let res = self
            .client
            .get(self.url("/maps/api/place/autocomplete/json"))
            .query(&[("key", &self.api_key)])
            .query(&[("input", input)])
            .query(&[("sessiontoken", session_token.to_string())])
            .send()
            .await?;

        let data: Response<PlaceSuggestions> = check_status(res)?.json().await?;

        candidates(data)
    }

    #[tracing::instrument(skip(self))]
    async fn directions(&self, request: DirectionsRequest) -> Result<RouteResult, Error> {
        let res = self
            .client
            .get(self.url("/maps/api/directions/json"))
            .query(&directions_query(&self.api_key, &request))
            .send()
            .await?;

        let data: DirectionsResponse = check_status(res)?.json().await?;

        route_result(data)
    }
}

fn check_status(res: HttpResponse) -> Result<HttpResponse, Error> {
    let status_code = res.status().as_u16();

    if (400..500).contains(&status_code) {
        return Err(invalid_input_error());
    } else if status_code != 200 {
        return Err(upstream_error());
    }

    Ok(res)
}

/// Query pairs for a Directions call. `waypoints` is left out for a direct trip.
fn directions_query(api_key: &str, request: &DirectionsRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("key", api_key.to_string()),
        ("origin", request.origin.clone()),
        ("destination", request.destination.clone()),
    ];
    if let Some(waypoints) = waypoints_param(request) {
        query.push(("waypoints", waypoints));
    }
    query.push(("mode", request.travel_mode.name().to_string()));

    query
}

/// `optimize:true|first stop|second stop`
fn waypoints_param(request: &DirectionsRequest) -> Option<String> {
    if request.waypoints.is_empty() {
        return None;
    }

    let mut parts: Vec<String> = Vec::with_capacity(request.waypoints.len() + 1);

    if request.optimize_waypoints {
        parts.push("optimize:true".into());
    }
    // pipes separate stops; a label must not introduce extra ones
    parts.extend(request.waypoints.iter().map(|stop| stop.replace('|', " ")));

    Some(parts.join("|"))
}

fn candidates(data: Response<PlaceSuggestions>) -> Result<Vec<LocationCandidate>, Error> {
    match data.status.as_str() {
        "ZERO_RESULTS" => Ok(Vec::new()),
        "OK" => Ok(data
            .predictions
            .ok_or_else(upstream_error)?
            .into_iter()
            .map(|p| LocationCandidate::new(p.place_id, p.description))
            .collect()),
        status => {
            tracing::warn!(status, message = ?data.error_message, "autocomplete failed");
            Err(upstream_error())
        }
    }
}

fn route_result(data: DirectionsResponse) -> Result<RouteResult, Error> {
    match data.status.as_str() {
        "OK" => {}
        "NOT_FOUND" | "ZERO_RESULTS" | "MAX_WAYPOINTS_EXCEEDED" | "INVALID_REQUEST" => {
            tracing::warn!(status = %data.status, message = ?data.error_message, "no route");
            return Err(invalid_input_error());
        }
        status => {
            tracing::warn!(status, message = ?data.error_message, "directions failed");
            return Err(upstream_error());
        }
    }

    let route = data.routes.into_iter().next().ok_or_else(upstream_error)?;

    Ok(RouteResult {
        overview_polyline: route.overview_polyline.points,
        waypoint_order: route.waypoint_order,
        legs: route
            .legs
            .into_iter()
            .map(|leg| RouteLeg {
                start_address: leg.start_address,
                end_address: leg.end_address,
                distance_meters: leg.distance.value,
                duration_seconds: leg.duration.value,
            })
            .collect(),
    })
}
