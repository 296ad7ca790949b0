use serde::{Deserialize, Serialize};

use crate::entities::TravelSequenceEntry;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Driving,
}

impl TravelMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Driving => "driving",
        }
    }
}

/// What is sent to the routing service.
///
/// `waypoints` are the intermediate stops only; the destination is never
/// repeated among them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DirectionsRequest {
    pub origin: String,
    pub destination: String,
    pub waypoints: Vec<String>,
    pub optimize_waypoints: bool,
    pub travel_mode: TravelMode,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RouteLeg {
    pub start_address: String,
    pub end_address: String,
    pub distance_meters: u64,
    pub duration_seconds: u64,
}

/// The routing service's answer, kept for one request/render cycle.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RouteResult {
    /// Google encoded polyline of the whole route.
    pub overview_polyline: String,
    /// Visiting order of the intermediate waypoints, if the service optimised.
    pub waypoint_order: Option<Vec<usize>>,
    pub legs: Vec<RouteLeg>,
}

impl RouteResult {
    pub fn total_distance_meters(&self) -> u64 {
        self.legs.iter().map(|leg| leg.distance_meters).sum()
    }

    pub fn total_duration_seconds(&self) -> u64 {
        self.legs.iter().map(|leg| leg.duration_seconds).sum()
    }
}

/// A stored route together with the sequence derived from it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RouteOutcome {
    pub token: u64,
    pub route: RouteResult,
    pub sequence: Vec<TravelSequenceEntry>,
}
