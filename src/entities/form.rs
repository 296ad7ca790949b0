use serde::{Deserialize, Serialize};

use crate::entities::LocationCandidate;

/// Selections made on the planning form. Waypoints keep user-selection order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Form {
    pub start: Option<LocationCandidate>,
    pub end: Option<LocationCandidate>,
    pub waypoints: Vec<LocationCandidate>,
}

impl Form {
    pub fn with_start(start: Option<LocationCandidate>) -> Self {
        Self {
            start,
            ..Self::default()
        }
    }

    /// The place the route finishes at: the explicit end, else the last waypoint.
    pub fn destination(&self) -> Option<&LocationCandidate> {
        self.end.as_ref().or_else(|| self.waypoints.last())
    }

    /// Waypoints to visit between origin and destination.
    ///
    /// When the last waypoint stands in for a missing end it is not an
    /// intermediate stop as well.
    pub fn intermediates(&self) -> &[LocationCandidate] {
        match (&self.end, self.waypoints.split_last()) {
            (None, Some((_, rest))) => rest,
            _ => &self.waypoints,
        }
    }
}
