use serde::{Deserialize, Serialize};

/// A place suggested by the autocomplete service.
///
/// `id` is the service's place id. Candidates built from configuration (the
/// pre-filled start) have no id and are routed by label alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub id: Option<String>,
    pub label: String,
}

impl LocationCandidate {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            label: label.into(),
        }
    }

    pub fn from_label(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}
