pub mod google_maps;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::entities::{DirectionsRequest, LocationCandidate, RouteResult};
use crate::error::Error;

pub use google_maps::GoogleMaps;

/// The mapping service the planner delegates autocomplete and routing to.
#[async_trait]
pub trait MapService {
    async fn place_suggestions(
        &self,
        input: String,
        session_token: Uuid,
    ) -> Result<Vec<LocationCandidate>, Error>;

    async fn directions(&self, request: DirectionsRequest) -> Result<RouteResult, Error>;
}

pub type DynMapService = Arc<dyn MapService + Send + Sync>;
