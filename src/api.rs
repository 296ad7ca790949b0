use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::entities::{Field, Form, LocationCandidate, RouteOutcome};
use crate::error::Error;
use crate::map::MapView;
use crate::report::Report;

#[async_trait]
pub trait SuggestionAPI {
    /// Schedules a debounced lookup; empty input clears the field instead.
    async fn query_suggestions(&self, field: Field, input: String) -> Result<(), Error>;
    async fn suggestions(&self, field: Field) -> Result<Vec<LocationCandidate>, Error>;
}

#[async_trait]
pub trait FormAPI {
    async fn form(&self) -> Result<Form, Error>;
    async fn select_start(&self, start: LocationCandidate) -> Result<Form, Error>;
    async fn select_end(&self, end: Option<LocationCandidate>) -> Result<Form, Error>;
    async fn set_waypoints(&self, waypoints: Vec<LocationCandidate>) -> Result<Form, Error>;
}

#[async_trait]
pub trait RouteAPI {
    async fn show_path(&self) -> Result<RouteOutcome, Error>;
    async fn current_route(&self) -> Result<RouteOutcome, Error>;
    async fn map_view(&self) -> Result<MapView, Error>;
}

#[async_trait]
pub trait ReportAPI {
    async fn export_report(&self, date: NaiveDate) -> Result<Report, Error>;
}

pub trait API: SuggestionAPI + FormAPI + RouteAPI + ReportAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;
