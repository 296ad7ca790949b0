mod form_api;
mod report_api;
mod route_api;
mod suggestion_api;

#[cfg(test)]
pub(crate) mod test_support;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    api::API,
    config::{Config, ReportConfig},
    entities::{Field, Form, LocationCandidate, RouteOutcome},
    external::DynMapService,
};

use suggestion_api::Debouncers;

/// One planning session: the form, its suggestion lists and the last route.
pub struct Engine {
    maps: DynMapService,
    session_token: Uuid,
    state: Arc<Mutex<SessionState>>,
    debouncers: Debouncers,
    report: ReportConfig,
}

#[derive(Debug, Default)]
struct SessionState {
    form: Form,
    suggestions: HashMap<Field, Vec<LocationCandidate>>,
    /// Newest route request token handed out. Form edits advance it too, so
    /// any response still in flight is recognised as stale.
    issued: u64,
    route: Option<RouteOutcome>,
}

impl SessionState {
    fn invalidate_route(&mut self) {
        self.issued += 1;
        if self.route.take().is_some() {
            tracing::info!(token = self.issued, "form changed, dropped stored route");
        }
    }
}

impl Engine {
    #[tracing::instrument(name = "Engine::new", skip_all)]
    pub fn new(maps: DynMapService, config: &Config) -> Self {
        let start = config
            .default_start
            .as_ref()
            .map(|label| LocationCandidate::from_label(label.as_str()));

        let state = SessionState {
            form: Form::with_start(start),
            ..SessionState::default()
        };

        let session_token = Uuid::new_v4();
        tracing::info!(%session_token, "opened planning session");

        Self {
            maps,
            session_token,
            state: Arc::new(Mutex::new(state)),
            debouncers: Debouncers::new(config.debounce),
            report: config.report.clone(),
        }
    }

    /// Cancels pending suggestion lookups. An outstanding route request is
    /// left to finish.
    #[tracing::instrument(name = "Engine::shutdown", skip_all)]
    pub fn shutdown(&self) {
        let cancelled = self.debouncers.cancel_all();
        tracing::info!(cancelled, "closed planning session");
    }
}

impl API for Engine {}

#[test]
fn new_engine() {
    use crate::api::FormAPI;
    use tokio_test::block_on;

    let engine = test_support::engine(&test_support::FakeMaps::new());
    let form = block_on(engine.form()).unwrap();

    assert_eq!(form, Form::default());
    engine.shutdown();
}
