use super::Engine;

use async_trait::async_trait;

use crate::{
    api::FormAPI,
    entities::{Form, LocationCandidate},
    error::Error,
};

#[async_trait]
impl FormAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn form(&self) -> Result<Form, Error> {
        Ok(self.state.lock().await.form.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn select_start(&self, start: LocationCandidate) -> Result<Form, Error> {
        let mut state = self.state.lock().await;

        state.form.start = Some(start);
        state.invalidate_route();

        Ok(state.form.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn select_end(&self, end: Option<LocationCandidate>) -> Result<Form, Error> {
        let mut state = self.state.lock().await;

        state.form.end = end;
        state.invalidate_route();

        Ok(state.form.clone())
    }

    #[tracing::instrument(skip(self))]
    async fn set_waypoints(&self, waypoints: Vec<LocationCandidate>) -> Result<Form, Error> {
        let mut state = self.state.lock().await;

        state.form.waypoints = waypoints;
        state.invalidate_route();

        Ok(state.form.clone())
    }
}
