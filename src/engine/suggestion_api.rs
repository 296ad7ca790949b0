use super::{Engine, SessionState};

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::FutureExt;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    api::SuggestionAPI,
    debounce::Debouncer,
    entities::{Field, LocationCandidate},
    error::Error,
    external::DynMapService,
};

pub(super) struct Debouncers {
    start: Debouncer,
    end: Debouncer,
    waypoints: Debouncer,
}

impl Debouncers {
    pub(super) fn new(delay: Duration) -> Self {
        Self {
            start: Debouncer::new(delay),
            end: Debouncer::new(delay),
            waypoints: Debouncer::new(delay),
        }
    }

    fn get(&self, field: Field) -> &Debouncer {
        match field {
            Field::Start => &self.start,
            Field::End => &self.end,
            Field::Waypoints => &self.waypoints,
        }
    }

    /// Returns how many lookups were still waiting.
    pub(super) fn cancel_all(&self) -> usize {
        Field::ALL
            .iter()
            .filter(|&&field| self.get(field).cancel())
            .count()
    }
}

#[async_trait]
impl SuggestionAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn query_suggestions(&self, field: Field, input: String) -> Result<(), Error> {
        let debouncer = self.debouncers.get(field);

        if input.trim().is_empty() {
            debouncer.cancel();
            self.state.lock().await.suggestions.remove(&field);
            tracing::info!("cleared suggestions");
            return Ok(());
        }

        debouncer.schedule(
            lookup(
                self.maps.clone(),
                self.state.clone(),
                self.session_token,
                field,
                input,
            )
            .boxed(),
        );

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn suggestions(&self, field: Field) -> Result<Vec<LocationCandidate>, Error> {
        let state = self.state.lock().await;

        Ok(state.suggestions.get(&field).cloned().unwrap_or_default())
    }
}

/// Runs once the debounce delay has passed. Failures keep the previous list.
#[tracing::instrument(skip(maps, state, session_token))]
async fn lookup(
    maps: DynMapService,
    state: Arc<Mutex<SessionState>>,
    session_token: Uuid,
    field: Field,
    input: String,
) {
    match maps.place_suggestions(input, session_token).await {
        Ok(candidates) => {
            tracing::info!(count = candidates.len(), "received suggestions");
            state.lock().await.suggestions.insert(field, candidates);
        }
        Err(err) => tracing::warn!(?err, "suggestion lookup failed"),
    }
}
