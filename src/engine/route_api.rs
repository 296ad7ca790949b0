use super::Engine;

use async_trait::async_trait;

use crate::{
    api::RouteAPI,
    entities::{DirectionsRequest, Form, RouteOutcome, TravelMode, TravelSequenceEntry},
    error::{not_found_error, superseded_error, Error},
    map::MapView,
    sequence::reconcile,
};

/// Validates the form and derives the as-selected sequence.
pub(super) fn selected_sequence(form: &Form) -> Result<Vec<TravelSequenceEntry>, Error> {
    reconcile(
        form.start.as_ref(),
        form.destination(),
        form.intermediates(),
        None,
    )
}

/// Origin, stops and destination come from the as-selected sequence.
fn directions_request(sequence: &[TravelSequenceEntry]) -> DirectionsRequest {
    let label = |entry: &TravelSequenceEntry| entry.label.clone();
    let stops = sequence
        .get(1..sequence.len().saturating_sub(1))
        .unwrap_or_default();

    DirectionsRequest {
        origin: sequence.first().map(label).unwrap_or_default(),
        destination: sequence.last().map(label).unwrap_or_default(),
        waypoints: stops.iter().map(label).collect(),
        optimize_waypoints: true,
        travel_mode: TravelMode::Driving,
    }
}

#[async_trait]
impl RouteAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn show_path(&self) -> Result<RouteOutcome, Error> {
        let (token, form, request) = {
            let mut state = self.state.lock().await;
            let form = state.form.clone();
            let sequence = selected_sequence(&form)?;
            state.issued += 1;

            (state.issued, form, directions_request(&sequence))
        };

        tracing::info!(token, stops = request.waypoints.len(), "requesting route");

        let route = match self.maps.directions(request).await {
            Ok(route) => route,
            Err(err) => {
                tracing::warn!(token, ?err, "route request failed");
                return Err(err);
            }
        };

        let sequence = reconcile(
            form.start.as_ref(),
            form.destination(),
            form.intermediates(),
            route.waypoint_order.as_deref(),
        )?;

        let mut state = self.state.lock().await;

        if state.issued != token {
            tracing::warn!(token, newest = state.issued, "discarding stale route response");
            return Err(superseded_error());
        }

        let outcome = RouteOutcome {
            token,
            route,
            sequence,
        };
        state.route = Some(outcome.clone());

        tracing::info!(token, "path successfully found");

        Ok(outcome)
    }

    #[tracing::instrument(skip(self))]
    async fn current_route(&self) -> Result<RouteOutcome, Error> {
        let state = self.state.lock().await;

        state.route.clone().ok_or_else(not_found_error)
    }

    #[tracing::instrument(skip(self))]
    async fn map_view(&self) -> Result<MapView, Error> {
        let outcome = self.current_route().await?;

        MapView::from_route(&outcome.route)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{candidate, engine, FakeMaps};
    use super::*;
    use crate::api::FormAPI;
    use crate::entities::Position;

    use std::sync::Arc;
    use std::time::Duration;

    fn labels(outcome: &RouteOutcome) -> Vec<&str> {
        outcome
            .sequence
            .iter()
            .map(|entry| entry.label.as_str())
            .collect()
    }

    async fn fill(engine: &Engine, end: Option<&str>, waypoints: &[&str]) {
        engine.select_start(candidate("A")).await.unwrap();
        engine.select_end(end.map(candidate)).await.unwrap();
        engine
            .set_waypoints(waypoints.iter().map(|label| candidate(label)).collect())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn missing_destination_sends_nothing() {
        let maps = FakeMaps::new();
        let engine = engine(&maps);
        fill(&engine, None, &[]).await;

        let err = engine.show_path().await.unwrap_err();

        assert_eq!(err.code, 102);
        assert!(maps.direction_calls().is_empty());
        assert_eq!(engine.current_route().await.unwrap_err().code, 104);
    }

    #[tokio::test]
    async fn missing_start_sends_nothing() {
        let maps = FakeMaps::new();
        let engine = engine(&maps);
        engine.select_end(Some(candidate("D"))).await.unwrap();

        assert_eq!(engine.show_path().await.unwrap_err().code, 102);
        assert!(maps.direction_calls().is_empty());
    }

    #[tokio::test]
    async fn optimised_order_is_applied_between_start_and_end() {
        let maps = FakeMaps::new();
        let engine = engine(&maps);
        fill(&engine, Some("D"), &["B", "C"]).await;

        let outcome = engine.show_path().await.unwrap();

        assert_eq!(labels(&outcome), ["A", "C", "B", "D"]);
        assert_eq!(outcome.route.waypoint_order, Some(vec![1, 0]));
        assert_eq!(engine.current_route().await.unwrap(), outcome);

        let calls = maps.direction_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].origin, "A");
        assert_eq!(calls[0].destination, "D");
        assert_eq!(calls[0].waypoints, ["B", "C"]);
        assert!(calls[0].optimize_waypoints);
        assert_eq!(calls[0].travel_mode, TravelMode::Driving);
    }

    #[tokio::test]
    async fn selection_order_is_kept_without_permutation() {
        let maps = FakeMaps::new();
        maps.withhold_order(true);
        let engine = engine(&maps);
        fill(&engine, Some("D"), &["B", "C"]).await;

        let outcome = engine.show_path().await.unwrap();

        assert_eq!(labels(&outcome), ["A", "B", "C", "D"]);
    }

    #[tokio::test]
    async fn last_waypoint_is_the_destination_without_end() {
        let maps = FakeMaps::new();
        let engine = engine(&maps);
        fill(&engine, None, &["B", "C", "E"]).await;

        let outcome = engine.show_path().await.unwrap();

        let calls = maps.direction_calls();
        assert_eq!(calls[0].destination, "E");
        assert_eq!(calls[0].waypoints, ["B", "C"]);
        assert_eq!(labels(&outcome), ["A", "C", "B", "E"]);
        assert_eq!(outcome.sequence.last().unwrap().position, Position::End);
    }

    #[tokio::test]
    async fn service_failure_is_surfaced_and_session_survives() {
        let maps = FakeMaps::new();
        maps.fail_directions(true);
        let engine = engine(&maps);
        fill(&engine, Some("D"), &["B"]).await;

        assert_eq!(engine.show_path().await.unwrap_err().code, 4);
        assert_eq!(engine.current_route().await.unwrap_err().code, 104);

        maps.fail_directions(false);
        assert!(engine.show_path().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_does_not_overwrite_newer_route() {
        let maps = FakeMaps::new();
        maps.delay_next(Duration::from_secs(2));
        let engine = Arc::new(engine(&maps));
        fill(&engine, Some("D"), &["B", "C"]).await;

        let slow = tokio::spawn({
            let engine = engine.clone();
            async move { engine.show_path().await }
        });
        tokio::time::sleep(Duration::from_millis(10)).await;

        engine
            .set_waypoints(vec![candidate("B"), candidate("C"), candidate("F")])
            .await
            .unwrap();
        let fresh = engine.show_path().await.unwrap();

        let stale = slow.await.unwrap();

        assert_eq!(stale.unwrap_err().code, 103);
        assert_eq!(maps.direction_calls().len(), 2);
        assert_eq!(labels(&fresh), ["A", "F", "C", "B", "D"]);
        assert_eq!(engine.current_route().await.unwrap(), fresh);
    }

    #[tokio::test]
    async fn map_view_follows_the_stored_route() {
        let engine = engine(&FakeMaps::new());
        assert_eq!(engine.map_view().await.unwrap_err().code, 104);

        fill(&engine, Some("D"), &["B", "C"]).await;
        engine.show_path().await.unwrap();

        let view = engine.map_view().await.unwrap();

        assert_eq!(view.path.0.len(), 3);
        assert_eq!(view.total_distance_meters, 30_000);
        assert_eq!(view.total_duration_seconds, 1_800);
    }
}
