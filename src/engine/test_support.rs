//! In-memory `MapService` and engine builders shared by the engine tests.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use super::Engine;
use crate::{
    config::{Config, MapsConfig, ReportConfig},
    debounce::DEFAULT_DELAY,
    entities::{DirectionsRequest, LocationCandidate, RouteLeg, RouteResult},
    error::{upstream_error, Error},
    external::{DynMapService, MapService},
};

pub fn candidate(label: &str) -> LocationCandidate {
    LocationCandidate::new(format!("place-{}", label), label)
}

pub fn suggestion_for(input: &str) -> LocationCandidate {
    LocationCandidate::new(format!("suggested-{}", input), format!("{}, India", input))
}

#[derive(Default)]
pub struct FakeMaps {
    suggestion_calls: Mutex<Vec<String>>,
    direction_calls: Mutex<Vec<DirectionsRequest>>,
    delays: Mutex<VecDeque<Duration>>,
    fail_suggestions: AtomicBool,
    fail_directions: AtomicBool,
    withhold_order: AtomicBool,
}

impl FakeMaps {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn suggestion_calls(&self) -> Vec<String> {
        self.suggestion_calls.lock().unwrap().clone()
    }

    pub fn direction_calls(&self) -> Vec<DirectionsRequest> {
        self.direction_calls.lock().unwrap().clone()
    }

    /// Delays the next directions response.
    pub fn delay_next(&self, delay: Duration) {
        self.delays.lock().unwrap().push_back(delay);
    }

    pub fn fail_suggestions(&self, fail: bool) {
        self.fail_suggestions.store(fail, Ordering::SeqCst);
    }

    pub fn fail_directions(&self, fail: bool) {
        self.fail_directions.store(fail, Ordering::SeqCst);
    }

    /// Answer without a `waypoint_order`, as an unoptimised service would.
    pub fn withhold_order(&self, withhold: bool) {
        self.withhold_order.store(withhold, Ordering::SeqCst);
    }
}

#[async_trait]
impl MapService for FakeMaps {
    async fn place_suggestions(
        &self,
        input: String,
        _session_token: Uuid,
    ) -> Result<Vec<LocationCandidate>, Error> {
        self.suggestion_calls.lock().unwrap().push(input.clone());

        if self.fail_suggestions.load(Ordering::SeqCst) {
            return Err(upstream_error());
        }

        Ok(vec![suggestion_for(&input)])
    }

    /// Optimises by visiting the intermediate stops in reverse.
    async fn directions(&self, request: DirectionsRequest) -> Result<RouteResult, Error> {
        self.direction_calls.lock().unwrap().push(request.clone());

        let delay = self.delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_directions.load(Ordering::SeqCst) {
            return Err(upstream_error());
        }

        let waypoint_order = if self.withhold_order.load(Ordering::SeqCst) {
            None
        } else {
            Some((0..request.waypoints.len()).rev().collect())
        };

        let mut stops = vec![request.origin.clone()];
        stops.extend(request.waypoints.iter().cloned());
        stops.push(request.destination.clone());

        Ok(RouteResult {
            overview_polyline: "_p~iF~ps|U_ulLnnqC_mqNvxq`@".into(),
            waypoint_order,
            legs: stops
                .windows(2)
                .map(|pair| RouteLeg {
                    start_address: pair[0].clone(),
                    end_address: pair[1].clone(),
                    distance_meters: 10_000,
                    duration_seconds: 600,
                })
                .collect(),
        })
    }
}

pub fn config(report_dir: &Path) -> Config {
    Config {
        maps: MapsConfig {
            api_base: "maps.invalid".into(),
            api_key: "test-key".into(),
        },
        listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        debounce: DEFAULT_DELAY,
        default_start: None,
        report: ReportConfig {
            dir: report_dir.to_path_buf(),
            ..ReportConfig::default()
        },
    }
}

pub fn engine(maps: &Arc<FakeMaps>) -> Engine {
    engine_with(maps, config(Path::new("target/test-reports")))
}

pub fn engine_with(maps: &Arc<FakeMaps>, config: Config) -> Engine {
    let maps: DynMapService = maps.clone();
    Engine::new(maps, &config)
}
