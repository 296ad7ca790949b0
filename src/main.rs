use std::process;
use std::sync::Arc;

use travel_planner::config::Config;
use travel_planner::engine::Engine;
use travel_planner::external::{DynMapService, GoogleMaps};
use travel_planner::server::serve;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            process::exit(1);
        }
    };

    let maps: DynMapService = Arc::new(GoogleMaps::new(&config.maps));
    let engine = Arc::new(Engine::new(maps, &config));

    if let Err(err) = serve(engine.clone(), config.listen_addr).await {
        tracing::error!(%err, "server stopped");
    }

    engine.shutdown();
}
