use bus_server::config::ServerConfig;
use bus_server::planner::ResolverConfig;
use bus_server::realtime::{CachedRealtimeClient, RealtimeClient};
use bus_server::schedule::ScheduleStore;
use bus_server::web::{AppState, create_router};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = ServerConfig::from_env();

    // Load the schedule (fail fast if unavailable)
    info!(dir = %config.gtfs_dir.display(), "loading schedule");
    let schedule = ScheduleStore::load(&config.gtfs_dir)
        .await
        .expect("Failed to load GTFS schedule");

    // Spawn background task to reload the schedule
    let schedule_refresh = schedule.clone();
    let refresh_every = config.schedule_refresh;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_every);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            match schedule_refresh.refresh().await {
                Ok(trips) => info!(trips, "refreshed schedule"),
                Err(e) => error!(error = %e, "failed to refresh schedule, keeping previous"),
            }
        }
    });

    // Create cached realtime client
    let realtime_client =
        RealtimeClient::new(config.realtime()).expect("Failed to create realtime client");
    let realtime = CachedRealtimeClient::new(realtime_client, &config.cache());

    // Build app state
    let state = AppState::new(
        schedule,
        realtime,
        ResolverConfig::default(),
        &config.default_agency,
    );

    // Create router
    let app = create_router(state, &config.static_dir);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind listen address");
    info!(addr = %config.bind_addr, "bus trip resolver listening");
    info!("  GET /health                - Health check");
    info!("  GET /api/route-candidates  - Trips between two stops");
    info!("  GET /api/stops             - All stops");

    axum::serve(listener, app).await.expect("Server error");
}
