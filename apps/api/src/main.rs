use std::net::SocketAddr;
use std::sync::Arc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use otp_cell::{sender_from_config, OtpService, RedisOtpStore};
use schedule_cell::{
    EventScheduleOrchestrator, EventService, SlotBlocker, SupabaseDentistDirectory,
    SupabaseEventStore, SupabaseSlotBlocker,
};
use sequence_cell::{CodeGenerator, RedisCounterStore};
use shared_config::AppConfig;
use shared_database::create_redis_pool;

use router::AppServices;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Dental Clinic API server");

    // Load configuration
    let config = AppConfig::from_env();

    let services = build_services(&config).await?;

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(services)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let pool = create_redis_pool(config).await?;

    let codes = Arc::new(CodeGenerator::new(Arc::new(RedisCounterStore::new(pool.clone()))));

    let otp = Arc::new(OtpService::new(
        Arc::new(RedisOtpStore::new(pool)),
        sender_from_config(config),
    ));

    let blocker: Arc<dyn SlotBlocker> = Arc::new(SupabaseSlotBlocker::new(config));
    let events = Arc::new(EventService::new(
        codes.clone(),
        Arc::new(SupabaseEventStore::new(config)),
        Arc::new(SupabaseDentistDirectory::new(config)),
        EventScheduleOrchestrator::new(blocker.clone()),
    ));

    Ok(AppServices {
        codes,
        otp,
        events,
        blocker,
    })
}
