use marquee_api::{app, AppState};
use marquee_booking::{AvailabilityView, BookingAllocator};
use marquee_catalog::PricingEngine;
use marquee_store::{Config, DbClient};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Starting Marquee API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url).await?;
    db.migrate().await?;

    let rules = config.booking_rules.clone();
    let allocator = BookingAllocator::new(
        db.pool.clone(),
        PricingEngine::new(rules.seat_multipliers),
        Duration::from_millis(rules.claim_timeout_ms),
    );
    let availability = AvailabilityView::new(db.pool.clone());

    let state = AppState {
        db,
        allocator: Arc::new(allocator),
        availability: Arc::new(availability),
    };

    let app = app(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
