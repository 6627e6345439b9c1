use std::net::SocketAddr;
use std::sync::Arc;

use tatkal_api::{app, AppState, AuthConfig};
use tatkal_booking::{BookingEngine, BookingRules, TrainDirectory};
use tatkal_store::app_config::Config;
use tatkal_store::{DbClient, PgBookingRepository, PgTrainRepository, PgUserRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tatkal_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().expect("Failed to load config");
    tracing::info!("Starting Tatkal API on port {}", config.server.port);

    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    let trains = Arc::new(PgTrainRepository::new(db.pool.clone()));
    let bookings = Arc::new(PgBookingRepository::new(db.pool.clone()));
    let users = Arc::new(PgUserRepository::new(db.pool.clone()));

    let rules = BookingRules {
        max_passengers: config.booking.max_passengers,
    };
    let engine = Arc::new(BookingEngine::new(trains.clone(), bookings.clone(), rules));
    let directory = Arc::new(TrainDirectory::new(trains.clone()));

    let state = AppState {
        users,
        bookings,
        engine,
        directory,
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration_seconds: config.auth.jwt_expiration_seconds,
        },
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app(state))
        .await
        .expect("Server error");
}
