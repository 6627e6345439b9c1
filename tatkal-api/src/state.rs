use std::sync::Arc;

use tatkal_booking::{BookingEngine, TrainDirectory};
use tatkal_core::repository::{BookingRepository, UserRepository};

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration_seconds: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub engine: Arc<BookingEngine>,
    pub directory: Arc<TrainDirectory>,
    pub auth: AuthConfig,
}
