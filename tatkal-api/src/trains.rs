use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use tatkal_booking::confirmation::PassengerView;
use tatkal_core::booking::Booking;
use tatkal_core::fare_class::FareClass;
use tatkal_core::repository::BookingRepository;
use tatkal_core::train::{NewTrain, Train};
use tatkal_core::DomainError;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub source: Option<String>,
    pub destination: Option<String>,
    pub date: Option<String>,
}

/// GET /trains/search?source&destination&date
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Train>>, ApiError> {
    let (Some(source), Some(destination), Some(date)) =
        (params.source, params.destination, params.date)
    else {
        return Err(DomainError::InvalidRequest(
            "Source, destination, and date are required".to_string(),
        )
        .into());
    };

    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|_| {
        DomainError::InvalidRequest("Invalid date format. Expected yyyy-MM-dd".to_string())
    })?;

    let trains = state.directory.find_trains(&source, &destination, date).await?;
    Ok(Json(trains))
}

/// POST /trains (admin)
pub async fn add_train(
    State(state): State<AppState>,
    Json(train): Json<NewTrain>,
) -> Result<Json<Value>, ApiError> {
    state.directory.save_train(train).await?;
    Ok(Json(json!({ "message": "Train saved successfully" })))
}

/// Booking as listed to operators; passenger ids are masked like every
/// other outward surface.
#[derive(Debug, Serialize)]
pub struct BookingSummary {
    pub pnr: String,
    pub train_id: i64,
    pub seat_class: FareClass,
    pub user_email: String,
    pub booking_time: DateTime<Utc>,
    pub travel_date: Option<NaiveDate>,
    pub passengers: Vec<PassengerView>,
}

impl From<&Booking> for BookingSummary {
    fn from(booking: &Booking) -> Self {
        Self {
            pnr: booking.pnr.clone(),
            train_id: booking.train_id,
            seat_class: booking.seat_class,
            user_email: booking.user_email.clone(),
            booking_time: booking.booking_time,
            travel_date: booking.travel_date,
            passengers: booking.passengers.iter().map(PassengerView::from).collect(),
        }
    }
}

/// GET /trains/bookings (admin)
pub async fn all_bookings(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookingSummary>>, ApiError> {
    let bookings = state
        .bookings
        .list_all()
        .await
        .map_err(DomainError::Storage)?;
    Ok(Json(bookings.iter().map(BookingSummary::from).collect()))
}
