use chrono::{DateTime, Utc};
use serde::Serialize;

use tatkal_core::booking::{Booking, Passenger};
use tatkal_core::fare_class::FareClass;
use tatkal_core::pii::mask_national_id;
use tatkal_core::train::Train;

pub const STATUS_SUCCESS: &str = "SUCCESS";

/// View returned to the caller after booking, and by PNR status lookups.
#[derive(Debug, Serialize)]
pub struct BookingConfirmation {
    pub pnr: String,
    pub seat_class: FareClass,
    pub booking_time: DateTime<Utc>,
    pub train: TrainDetails,
    pub passengers: Vec<PassengerView>,
    pub status: String,
    pub message: String,
    pub remaining_seats: i32,
}

#[derive(Debug, Serialize)]
pub struct TrainDetails {
    pub name: String,
    pub from_station: String,
    pub to_station: String,
}

/// Passenger as shown to callers; the national id is masked.
#[derive(Debug, Serialize)]
pub struct PassengerView {
    pub name: String,
    pub age: i32,
    pub national_id: String,
    pub seat_number: i32,
}

impl From<&Passenger> for PassengerView {
    fn from(p: &Passenger) -> Self {
        Self {
            name: p.name.clone(),
            age: p.age,
            national_id: mask_national_id(&p.national_id),
            seat_number: p.seat_number,
        }
    }
}

impl BookingConfirmation {
    pub fn new(booking: &Booking, train: &Train, remaining_seats: i32, message: &str) -> Self {
        Self {
            pnr: booking.pnr.clone(),
            seat_class: booking.seat_class,
            booking_time: booking.booking_time,
            train: TrainDetails {
                name: train.name.clone(),
                from_station: train.from_station.clone(),
                to_station: train.to_station.clone(),
            },
            passengers: booking.passengers.iter().map(PassengerView::from).collect(),
            status: STATUS_SUCCESS.to_string(),
            message: message.to_string(),
            remaining_seats,
        }
    }
}
