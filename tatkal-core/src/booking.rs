use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::fare_class::FareClass;

/// A confirmed reservation. Immutable once created; the PNR is the public
/// identifier handed back to the customer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub pnr: String,
    pub train_id: i64,
    pub seat_class: FareClass,
    pub user_email: String,
    pub booking_time: DateTime<Utc>,
    pub travel_date: Option<NaiveDate>,
    /// Owned by the booking; deleted with it.
    pub passengers: Vec<Passenger>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Passenger {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub national_id: String,
    pub seat_number: i32,
}

/// Write model for persisting a booking together with its passengers.
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub pnr: String,
    pub train_id: i64,
    pub seat_class: FareClass,
    pub user_email: String,
    pub booking_time: DateTime<Utc>,
    pub travel_date: Option<NaiveDate>,
    pub passengers: Vec<NewPassenger>,
}

#[derive(Debug, Clone)]
pub struct NewPassenger {
    pub name: String,
    pub age: i32,
    pub national_id: String,
    pub seat_number: i32,
}
