use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use tatkal_core::allocation;
use tatkal_core::booking::{NewBooking, NewPassenger};
use tatkal_core::error::DomainError;
use tatkal_core::fare_class::FareClass;
use tatkal_core::repository::{BookingRepository, TrainRepository};

use crate::confirmation::BookingConfirmation;
use crate::rules::BookingRules;

/// National id numbers are fixed-length.
pub const NATIONAL_ID_LEN: usize = 12;

// The 36^8 PNR space makes consecutive collisions vanishingly rare; the cap
// turns a broken random source into an error instead of a spin.
const MAX_PNR_ATTEMPTS: usize = 64;

#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub train_id: i64,
    pub seat_class: String,
    pub number_of_tickets: i32,
    pub passengers: Vec<PassengerInfo>,
    #[serde(default)]
    pub travel_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PassengerInfo {
    pub name: String,
    pub age: i32,
    pub national_id: String,
}

/// Orchestrates booking creation, cancellation and PNR lookup over the
/// train and booking repositories.
pub struct BookingEngine {
    trains: Arc<dyn TrainRepository>,
    bookings: Arc<dyn BookingRepository>,
    rules: BookingRules,
}

impl BookingEngine {
    pub fn new(
        trains: Arc<dyn TrainRepository>,
        bookings: Arc<dyn BookingRepository>,
        rules: BookingRules,
    ) -> Self {
        Self {
            trains,
            bookings,
            rules,
        }
    }

    /// Book `number_of_tickets` seats for the authenticated `identity`.
    ///
    /// Validation order: ticket/passenger consistency, train existence,
    /// fare-class parse, then the atomic seat reservation. The reservation
    /// is a single conditional decrement at the repository, so concurrent
    /// requests cannot both pass the availability check.
    pub async fn book_ticket(
        &self,
        request: BookingRequest,
        identity: &str,
    ) -> Result<BookingConfirmation, DomainError> {
        if request.passengers.len() as i32 != request.number_of_tickets {
            warn!(
                passengers = request.passengers.len(),
                tickets = request.number_of_tickets,
                "invalid booking: passenger count does not match ticket count"
            );
            return Err(DomainError::InvalidRequest(
                "Number of tickets must match passenger count".to_string(),
            ));
        }
        if request.passengers.is_empty() || request.passengers.len() > self.rules.max_passengers {
            return Err(DomainError::InvalidRequest(format!(
                "Between 1 and {} passengers allowed per booking",
                self.rules.max_passengers
            )));
        }
        for passenger in &request.passengers {
            validate_passenger(passenger)?;
        }

        let train = self
            .trains
            .find_by_id(request.train_id)
            .await
            .map_err(DomainError::Storage)?
            .ok_or_else(|| {
                DomainError::TrainNotFound(format!(
                    "Train not found with ID: {}",
                    request.train_id
                ))
            })?;

        let seat_class: FareClass = request.seat_class.parse().map_err(|_| {
            warn!(seat_class = %request.seat_class, "invalid seat class");
            DomainError::InvalidRequest(format!("Invalid seat class: {}", request.seat_class))
        })?;

        let remaining = self
            .trains
            .reserve_seats(train.id, seat_class, request.number_of_tickets)
            .await
            .map_err(DomainError::Storage)?
            .ok_or_else(|| {
                warn!(train_id = train.id, class = %seat_class, "no seats available");
                DomainError::SeatsUnavailable(format!(
                    "No seats available in {} for requested {} tickets",
                    seat_class, request.number_of_tickets
                ))
            })?;

        // Seats are ours from here on; any failure before the booking is
        // persisted has to give them back.
        let result = self
            .persist_booking(&request, seat_class, identity)
            .await;
        let booking = match result {
            Ok(booking) => booking,
            Err(err) => {
                if let Err(release_err) = self
                    .trains
                    .release_seats(train.id, seat_class, request.number_of_tickets)
                    .await
                {
                    warn!(train_id = train.id, error = %release_err, "failed to release seats after aborted booking");
                }
                return Err(err);
            }
        };

        info!(pnr = %booking.pnr, user = identity, "booking created");
        Ok(BookingConfirmation::new(
            &booking,
            &train,
            remaining,
            "Booking confirmed successfully!",
        ))
    }

    async fn persist_booking(
        &self,
        request: &BookingRequest,
        seat_class: FareClass,
        identity: &str,
    ) -> Result<tatkal_core::Booking, DomainError> {
        let pnr = self.unique_pnr().await?;
        let seats = allocation::allocate_seats(&mut rand::thread_rng(), request.passengers.len());
        let passengers = request
            .passengers
            .iter()
            .zip(seats)
            .map(|(info, seat_number)| NewPassenger {
                name: info.name.clone(),
                age: info.age,
                national_id: info.national_id.clone(),
                seat_number,
            })
            .collect();

        self.bookings
            .insert(NewBooking {
                pnr,
                train_id: request.train_id,
                seat_class,
                user_email: identity.to_string(),
                booking_time: Utc::now(),
                travel_date: request.travel_date,
                passengers,
            })
            .await
            .map_err(DomainError::Storage)
    }

    /// Draw PNR candidates until one is free in the booking store.
    async fn unique_pnr(&self) -> Result<String, DomainError> {
        for _ in 0..MAX_PNR_ATTEMPTS {
            let candidate = allocation::draw_pnr(&mut rand::thread_rng());
            if !self
                .bookings
                .pnr_exists(&candidate)
                .await
                .map_err(DomainError::Storage)?
            {
                return Ok(candidate);
            }
        }
        Err(DomainError::Storage("PNR space exhausted".into()))
    }

    /// Cancel the booking behind `pnr` if it belongs to `identity`, restoring
    /// its seats to the train. Missing and foreign bookings fail identically.
    pub async fn cancel_by_pnr(&self, pnr: &str, identity: &str) -> Result<(), DomainError> {
        let booking = match self
            .bookings
            .find_by_pnr(pnr)
            .await
            .map_err(DomainError::Storage)?
        {
            Some(booking) if booking.user_email == identity => booking,
            _ => {
                warn!(pnr, user = identity, "booking not found or unauthorized");
                return Err(DomainError::BookingNotFound);
            }
        };

        self.trains
            .release_seats(
                booking.train_id,
                booking.seat_class,
                booking.passengers.len() as i32,
            )
            .await
            .map_err(DomainError::Storage)?;
        self.bookings
            .delete_by_pnr(pnr)
            .await
            .map_err(DomainError::Storage)?;

        info!(pnr, "booking cancelled");
        Ok(())
    }

    /// Look up a booking by PNR. Remaining seats come from the train's live
    /// counters at read time, not from a snapshot.
    pub async fn booking_by_pnr(&self, pnr: &str) -> Result<BookingConfirmation, DomainError> {
        let booking = self
            .bookings
            .find_by_pnr(pnr)
            .await
            .map_err(DomainError::Storage)?
            .ok_or(DomainError::BookingNotFound)?;

        let train = self
            .trains
            .find_by_id(booking.train_id)
            .await
            .map_err(DomainError::Storage)?
            .ok_or_else(|| {
                DomainError::TrainNotFound(format!(
                    "Train not found with ID: {}",
                    booking.train_id
                ))
            })?;

        let remaining = train.seats_available(booking.seat_class);
        Ok(BookingConfirmation::new(
            &booking,
            &train,
            remaining,
            "Booking fetched successfully!",
        ))
    }
}

fn validate_passenger(passenger: &PassengerInfo) -> Result<(), DomainError> {
    if passenger.name.trim().is_empty() {
        return Err(DomainError::InvalidRequest(
            "Passenger name is required".to_string(),
        ));
    }
    if passenger.age < 1 {
        return Err(DomainError::InvalidRequest(
            "Age must be at least 1".to_string(),
        ));
    }
    if passenger.national_id.chars().count() != NATIONAL_ID_LEN {
        return Err(DomainError::InvalidRequest(format!(
            "National id must be {NATIONAL_ID_LEN} characters"
        )));
    }
    Ok(())
}
