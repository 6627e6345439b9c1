use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;

use tatkal_core::booking::{Booking, NewBooking, Passenger};
use tatkal_core::fare_class::FareClass;
use tatkal_core::repository::{BookingRepository, RepoError};

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn passengers_for(&self, booking_id: i64) -> Result<Vec<Passenger>, RepoError> {
        let rows: Vec<PassengerRow> = sqlx::query_as(
            "SELECT id, name, age, national_id, seat_number FROM passengers \
             WHERE booking_id = $1 ORDER BY id",
        )
        .bind(booking_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Passenger::from).collect())
    }
}

// Row structs for type-safe querying
#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i64,
    pnr: String,
    train_id: i64,
    seat_class: String,
    user_email: String,
    booking_time: DateTime<Utc>,
    travel_date: Option<NaiveDate>,
}

#[derive(sqlx::FromRow)]
struct PassengerRow {
    id: i64,
    name: String,
    age: i32,
    national_id: String,
    seat_number: i32,
}

impl From<PassengerRow> for Passenger {
    fn from(row: PassengerRow) -> Self {
        Passenger {
            id: row.id,
            name: row.name,
            age: row.age,
            national_id: row.national_id,
            seat_number: row.seat_number,
        }
    }
}

impl BookingRow {
    fn into_booking(self, passengers: Vec<Passenger>) -> Result<Booking, RepoError> {
        let seat_class: FareClass = self.seat_class.parse()?;
        Ok(Booking {
            id: self.id,
            pnr: self.pnr,
            train_id: self.train_id,
            seat_class,
            user_email: self.user_email,
            booking_time: self.booking_time,
            travel_date: self.travel_date,
            passengers,
        })
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, RepoError> {
        let mut tx = self.pool.begin().await?;

        let booking_id: i64 = sqlx::query_scalar(
            "INSERT INTO bookings (pnr, train_id, seat_class, user_email, booking_time, travel_date) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&booking.pnr)
        .bind(booking.train_id)
        .bind(booking.seat_class.as_str())
        .bind(&booking.user_email)
        .bind(booking.booking_time)
        .bind(booking.travel_date)
        .fetch_one(&mut *tx)
        .await?;

        let mut passengers = Vec::with_capacity(booking.passengers.len());
        for p in &booking.passengers {
            let passenger_id: i64 = sqlx::query_scalar(
                "INSERT INTO passengers (booking_id, name, age, national_id, seat_number) \
                 VALUES ($1, $2, $3, $4, $5) RETURNING id",
            )
            .bind(booking_id)
            .bind(&p.name)
            .bind(p.age)
            .bind(&p.national_id)
            .bind(p.seat_number)
            .fetch_one(&mut *tx)
            .await?;
            passengers.push(Passenger {
                id: passenger_id,
                name: p.name.clone(),
                age: p.age,
                national_id: p.national_id.clone(),
                seat_number: p.seat_number,
            });
        }

        tx.commit().await?;

        Ok(Booking {
            id: booking_id,
            pnr: booking.pnr,
            train_id: booking.train_id,
            seat_class: booking.seat_class,
            user_email: booking.user_email,
            booking_time: booking.booking_time,
            travel_date: booking.travel_date,
            passengers,
        })
    }

    async fn find_by_pnr(&self, pnr: &str) -> Result<Option<Booking>, RepoError> {
        let row: Option<BookingRow> = sqlx::query_as(
            "SELECT id, pnr, train_id, seat_class, user_email, booking_time, travel_date \
             FROM bookings WHERE pnr = $1",
        )
        .bind(pnr)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let passengers = self.passengers_for(row.id).await?;
                Ok(Some(row.into_booking(passengers)?))
            }
            None => Ok(None),
        }
    }

    async fn pnr_exists(&self, pnr: &str) -> Result<bool, RepoError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM bookings WHERE pnr = $1)")
                .bind(pnr)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    async fn delete_by_pnr(&self, pnr: &str) -> Result<(), RepoError> {
        // Passengers cascade with the booking row.
        sqlx::query("DELETE FROM bookings WHERE pnr = $1")
            .bind(pnr)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, RepoError> {
        let rows: Vec<BookingRow> = sqlx::query_as(
            "SELECT id, pnr, train_id, seat_class, user_email, booking_time, travel_date \
             FROM bookings ORDER BY booking_time DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut bookings = Vec::with_capacity(rows.len());
        for row in rows {
            let passengers = self.passengers_for(row.id).await?;
            bookings.push(row.into_booking(passengers)?);
        }
        Ok(bookings)
    }
}
