//! In-memory repository implementations.
//!
//! Back the engine and API test suites without a database. The train map's
//! mutex is held across check-and-decrement, giving `reserve_seats` the same
//! atomicity the SQL conditional update provides.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tatkal_core::booking::{Booking, NewBooking, Passenger};
use tatkal_core::fare_class::FareClass;
use tatkal_core::repository::{
    BookingRepository, RepoError, TrainRepository, UserRepository,
};
use tatkal_core::train::{NewTrain, Train};
use tatkal_core::user::{NewUser, User};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepoError> {
    mutex.lock().map_err(|_| "repository lock poisoned".into())
}

#[derive(Default)]
pub struct MemoryTrainRepository {
    trains: Mutex<HashMap<i64, Train>>,
    next_id: AtomicI64,
}

impl MemoryTrainRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TrainRepository for MemoryTrainRepository {
    async fn insert(&self, train: NewTrain) -> Result<Train, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let train = Train {
            id,
            name: train.name,
            number: train.number,
            from_station: train.from_station,
            to_station: train.to_station,
            departure_time: train.departure_time,
            arrival_time: train.arrival_time,
            running_days: train.running_days,
            delay_days: train.delay_days,
            scheduled_date: train.scheduled_date,
            actual_running_date: train.actual_running_date,
            sleeper: train.sleeper,
            ac3_tier: train.ac3_tier,
            ac2_tier: train.ac2_tier,
            ac_first_class: train.ac_first_class,
            sleeper_seats_available: train.sleeper_seats_available,
            ac3_tier_seats_available: train.ac3_tier_seats_available,
            ac2_tier_seats_available: train.ac2_tier_seats_available,
            ac_first_class_seats_available: train.ac_first_class_seats_available,
        };
        lock(&self.trains)?.insert(id, train.clone());
        Ok(train)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Train>, RepoError> {
        Ok(lock(&self.trains)?.get(&id).cloned())
    }

    async fn search_by_day(
        &self,
        source: &str,
        destination: &str,
        day_letter: char,
    ) -> Result<Vec<Train>, RepoError> {
        let trains = lock(&self.trains)?;
        let mut matches: Vec<Train> = trains
            .values()
            .filter(|t| {
                t.from_station.eq_ignore_ascii_case(source)
                    && t.to_station.eq_ignore_ascii_case(destination)
                    && t.runs_on(day_letter)
            })
            .cloned()
            .collect();
        matches.sort_by_key(|t| t.id);
        Ok(matches)
    }

    async fn reserve_seats(
        &self,
        train_id: i64,
        class: FareClass,
        count: i32,
    ) -> Result<Option<i32>, RepoError> {
        let mut trains = lock(&self.trains)?;
        let Some(train) = trains.get_mut(&train_id) else {
            return Ok(None);
        };
        if train.reserve(class, count) {
            Ok(Some(train.seats_available(class)))
        } else {
            Ok(None)
        }
    }

    async fn release_seats(
        &self,
        train_id: i64,
        class: FareClass,
        count: i32,
    ) -> Result<(), RepoError> {
        let mut trains = lock(&self.trains)?;
        if let Some(train) = trains.get_mut(&train_id) {
            train.release(class, count);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryBookingRepository {
    bookings: Mutex<HashMap<String, Booking>>,
    next_id: AtomicI64,
}

impl MemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    async fn insert(&self, booking: NewBooking) -> Result<Booking, RepoError> {
        let mut bookings = lock(&self.bookings)?;
        if bookings.contains_key(&booking.pnr) {
            return Err(format!("duplicate pnr: {}", booking.pnr).into());
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let passengers = booking
            .passengers
            .into_iter()
            .enumerate()
            .map(|(i, p)| Passenger {
                id: id * 100 + i as i64,
                name: p.name,
                age: p.age,
                national_id: p.national_id,
                seat_number: p.seat_number,
            })
            .collect();
        let booking = Booking {
            id,
            pnr: booking.pnr,
            train_id: booking.train_id,
            seat_class: booking.seat_class,
            user_email: booking.user_email,
            booking_time: booking.booking_time,
            travel_date: booking.travel_date,
            passengers,
        };
        bookings.insert(booking.pnr.clone(), booking.clone());
        Ok(booking)
    }

    async fn find_by_pnr(&self, pnr: &str) -> Result<Option<Booking>, RepoError> {
        Ok(lock(&self.bookings)?.get(pnr).cloned())
    }

    async fn pnr_exists(&self, pnr: &str) -> Result<bool, RepoError> {
        Ok(lock(&self.bookings)?.contains_key(pnr))
    }

    async fn delete_by_pnr(&self, pnr: &str) -> Result<(), RepoError> {
        lock(&self.bookings)?.remove(pnr);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Booking>, RepoError> {
        let bookings = lock(&self.bookings)?;
        let mut all: Vec<Booking> = bookings.values().cloned().collect();
        all.sort_by(|a, b| b.booking_time.cmp(&a.booking_time));
        Ok(all)
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError> {
        let mut users = lock(&self.users)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            password_hash: user.password_hash,
            phone_number: user.phone_number,
            role: user.role,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(lock(&self.users)?
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, RepoError> {
        Ok(lock(&self.users)?.iter().any(|u| u.email == email))
    }

    async fn username_exists(&self, username: &str) -> Result<bool, RepoError> {
        Ok(lock(&self.users)?.iter().any(|u| u.username == username))
    }
}
