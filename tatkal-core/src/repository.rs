use async_trait::async_trait;

use crate::booking::{Booking, NewBooking};
use crate::fare_class::FareClass;
use crate::train::{NewTrain, Train};
use crate::user::{NewUser, User};

pub type RepoError = Box<dyn std::error::Error + Send + Sync>;

/// Repository trait for train data access.
#[async_trait]
pub trait TrainRepository: Send + Sync {
    async fn insert(&self, train: NewTrain) -> Result<Train, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Train>, RepoError>;

    /// Case-insensitive exact route match, filtered to trains running on the
    /// day identified by `day_letter` (or carrying the every-day sentinel).
    async fn search_by_day(
        &self,
        source: &str,
        destination: &str,
        day_letter: char,
    ) -> Result<Vec<Train>, RepoError>;

    /// Atomically decrement the class counter by `count` iff the class is
    /// offered and enough seats remain. Returns the post-decrement counter,
    /// or None when the reservation cannot be satisfied. Implementations
    /// must not separate the availability check from the decrement.
    async fn reserve_seats(
        &self,
        train_id: i64,
        class: FareClass,
        count: i32,
    ) -> Result<Option<i32>, RepoError>;

    /// Unconditionally return `count` seats to the class counter.
    async fn release_seats(
        &self,
        train_id: i64,
        class: FareClass,
        count: i32,
    ) -> Result<(), RepoError>;
}

/// Repository trait for booking data access.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist the booking and its passengers as one unit.
    async fn insert(&self, booking: NewBooking) -> Result<Booking, RepoError>;

    async fn find_by_pnr(&self, pnr: &str) -> Result<Option<Booking>, RepoError>;

    async fn pnr_exists(&self, pnr: &str) -> Result<bool, RepoError>;

    /// Delete the booking; its passengers go with it.
    async fn delete_by_pnr(&self, pnr: &str) -> Result<(), RepoError>;

    async fn list_all(&self) -> Result<Vec<Booking>, RepoError>;
}

/// Repository trait for user data access.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn insert(&self, user: NewUser) -> Result<User, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn email_exists(&self, email: &str) -> Result<bool, RepoError>;

    async fn username_exists(&self, username: &str) -> Result<bool, RepoError>;
}
