pub mod allocation;
pub mod booking;
pub mod error;
pub mod fare_class;
pub mod pii;
pub mod repository;
pub mod train;
pub mod user;

pub use booking::{Booking, NewBooking, NewPassenger, Passenger};
pub use error::DomainError;
pub use fare_class::FareClass;
pub use train::{NewTrain, Train};
pub use user::{NewUser, Role, User, UserView};
