pub mod confirmation;
pub mod directory;
pub mod engine;
pub mod rules;

pub use confirmation::BookingConfirmation;
pub use directory::TrainDirectory;
pub use engine::{BookingEngine, BookingRequest, PassengerInfo};
pub use rules::BookingRules;
