use crate::repository::RepoError;

/// Domain error taxonomy. Everything a booking, search or identity operation
/// can fail with; the API layer maps these onto HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    TrainNotFound(String),

    #[error("{0}")]
    SeatsUnavailable(String),

    /// Covers both "no such booking" and "not your booking". Authorization
    /// failures are indistinguishable from missing PNRs to the caller.
    #[error("PNR not found or unauthorized")]
    BookingNotFound,

    #[error("{0}")]
    DuplicateUser(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("storage error: {0}")]
    Storage(RepoError),
}
