use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use tatkal_core::error::DomainError;
use tatkal_core::repository::TrainRepository;
use tatkal_core::train::{day_letter, NewTrain, Train, EVERY_DAY};

/// Lookup and persistence of trains by route and day of week.
pub struct TrainDirectory {
    trains: Arc<dyn TrainRepository>,
}

impl TrainDirectory {
    pub fn new(trains: Arc<dyn TrainRepository>) -> Self {
        Self { trains }
    }

    /// Find trains on the route running on the travel date's weekday.
    /// Station matching is case-insensitive and exact.
    pub async fn find_trains(
        &self,
        source: &str,
        destination: &str,
        date: NaiveDate,
    ) -> Result<Vec<Train>, DomainError> {
        if source.trim().is_empty() || destination.trim().is_empty() {
            warn!(source, destination, "invalid search parameters");
            return Err(DomainError::InvalidRequest(
                "Source, destination, and date are required".to_string(),
            ));
        }

        let day = day_letter(date.weekday());
        let trains = self
            .trains
            .search_by_day(source, destination, day)
            .await
            .map_err(DomainError::Storage)?;

        if trains.is_empty() {
            info!(source, destination, %date, "no trains found");
            return Err(DomainError::TrainNotFound(format!(
                "No trains found from {source} to {destination} on {date}"
            )));
        }
        info!(count = trains.len(), source, destination, %date, "trains found");
        Ok(trains)
    }

    /// Persist a new train after validating its shape.
    pub async fn save_train(&self, train: NewTrain) -> Result<Train, DomainError> {
        validate_train(&train)?;
        info!(name = %train.name, number = train.number, "saving train");
        self.trains.insert(train).await.map_err(DomainError::Storage)
    }
}

fn validate_train(train: &NewTrain) -> Result<(), DomainError> {
    if train.name.trim().is_empty() {
        return Err(DomainError::InvalidRequest(
            "Train name is required".to_string(),
        ));
    }
    if train.from_station.trim().is_empty() || train.to_station.trim().is_empty() {
        return Err(DomainError::InvalidRequest(
            "Source and destination stations are required".to_string(),
        ));
    }
    if train.number < 10000 {
        return Err(DomainError::InvalidRequest(
            "Train number should be at least 5 digits".to_string(),
        ));
    }
    if train.running_days.is_empty()
        || !train
            .running_days
            .chars()
            .all(|c| EVERY_DAY.contains(c))
    {
        return Err(DomainError::InvalidRequest(
            "Invalid running days format".to_string(),
        ));
    }
    if train.delay_days.is_some_and(|d| d < 0) {
        return Err(DomainError::InvalidRequest(
            "Delay days cannot be negative".to_string(),
        ));
    }
    let counters = [
        train.sleeper_seats_available,
        train.ac3_tier_seats_available,
        train.ac2_tier_seats_available,
        train.ac_first_class_seats_available,
    ];
    if counters.iter().any(|&c| c < 0) {
        return Err(DomainError::InvalidRequest(
            "Seat counts cannot be negative".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_train() -> NewTrain {
        NewTrain {
            name: "Rajdhani Express".to_string(),
            number: 12951,
            from_station: "Delhi".to_string(),
            to_station: "Mumbai".to_string(),
            departure_time: None,
            arrival_time: None,
            running_days: "MTW".to_string(),
            delay_days: None,
            scheduled_date: None,
            actual_running_date: None,
            sleeper: true,
            ac3_tier: false,
            ac2_tier: false,
            ac_first_class: false,
            sleeper_seats_available: 10,
            ac3_tier_seats_available: 0,
            ac2_tier_seats_available: 0,
            ac_first_class_seats_available: 0,
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_train() {
        assert!(validate_train(&new_train()).is_ok());
    }

    #[test]
    fn test_validate_rejects_low_train_number() {
        let mut train = new_train();
        train.number = 9999;
        assert!(validate_train(&train).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_running_days() {
        let mut train = new_train();
        train.running_days = "MXW".to_string();
        assert!(validate_train(&train).is_err());
        train.running_days = String::new();
        assert!(validate_train(&train).is_err());
    }

    #[test]
    fn test_validate_rejects_negative_counters() {
        let mut train = new_train();
        train.ac2_tier_seats_available = -1;
        assert!(validate_train(&train).is_err());
    }
}
