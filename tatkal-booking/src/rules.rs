/// Operator-tunable booking limits, mapped from configuration at startup.
#[derive(Debug, Clone)]
pub struct BookingRules {
    pub max_passengers: usize,
}

impl Default for BookingRules {
    fn default() -> Self {
        Self { max_passengers: 6 }
    }
}
