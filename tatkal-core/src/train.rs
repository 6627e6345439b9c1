use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::fare_class::FareClass;

/// Running-days value meaning the train operates every day of the week.
pub const EVERY_DAY: &str = "MTWTFSS";

/// A train with per-class seat counters. Counters track aggregate
/// availability only; there is no train-wide seat map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    pub id: i64,
    pub name: String,
    pub number: i32,
    pub from_station: String,
    pub to_station: String,
    pub departure_time: Option<NaiveTime>,
    pub arrival_time: Option<NaiveTime>,
    pub running_days: String,
    pub delay_days: Option<i32>,
    pub scheduled_date: Option<NaiveDate>,
    pub actual_running_date: Option<NaiveDate>,
    pub sleeper: bool,
    pub ac3_tier: bool,
    pub ac2_tier: bool,
    pub ac_first_class: bool,
    pub sleeper_seats_available: i32,
    pub ac3_tier_seats_available: i32,
    pub ac2_tier_seats_available: i32,
    pub ac_first_class_seats_available: i32,
}

/// Write model for persisting a new train.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTrain {
    pub name: String,
    pub number: i32,
    pub from_station: String,
    pub to_station: String,
    #[serde(default)]
    pub departure_time: Option<NaiveTime>,
    #[serde(default)]
    pub arrival_time: Option<NaiveTime>,
    pub running_days: String,
    #[serde(default)]
    pub delay_days: Option<i32>,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub actual_running_date: Option<NaiveDate>,
    #[serde(default)]
    pub sleeper: bool,
    #[serde(default)]
    pub ac3_tier: bool,
    #[serde(default)]
    pub ac2_tier: bool,
    #[serde(default)]
    pub ac_first_class: bool,
    #[serde(default)]
    pub sleeper_seats_available: i32,
    #[serde(default)]
    pub ac3_tier_seats_available: i32,
    #[serde(default)]
    pub ac2_tier_seats_available: i32,
    #[serde(default)]
    pub ac_first_class_seats_available: i32,
}

impl Train {
    pub fn class_offered(&self, class: FareClass) -> bool {
        match class {
            FareClass::Sleeper => self.sleeper,
            FareClass::Ac3Tier => self.ac3_tier,
            FareClass::Ac2Tier => self.ac2_tier,
            FareClass::AcFirstClass => self.ac_first_class,
        }
    }

    pub fn seats_available(&self, class: FareClass) -> i32 {
        match class {
            FareClass::Sleeper => self.sleeper_seats_available,
            FareClass::Ac3Tier => self.ac3_tier_seats_available,
            FareClass::Ac2Tier => self.ac2_tier_seats_available,
            FareClass::AcFirstClass => self.ac_first_class_seats_available,
        }
    }

    fn counter_mut(&mut self, class: FareClass) -> &mut i32 {
        match class {
            FareClass::Sleeper => &mut self.sleeper_seats_available,
            FareClass::Ac3Tier => &mut self.ac3_tier_seats_available,
            FareClass::Ac2Tier => &mut self.ac2_tier_seats_available,
            FareClass::AcFirstClass => &mut self.ac_first_class_seats_available,
        }
    }

    /// Decrement the class counter by `count` iff the class is offered and
    /// enough seats remain. Returns false without mutating otherwise.
    pub fn reserve(&mut self, class: FareClass, count: i32) -> bool {
        if !self.class_offered(class) || self.seats_available(class) < count {
            return false;
        }
        *self.counter_mut(class) -= count;
        true
    }

    /// Increment the class counter by `count`. No upper bound is enforced;
    /// cancellations can only return seats that a booking took out.
    pub fn release(&mut self, class: FareClass, count: i32) {
        *self.counter_mut(class) += count;
    }

    /// Whether the train operates on the day identified by `day_letter`.
    pub fn runs_on(&self, day_letter: char) -> bool {
        self.running_days == EVERY_DAY || self.running_days.contains(day_letter)
    }
}

/// Positional day letter of the `MTWTFSS` running-days encoding.
/// Tuesday/Thursday share T and Saturday/Sunday share S by construction.
pub fn day_letter(weekday: Weekday) -> char {
    match weekday {
        Weekday::Mon => 'M',
        Weekday::Tue | Weekday::Thu => 'T',
        Weekday::Wed => 'W',
        Weekday::Fri => 'F',
        Weekday::Sat | Weekday::Sun => 'S',
    }
}
