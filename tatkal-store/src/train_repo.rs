use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use tatkal_core::fare_class::FareClass;
use tatkal_core::repository::{RepoError, TrainRepository};
use tatkal_core::train::{NewTrain, Train, EVERY_DAY};

pub struct PgTrainRepository {
    pool: PgPool,
}

impl PgTrainRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const TRAIN_COLUMNS: &str = "id, name, number, from_station, to_station, departure_time, \
     arrival_time, running_days, delay_days, scheduled_date, actual_running_date, \
     sleeper, ac3_tier, ac2_tier, ac_first_class, sleeper_seats_available, \
     ac3_tier_seats_available, ac2_tier_seats_available, ac_first_class_seats_available";

// Row struct for type-safe querying
#[derive(sqlx::FromRow)]
struct TrainRow {
    id: i64,
    name: String,
    number: i32,
    from_station: String,
    to_station: String,
    departure_time: Option<NaiveTime>,
    arrival_time: Option<NaiveTime>,
    running_days: String,
    delay_days: Option<i32>,
    scheduled_date: Option<NaiveDate>,
    actual_running_date: Option<NaiveDate>,
    sleeper: bool,
    ac3_tier: bool,
    ac2_tier: bool,
    ac_first_class: bool,
    sleeper_seats_available: i32,
    ac3_tier_seats_available: i32,
    ac2_tier_seats_available: i32,
    ac_first_class_seats_available: i32,
}

impl From<TrainRow> for Train {
    fn from(row: TrainRow) -> Self {
        Train {
            id: row.id,
            name: row.name,
            number: row.number,
            from_station: row.from_station,
            to_station: row.to_station,
            departure_time: row.departure_time,
            arrival_time: row.arrival_time,
            running_days: row.running_days,
            delay_days: row.delay_days,
            scheduled_date: row.scheduled_date,
            actual_running_date: row.actual_running_date,
            sleeper: row.sleeper,
            ac3_tier: row.ac3_tier,
            ac2_tier: row.ac2_tier,
            ac_first_class: row.ac_first_class,
            sleeper_seats_available: row.sleeper_seats_available,
            ac3_tier_seats_available: row.ac3_tier_seats_available,
            ac2_tier_seats_available: row.ac2_tier_seats_available,
            ac_first_class_seats_available: row.ac_first_class_seats_available,
        }
    }
}

/// Column pair (offered flag, seat counter) backing a fare class.
fn seat_columns(class: FareClass) -> (&'static str, &'static str) {
    match class {
        FareClass::Sleeper => ("sleeper", "sleeper_seats_available"),
        FareClass::Ac3Tier => ("ac3_tier", "ac3_tier_seats_available"),
        FareClass::Ac2Tier => ("ac2_tier", "ac2_tier_seats_available"),
        FareClass::AcFirstClass => ("ac_first_class", "ac_first_class_seats_available"),
    }
}

#[async_trait]
impl TrainRepository for PgTrainRepository {
    async fn insert(&self, train: NewTrain) -> Result<Train, RepoError> {
        let sql = format!(
            "INSERT INTO trains (name, number, from_station, to_station, departure_time, \
             arrival_time, running_days, delay_days, scheduled_date, actual_running_date, \
             sleeper, ac3_tier, ac2_tier, ac_first_class, sleeper_seats_available, \
             ac3_tier_seats_available, ac2_tier_seats_available, ac_first_class_seats_available) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18) \
             RETURNING {TRAIN_COLUMNS}"
        );
        let row: TrainRow = sqlx::query_as(&sql)
            .bind(&train.name)
            .bind(train.number)
            .bind(&train.from_station)
            .bind(&train.to_station)
            .bind(train.departure_time)
            .bind(train.arrival_time)
            .bind(&train.running_days)
            .bind(train.delay_days)
            .bind(train.scheduled_date)
            .bind(train.actual_running_date)
            .bind(train.sleeper)
            .bind(train.ac3_tier)
            .bind(train.ac2_tier)
            .bind(train.ac_first_class)
            .bind(train.sleeper_seats_available)
            .bind(train.ac3_tier_seats_available)
            .bind(train.ac2_tier_seats_available)
            .bind(train.ac_first_class_seats_available)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Train>, RepoError> {
        let sql = format!("SELECT {TRAIN_COLUMNS} FROM trains WHERE id = $1");
        let row: Option<TrainRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Train::from))
    }

    async fn search_by_day(
        &self,
        source: &str,
        destination: &str,
        day_letter: char,
    ) -> Result<Vec<Train>, RepoError> {
        let sql = format!(
            "SELECT {TRAIN_COLUMNS} FROM trains \
             WHERE LOWER(from_station) = LOWER($1) \
               AND LOWER(to_station) = LOWER($2) \
               AND (running_days LIKE '%' || $3 || '%' OR running_days = $4) \
             ORDER BY id"
        );
        let rows: Vec<TrainRow> = sqlx::query_as(&sql)
            .bind(source)
            .bind(destination)
            .bind(day_letter.to_string())
            .bind(EVERY_DAY)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Train::from).collect())
    }

    async fn reserve_seats(
        &self,
        train_id: i64,
        class: FareClass,
        count: i32,
    ) -> Result<Option<i32>, RepoError> {
        let (flag, seats) = seat_columns(class);
        // Check and decrement in one statement; concurrent requests serialize
        // on the row and cannot both pass the availability predicate.
        let sql = format!(
            "UPDATE trains SET {seats} = {seats} - $1 \
             WHERE id = $2 AND {flag} AND {seats} >= $1 \
             RETURNING {seats}"
        );
        let remaining: Option<(i32,)> = sqlx::query_as(&sql)
            .bind(count)
            .bind(train_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(remaining.map(|r| r.0))
    }

    async fn release_seats(
        &self,
        train_id: i64,
        class: FareClass,
        count: i32,
    ) -> Result<(), RepoError> {
        let (_, seats) = seat_columns(class);
        let sql = format!("UPDATE trains SET {seats} = {seats} + $1 WHERE id = $2");
        sqlx::query(&sql)
            .bind(count)
            .bind(train_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
