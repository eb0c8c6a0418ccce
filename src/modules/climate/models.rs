use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime, PrimitiveDateTime};

/// Body of `POST /api/room`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomPayload {
    pub name: Option<String>,
}

/// Body of `POST /api/temperature`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadingPayload {
    pub room: Option<i64>,
    pub temperature: Option<f64>,
    /// `MM-DD-YYYY HH:MM:SS`, read as UTC
    pub date: Option<String>,
}

/// A validated reading ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReading {
    pub room_id: i64,
    pub temperature: f64,
    pub date: OffsetDateTime,
}

/// Global summary over every reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Average {
    /// Mean temperature rounded to two decimals; `None` without readings
    pub average: Option<f64>,
    /// Distinct calendar days that have at least one reading
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadingError {
    MissingFields,
    BadDate(String),
}

impl ReadingPayload {
    /// Validate the body; a missing date becomes the current UTC time.
    pub fn into_reading(self, now: OffsetDateTime) -> Result<NewReading, ReadingError> {
        let (Some(room_id), Some(temperature)) = (self.room, self.temperature) else {
            return Err(ReadingError::MissingFields);
        };

        let date = match self.date {
            Some(text) => parse_reading_date(&text)?,
            None => now,
        };

        Ok(NewReading {
            room_id,
            temperature,
            date,
        })
    }
}

fn parse_reading_date(text: &str) -> Result<OffsetDateTime, ReadingError> {
    PrimitiveDateTime::parse(
        text,
        format_description!("[month]-[day]-[year] [hour]:[minute]:[second]"),
    )
    .map(PrimitiveDateTime::assume_utc)
    .map_err(|_| ReadingError::BadDate(text.to_string()))
}

pub fn round_two(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
