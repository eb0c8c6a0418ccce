use shelf_db::StoreError;
use sqlx::SqliteConnection;

use super::models::{round_two, Average, NewReading};

pub const CREATE_ROOMS_TABLE: &str =
    "CREATE TABLE IF NOT EXISTS rooms (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL);";

pub const CREATE_TEMPERATURES_TABLE: &str = "CREATE TABLE IF NOT EXISTS temperatures (
    room_id INTEGER NOT NULL REFERENCES rooms(id) ON DELETE CASCADE,
    temperature REAL NOT NULL,
    date TEXT NOT NULL
);";

pub async fn insert_room(conn: &mut SqliteConnection, name: &str) -> Result<i64, StoreError> {
    let id = sqlx::query_scalar::<_, i64>("INSERT INTO rooms (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(conn)
        .await?;
    Ok(id)
}

/// The room must exist; the foreign key rejects the row otherwise.
pub async fn insert_reading(
    conn: &mut SqliteConnection,
    reading: &NewReading,
) -> Result<(), StoreError> {
    sqlx::query("INSERT INTO temperatures (room_id, temperature, date) VALUES (?, ?, ?)")
        .bind(reading.room_id)
        .bind(reading.temperature)
        .bind(reading.date)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn global_average(conn: &mut SqliteConnection) -> Result<Average, StoreError> {
    // Dates are stored as `YYYY-MM-DD ...` text in UTC.
    let (average, days) = sqlx::query_as::<_, (Option<f64>, i64)>(
        "SELECT AVG(temperature), COUNT(DISTINCT substr(date, 1, 10)) FROM temperatures",
    )
    .fetch_one(conn)
    .await?;

    Ok(Average {
        average: average.map(round_two),
        days,
    })
}
