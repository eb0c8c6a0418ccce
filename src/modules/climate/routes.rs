//! HTTP handlers for rooms and their temperature readings.

use axum::{
    extract::State,
    routing::{get, post},
    Router,
};
use serde_json::json;
use shelf_db::Database;
use shelf_http::{AppError, JsonBody, Reply};
use time::OffsetDateTime;

use super::models::{ReadingError, ReadingPayload, RoomPayload};
use super::store;
use crate::utils::non_blank;

pub fn router(db: Database) -> Router {
    Router::new()
        .route("/room", post(create_room))
        .route("/temperature", post(add_temperature))
        .route("/average", get(global_average))
        .with_state(db)
}

async fn create_room(
    State(db): State<Database>,
    JsonBody(payload): JsonBody<RoomPayload>,
) -> Result<Reply, AppError> {
    let name =
        non_blank(payload.name).ok_or_else(|| AppError::validation("The field 'name' is required."))?;

    let mut conn = db.acquire().await?;
    let id = store::insert_room(&mut conn, &name).await?;

    tracing::info!(room_id = id, room = %name, "room created");
    Ok(Reply::created()
        .with_data(&json!({ "id": id }))?
        .with_message(format!("Room {name} created.")))
}

async fn add_temperature(
    State(db): State<Database>,
    JsonBody(payload): JsonBody<ReadingPayload>,
) -> Result<Reply, AppError> {
    let reading = payload
        .into_reading(OffsetDateTime::now_utc())
        .map_err(|e| match e {
            ReadingError::MissingFields => {
                AppError::validation("The fields 'room' and 'temperature' are required.")
            }
            ReadingError::BadDate(text) => AppError::validation(format!(
                "Invalid date '{text}'; expected MM-DD-YYYY HH:MM:SS."
            )),
        })?;

    let mut conn = db.acquire().await?;
    store::insert_reading(&mut conn, &reading).await?;

    tracing::info!(room_id = reading.room_id, "temperature added");
    Ok(Reply::created().with_message("Temperature added."))
}

async fn global_average(State(db): State<Database>) -> Result<Reply, AppError> {
    let mut conn = db.acquire().await?;
    let summary = store::global_average(&mut conn).await?;

    Reply::ok().with_data(&summary)
}
