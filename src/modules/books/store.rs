//! SQL for the `books` table. Every function runs on a connection the
//! caller already holds.

use shelf_db::StoreError;
use sqlx::SqliteConnection;

use super::models::{Book, BookFields};

pub const CREATE_BOOKS_TABLE: &str = "CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL
);";

pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Book>, StoreError> {
    let rows = sqlx::query_as::<_, Book>("SELECT id, title, author FROM books")
        .fetch_all(conn)
        .await?;
    Ok(rows)
}

pub async fn find(conn: &mut SqliteConnection, id: i64) -> Result<Book, StoreError> {
    sqlx::query_as::<_, Book>("SELECT id, title, author FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or(StoreError::NotFound)
}

pub async fn exists(conn: &mut SqliteConnection, id: i64) -> Result<bool, StoreError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM books WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

pub async fn insert(conn: &mut SqliteConnection, fields: &BookFields) -> Result<Book, StoreError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO books (title, author) VALUES (?, ?) RETURNING id",
    )
    .bind(&fields.title)
    .bind(&fields.author)
    .fetch_one(conn)
    .await?;

    Ok(Book {
        id,
        title: fields.title.clone(),
        author: fields.author.clone(),
    })
}

/// Full overwrite of both columns. Succeeds even if no row matched; the
/// handler checks existence beforehand.
pub async fn update(
    conn: &mut SqliteConnection,
    id: i64,
    fields: &BookFields,
) -> Result<(), StoreError> {
    sqlx::query("UPDATE books SET title = ?, author = ? WHERE id = ?")
        .bind(&fields.title)
        .bind(&fields.author)
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(())
}

/// Delete every listed id in one statement; returns rows actually removed.
///
/// The ids travel as one JSON array parameter, so the list length is not
/// bounded by SQLite's host parameter limit.
pub async fn delete_many(conn: &mut SqliteConnection, ids: &[i64]) -> Result<u64, StoreError> {
    if ids.is_empty() {
        return Ok(0);
    }

    let encoded = serde_json::to_string(ids)
        .map_err(|e| StoreError::Database(sqlx::Error::Encode(Box::new(e))))?;
    let result = sqlx::query("DELETE FROM books WHERE id IN (SELECT value FROM json_each(?))")
        .bind(encoded)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_all(conn: &mut SqliteConnection) -> Result<(), StoreError> {
    sqlx::query("DELETE FROM books").execute(conn).await?;
    Ok(())
}
