use serde::{Deserialize, Serialize};

use crate::utils::non_blank;

/// Stored book row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    /// Assigned by the database on insert
    pub id: i64,
    pub title: String,
    pub author: String,
}

/// Body accepted by create and update; keys are checked by the handler.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookPayload {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookPayload {
    /// Both fields present and non-blank, or `None`.
    pub fn into_fields(self) -> Option<BookFields> {
        Some(BookFields {
            title: non_blank(self.title)?,
            author: non_blank(self.author)?,
        })
    }
}

/// A complete set of writable book fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
}

/// Body of the batch delete request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BatchDelete {
    pub book_ids: Option<Vec<i64>>,
}
