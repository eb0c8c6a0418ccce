//! HTTP handlers for the books module.
//!
//! Each handler validates its input, takes one connection for the request,
//! runs its statements, and turns the outcome into an envelope. The
//! connection is released when the guard drops, on success and error alike.

use axum::{
    extract::State,
    routing::{delete, get},
    Router,
};
use shelf_db::Database;
use shelf_http::{AppError, IdPath, JsonBody, Reply};

use super::models::{BatchDelete, BookPayload};
use super::store;

pub const BOOK_NOT_FOUND: &str = "Livro não encontrado.";
pub const FIELDS_REQUIRED: &str = "Os campos 'title' e 'author' são obrigatórios.";
pub const IDS_REQUIRED: &str = "A lista 'book_ids' é obrigatória e não pode estar vazia.";

pub fn router(db: Database) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/delete", delete(delete_books))
        .route("/delete-all-books", delete(delete_all_books))
        .route(
            "/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(db)
}

/// All rows; an empty table answers `data: 0`.
async fn list_books(State(db): State<Database>) -> Result<Reply, AppError> {
    let mut conn = db.acquire().await?;
    let books = store::list(&mut conn).await?;

    if books.is_empty() {
        return Reply::ok()
            .with_data(&0)
            .map(|reply| reply.with_message("Nenhum livro cadastrado."));
    }

    Reply::ok().with_data(&books)
}

async fn get_book(State(db): State<Database>, IdPath(id): IdPath) -> Result<Reply, AppError> {
    let mut conn = db.acquire().await?;
    let book = store::find(&mut conn, id)
        .await
        .map_err(|e| AppError::from_store(e, BOOK_NOT_FOUND))?;

    Reply::ok().with_data(&book)
}

async fn create_book(
    State(db): State<Database>,
    JsonBody(payload): JsonBody<BookPayload>,
) -> Result<Reply, AppError> {
    let fields = payload
        .into_fields()
        .ok_or_else(|| AppError::validation(FIELDS_REQUIRED))?;

    let mut conn = db.acquire().await?;
    let book = store::insert(&mut conn, &fields).await?;

    tracing::info!(book_id = book.id, "book created");
    Ok(Reply::created()
        .with_data(&book)?
        .with_message("Livro criado com sucesso."))
}

/// Existence check and overwrite are separate statements; a concurrent
/// delete between them goes unnoticed.
async fn update_book(
    State(db): State<Database>,
    IdPath(id): IdPath,
    JsonBody(payload): JsonBody<BookPayload>,
) -> Result<Reply, AppError> {
    let fields = payload
        .into_fields()
        .ok_or_else(|| AppError::validation(FIELDS_REQUIRED))?;

    let mut conn = db.acquire().await?;
    if !store::exists(&mut conn, id).await? {
        return Err(AppError::not_found(BOOK_NOT_FOUND));
    }
    store::update(&mut conn, id, &fields).await?;

    tracing::info!(book_id = id, "book updated");
    Ok(Reply::ok().with_message("Livro atualizado com sucesso."))
}

async fn delete_book(State(db): State<Database>, IdPath(id): IdPath) -> Result<Reply, AppError> {
    let mut conn = db.acquire().await?;
    if !store::exists(&mut conn, id).await? {
        return Err(AppError::not_found(BOOK_NOT_FOUND));
    }
    store::delete(&mut conn, id).await?;

    tracing::info!(book_id = id, "book deleted");
    Ok(Reply::ok().with_message("Livro excluído com sucesso."))
}

/// Reports how many ids were requested, not how many rows went away.
async fn delete_books(
    State(db): State<Database>,
    body: Result<JsonBody<BatchDelete>, AppError>,
) -> Result<Reply, AppError> {
    let ids = requested_ids(body)?;

    let mut conn = db.acquire().await?;
    let removed = store::delete_many(&mut conn, &ids).await?;

    tracing::info!(requested = ids.len(), removed, "books batch deleted");
    Ok(Reply::ok().with_message(format!(
        "{} livros foram excluídos com sucesso.",
        ids.len()
    )))
}

/// Non-empty `book_ids` from the body. An unreadable body is logged and
/// reported the same way as a missing list.
fn requested_ids(body: Result<JsonBody<BatchDelete>, AppError>) -> Result<Vec<i64>, AppError> {
    let batch = match body {
        Ok(JsonBody(batch)) => batch,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "unreadable batch delete body");
            return Err(AppError::validation(IDS_REQUIRED));
        }
    };

    batch
        .book_ids
        .filter(|ids| !ids.is_empty())
        .ok_or_else(|| AppError::validation(IDS_REQUIRED))
}

async fn delete_all_books(State(db): State<Database>) -> Result<Reply, AppError> {
    let mut conn = db.acquire().await?;
    store::delete_all(&mut conn).await?;

    tracing::info!("all books deleted");
    Ok(Reply::ok().with_message("Todos os livros foram excluídos."))
}
