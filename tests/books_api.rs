mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;

use common::{app, send, send_request};

async fn create(app: &axum::Router, title: &str, author: &str) -> i64 {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": title, "author": author })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn empty_list_reports_zero_marker() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusError"], json!(false));
    assert_eq!(body["data"], json!(0));
}

#[tokio::test]
async fn created_book_round_trips_through_get() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Dom Casmurro", "author": "Machado de Assis" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["statusError"], json!(false));
    assert_eq!(body["message"], json!("Livro criado com sucesso."));
    let id = body["data"]["id"].as_i64().unwrap();

    let other = create(&app, "O Cortiço", "Aluísio Azevedo").await;
    assert_ne!(id, other);

    let (status, body) = send(&app, Method::GET, &format!("/api/books/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({ "id": id, "title": "Dom Casmurro", "author": "Machado de Assis" })
    );

    let (status, body) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn padded_fields_are_stored_verbatim() {
    let app = app().await;
    let id = create(&app, "  Dom Casmurro ", " Machado").await;

    let (status, body) = send(&app, Method::GET, &format!("/api/books/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({ "id": id, "title": "  Dom Casmurro ", "author": " Machado" })
    );

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{id}"),
        Some(json!({ "title": " Esaú e Jacó", "author": "Machado de Assis  " })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, &format!("/api/books/{id}"), None).await;
    assert_eq!(body["data"]["title"], json!(" Esaú e Jacó"));
    assert_eq!(body["data"]["author"], json!("Machado de Assis  "));
}

#[tokio::test]
async fn create_without_author_is_bad_request() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Sem autor" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusError"], json!(true));
    assert_eq!(
        body["messageError"],
        json!("Os campos 'title' e 'author' são obrigatórios.")
    );
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let app = app().await;
    let payload = json!({ "title": "T", "author": "A" });

    let (status, body) = send(&app, Method::GET, "/api/books/777", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["messageError"], json!("Livro não encontrado."));

    let (status, _) = send(&app, Method::PUT, "/api/books/777", Some(payload)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/books/777", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_id_is_rejected_before_handler() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/books/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusError"], json!(true));
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/books")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"title\": \"x\","))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusError"], json!(true));
}

#[tokio::test]
async fn update_overwrites_both_fields() {
    let app = app().await;
    let id = create(&app, "Iracema", "Alencar").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{id}"),
        Some(json!({ "title": "O Guarani", "author": "José de Alencar" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Livro atualizado com sucesso."));
    assert!(body.get("data").is_none());

    let (_, body) = send(&app, Method::GET, &format!("/api/books/{id}"), None).await;
    assert_eq!(body["data"]["title"], json!("O Guarani"));
    assert_eq!(body["data"]["author"], json!("José de Alencar"));
}

#[tokio::test]
async fn update_missing_author_leaves_record_unchanged() {
    let app = app().await;
    let id = create(&app, "Vidas Secas", "Graciliano Ramos").await;

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{id}"),
        Some(json!({ "title": "Angústia" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["statusError"], json!(true));

    let (_, body) = send(&app, Method::GET, &format!("/api/books/{id}"), None).await;
    assert_eq!(body["data"]["title"], json!("Vidas Secas"));
    assert_eq!(body["data"]["author"], json!("Graciliano Ramos"));
}

#[tokio::test]
async fn update_with_empty_field_is_bad_request() {
    let app = app().await;
    let id = create(&app, "Macunaíma", "Mário de Andrade").await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{id}"),
        Some(json!({ "title": "", "author": "Mário de Andrade" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_succeeds_once_then_reports_not_found() {
    let app = app().await;
    let id = create(&app, "Capitães da Areia", "Jorge Amado").await;
    let uri = format!("/api/books/{id}");

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Livro excluído com sucesso."));

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn batch_delete_reports_requested_count() {
    let app = app().await;
    let first = create(&app, "A", "X").await;
    let second = create(&app, "B", "Y").await;
    assert_eq!((first, second), (1, 2));

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/books/delete",
        Some(json!({ "book_ids": [1, 2, 3] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // Only two rows existed; the message still counts all three ids.
    assert_eq!(body["message"], json!("3 livros foram excluídos com sucesso."));

    let (_, body) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(body["data"], json!(0));
}

#[tokio::test]
async fn batch_delete_handles_very_long_id_lists() {
    let app = app().await;
    create(&app, "A", "X").await;
    create(&app, "B", "Y").await;

    let ids: Vec<i64> = (1..=40_000).collect();
    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/books/delete",
        Some(json!({ "book_ids": ids })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statusError"], json!(false));
    assert_eq!(body["message"], json!("40000 livros foram excluídos com sucesso."));

    let (_, body) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(body["data"], json!(0));
}

#[tokio::test]
async fn batch_delete_requires_ids() {
    let app = app().await;
    let expected = json!("A lista 'book_ids' é obrigatória e não pode estar vazia.");

    let (status, body) = send(
        &app,
        Method::DELETE,
        "/api/books/delete",
        Some(json!({ "book_ids": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["messageError"], expected);

    let (status, body) = send(&app, Method::DELETE, "/api/books/delete", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["messageError"], expected);

    let (status, body) = send(&app, Method::DELETE, "/api/books/delete", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["messageError"], expected);

    let request = Request::builder()
        .method(Method::DELETE)
        .uri("/api/books/delete")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"book_ids\": [1,"))
        .unwrap();
    let (status, body) = send_request(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["messageError"], expected);
}

#[tokio::test]
async fn delete_all_wipes_table() {
    let app = app().await;
    create(&app, "A", "X").await;
    create(&app, "B", "Y").await;

    let (status, body) = send(&app, Method::DELETE, "/api/books/delete-all-books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], json!("Todos os livros foram excluídos."));
    assert!(body.get("data").is_none());

    let (_, body) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(body["data"], json!(0));
}

#[tokio::test]
async fn concurrent_update_and_delete_do_not_error() {
    let app = app().await;
    let id = create(&app, "Grande Sertão", "Guimarães Rosa").await;
    let uri = format!("/api/books/{id}");

    let (updated, deleted) = tokio::join!(
        send(
            &app,
            Method::PUT,
            &uri,
            Some(json!({ "title": "Sagarana", "author": "Guimarães Rosa" })),
        ),
        send(&app, Method::DELETE, &uri, None),
    );

    // Ordering between the two is unspecified.
    assert!(matches!(updated.0, StatusCode::OK | StatusCode::NOT_FOUND));
    assert!(matches!(deleted.0, StatusCode::OK | StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn unmatched_requests_still_get_an_envelope() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["statusError"], json!(true));
    assert_eq!(body["messageError"], json!("no route for /api/unknown"));

    let (status, body) = send(&app, Method::GET, "/api/books/delete", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["statusError"], json!(true));

    let (status, body) = send(&app, Method::PATCH, "/api/books/1", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body["statusError"], json!(true));
}

#[tokio::test]
async fn health_and_docs_are_served() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));

    let (status, body) = send(&app, Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/books/{id}"]["put"].is_object());
    assert!(body["paths"]["/api/room"]["post"].is_object());
}
