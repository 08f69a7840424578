use axum::http::StatusCode;
use locallibrary::models::BookStatus;
use serde_json::Value;

use crate::common::{location, spawn_app};

#[tokio::test]
async fn home_page_shows_counts() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    app.genre("Romance").await;
    let book = app.book("Emma", author.id, vec![]).await;
    app.copy(book.id, BookStatus::Available).await;
    app.copy(book.id, BookStatus::Loaned).await;

    let response = app.server.get("/catalog").await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("Local Library Home"));
    assert!(page.contains("<strong>Copies:</strong> 2"));
    assert!(page.contains("<strong>Copies available:</strong> 1"));
    assert!(page.contains("<strong>Authors:</strong> 1"));
}

#[tokio::test]
async fn root_redirects_to_catalog() {
    let app = spawn_app();
    assert_eq!(location(&app.server.get("/").await), "/catalog");
}

#[tokio::test]
async fn list_pages_render() {
    let app = spawn_app();
    for path in [
        "/catalog/books",
        "/catalog/authors",
        "/catalog/genres",
        "/catalog/bookinstances",
        "/catalog/book/create",
        "/catalog/author/create",
        "/catalog/genre/create",
        "/catalog/bookinstance/create",
    ] {
        app.server.get(path).await.assert_status_ok();
    }
}

#[tokio::test]
async fn malformed_id_is_not_found() {
    let app = spawn_app();
    app.server
        .get("/catalog/book/12345")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        location(&app.server.post("/catalog/genre/12345/delete").await),
        "/catalog/genres"
    );
}

#[tokio::test]
async fn health_probes() {
    let app = spawn_app();

    let health = app.server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "healthy");

    let ready = app.server.get("/ready").await;
    ready.assert_status_ok();
    assert_eq!(ready.json::<Value>()["status"], "ready");
}
