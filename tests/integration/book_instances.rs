use axum::http::StatusCode;
use chrono::Utc;
use locallibrary::{models::BookStatus, repository::Repository};
use uuid::Uuid;

use crate::common::{location, spawn_app};

#[tokio::test]
async fn invalid_due_back_is_rejected() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let book = app.book("Emma", author.id, vec![]).await;
    let book_id = book.id.to_string();

    let response = app
        .server
        .post("/catalog/bookinstance/create")
        .form(&[
            ("book", book_id.as_str()),
            ("imprint", "Penguin"),
            ("due_back", "not-a-date"),
        ])
        .await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("Invalid date"));
    assert!(page.contains(&format!("value=\"{}\" selected", book.id)));
    assert_eq!(app.repo.book_instances_count().await.unwrap(), 0);
}

#[tokio::test]
async fn omitted_status_defaults_to_maintenance() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let book = app.book("Emma", author.id, vec![]).await;
    let book_id = book.id.to_string();

    let response = app
        .server
        .post("/catalog/bookinstance/create")
        .form(&[("book", book_id.as_str()), ("imprint", "Penguin"), ("due_back", "")])
        .await;
    let url = location(&response);

    let copy = app.repo.book_instances_list().await.unwrap().remove(0);
    assert_eq!(url, copy.url());
    assert_eq!(copy.status, BookStatus::Maintenance);
    assert_eq!(copy.due_back, Utc::now().date_naive());
}

#[tokio::test]
async fn unknown_status_is_rejected() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let book = app.book("Emma", author.id, vec![]).await;
    let book_id = book.id.to_string();

    let response = app
        .server
        .post("/catalog/bookinstance/create")
        .form(&[("book", book_id.as_str()), ("imprint", "Penguin"), ("status", "Lost")])
        .await;

    response.assert_status_ok();
    assert!(response
        .text()
        .contains("Status must be one of Available, Maintenance, Loaned, Reserved."));
    assert_eq!(app.repo.book_instances_count().await.unwrap(), 0);
}

#[tokio::test]
async fn copy_is_deleted() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let book = app.book("Emma", author.id, vec![]).await;
    let keep = app.copy(book.id, BookStatus::Available).await;
    let gone = app.copy(book.id, BookStatus::Loaned).await;

    let confirm = app.server.get(&format!("{}/delete", gone.url())).await;
    confirm.assert_status_ok();
    assert!(confirm.text().contains("Emma"));

    let response = app.server.post(&format!("{}/delete", gone.url())).await;

    assert_eq!(location(&response), "/catalog/bookinstances");
    assert_eq!(app.repo.book_instances_list().await.unwrap(), vec![keep]);
}

#[tokio::test]
async fn missing_copy() {
    let app = spawn_app();
    let url = format!("/catalog/bookinstance/{}", Uuid::new_v4());

    app.server.get(&url).await.assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("{}/update", url))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(
        location(&app.server.get(&format!("{}/delete", url)).await),
        "/catalog/bookinstances"
    );
    assert_eq!(
        location(&app.server.post(&format!("{}/delete", url)).await),
        "/catalog/bookinstances"
    );
}

#[tokio::test]
async fn list_shows_book_title_and_due_date() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let book = app.book("Emma", author.id, vec![]).await;
    app.copy(book.id, BookStatus::Loaned).await;

    let response = app.server.get("/catalog/bookinstances").await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("Emma"));
    assert!(page.contains("Due: Jun 1, 2024"));
}
