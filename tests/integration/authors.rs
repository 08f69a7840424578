use axum::http::StatusCode;
use chrono::NaiveDate;
use locallibrary::repository::Repository;
use uuid::Uuid;

use crate::common::{location, spawn_app};

#[tokio::test]
async fn austen_scenario() {
    let app = spawn_app();

    let response = app
        .server
        .post("/catalog/author/create")
        .form(&[("first_name", "Jane"), ("family_name", "Austen")])
        .await;
    let url = location(&response);

    let detail = app.server.get(&url).await;
    detail.assert_status_ok();
    assert!(detail.text().contains("Austen"));
    let stored = app.repo.authors_list().await.unwrap();
    assert_eq!(stored[0].family_name, "Austen");

    let response = app
        .server
        .post("/catalog/author/create")
        .form(&[("first_name", "Jane"), ("family_name", "")])
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("Family name must be specified."));
    assert_eq!(app.repo.authors_count().await.unwrap(), 1);
}

#[tokio::test]
async fn created_author_round_trips_sanitized_values() {
    let app = spawn_app();

    let response = app
        .server
        .post("/catalog/author/create")
        .form(&[
            ("first_name", "  Charlotte "),
            ("family_name", "Bronte"),
            ("date_of_birth", "1816-04-21"),
            ("date_of_death", ""),
        ])
        .await;
    let url = location(&response);

    let author = app.repo.authors_list().await.unwrap().remove(0);
    assert_eq!(url, author.url());
    assert_eq!(author.first_name, "Charlotte");
    assert_eq!(author.family_name, "Bronte");
    assert_eq!(author.date_of_birth, NaiveDate::from_ymd_opt(1816, 4, 21));
    assert_eq!(author.date_of_death, None);
}

#[tokio::test]
async fn non_alphanumeric_name_is_rejected() {
    let app = spawn_app();

    let response = app
        .server
        .post("/catalog/author/create")
        .form(&[("first_name", "Jean-Paul"), ("family_name", "Sartre")])
        .await;

    response.assert_status_ok();
    assert!(response
        .text()
        .contains("First name has non-alphanumeric characters."));
    assert_eq!(app.repo.authors_count().await.unwrap(), 0);
}

#[tokio::test]
async fn author_with_books_is_not_deleted() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    app.book("Emma", author.id, vec![]).await;

    let confirm = app.server.get(&format!("{}/delete", author.url())).await;
    confirm.assert_status_ok();
    assert!(confirm.text().contains("Delete the following books"));

    let response = app.server.post(&format!("{}/delete", author.url())).await;
    response.assert_status_ok();
    assert!(response.text().contains("Emma"));
    assert_eq!(app.repo.authors_count().await.unwrap(), 1);
}

#[tokio::test]
async fn author_without_books_is_deleted() {
    let app = spawn_app();
    let keep = app.author("Emily", "Bronte").await;
    let gone = app.author("Anne", "Bronte").await;

    let response = app.server.post(&format!("{}/delete", gone.url())).await;

    assert_eq!(location(&response), "/catalog/authors");
    let remaining = app.repo.authors_list().await.unwrap();
    assert_eq!(remaining, vec![keep]);
}

#[tokio::test]
async fn missing_author() {
    let app = spawn_app();
    let url = format!("/catalog/author/{}", Uuid::new_v4());

    app.server.get(&url).await.assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("{}/update", url))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(location(&app.server.get(&format!("{}/delete", url)).await), "/catalog/authors");
    assert_eq!(location(&app.server.post(&format!("{}/delete", url)).await), "/catalog/authors");
}

#[tokio::test]
async fn update_changes_author_in_place() {
    let app = spawn_app();
    let author = app.author("Jane", "Austin").await;

    let response = app
        .server
        .post(&format!("{}/update", author.url()))
        .form(&[("first_name", "Jane"), ("family_name", "Austen")])
        .await;

    assert_eq!(location(&response), author.url());
    let stored = app.repo.authors_get(author.id).await.unwrap().unwrap();
    assert_eq!(stored.family_name, "Austen");
    assert_eq!(app.repo.authors_count().await.unwrap(), 1);
}

#[tokio::test]
async fn detail_lists_books_by_title_ignoring_case() {
    let app = spawn_app();
    let author = app.author("Jules", "Verne").await;
    app.book("Zanzibar Nights", author.id, vec![]).await;
    app.book("around the World", author.id, vec![]).await;

    let page = app.server.get(&author.url()).await.text();

    let first = page.find("around the World").unwrap();
    let last = page.find("Zanzibar Nights").unwrap();
    assert!(first < last);
}
