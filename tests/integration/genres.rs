use axum::http::StatusCode;
use locallibrary::repository::Repository;
use uuid::Uuid;

use crate::common::{location, spawn_app};

#[tokio::test]
async fn create_redirects_to_new_genre() {
    let app = spawn_app();

    let response = app
        .server
        .post("/catalog/genre/create")
        .form(&[("name", "Science Fiction")])
        .await;

    let genres = app.repo.genres_list().await.unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Science Fiction");
    assert_eq!(location(&response), genres[0].url());

    let detail = app.server.get(&genres[0].url()).await;
    detail.assert_status_ok();
    assert!(detail.text().contains("Science Fiction"));
}

#[tokio::test]
async fn duplicate_name_redirects_to_existing_genre() {
    let app = spawn_app();
    let existing = app.genre("Fantasy").await;

    for name in ["Fantasy", "FANTASY", " fantasy "] {
        let response = app
            .server
            .post("/catalog/genre/create")
            .form(&[("name", name)])
            .await;
        assert_eq!(location(&response), existing.url());
    }
    assert_eq!(app.repo.genres_count().await.unwrap(), 1);
}

#[tokio::test]
async fn short_name_redisplays_form() {
    let app = spawn_app();

    let response = app
        .server
        .post("/catalog/genre/create")
        .form(&[("name", "ab")])
        .await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("Genre name must contain at least 3 characters"));
    assert!(page.contains("value=\"ab\""));
    assert_eq!(app.repo.genres_count().await.unwrap(), 0);
}

#[tokio::test]
async fn genre_in_use_is_not_deleted() {
    let app = spawn_app();
    let genre = app.genre("Poetry").await;
    let author = app.author("Emily", "Dickinson").await;
    app.book("Collected Poems", author.id, vec![genre.id]).await;

    let response = app.server.post(&format!("{}/delete", genre.url())).await;

    response.assert_status_ok();
    assert!(response.text().contains("Collected Poems"));
    assert_eq!(app.repo.genres_count().await.unwrap(), 1);
}

#[tokio::test]
async fn unused_genre_is_deleted() {
    let app = spawn_app();
    let keep = app.genre("Poetry").await;
    let gone = app.genre("Horror").await;

    let response = app.server.post(&format!("{}/delete", gone.url())).await;

    assert_eq!(location(&response), "/catalog/genres");
    let remaining = app.repo.genres_list().await.unwrap();
    assert_eq!(remaining, vec![keep]);
}

#[tokio::test]
async fn missing_genre() {
    let app = spawn_app();
    let url = format!("/catalog/genre/{}", Uuid::new_v4());

    app.server.get(&url).await.assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("{}/update", url))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(location(&app.server.get(&format!("{}/delete", url)).await), "/catalog/genres");
    assert_eq!(location(&app.server.post(&format!("{}/delete", url)).await), "/catalog/genres");
}

#[tokio::test]
async fn update_keeps_the_same_location() {
    let app = spawn_app();
    let genre = app.genre("Poetry").await;

    let form = app.server.get(&format!("{}/update", genre.url())).await;
    form.assert_status_ok();
    assert!(form.text().contains("value=\"Poetry\""));

    let response = app
        .server
        .post(&format!("{}/update", genre.url()))
        .form(&[("name", "Epic Poetry")])
        .await;
    assert_eq!(location(&response), genre.url());

    let stored = app.repo.genres_get(genre.id).await.unwrap().unwrap();
    assert_eq!(stored.name, "Epic Poetry");
    assert_eq!(app.repo.genres_count().await.unwrap(), 1);
}

#[tokio::test]
async fn detail_lists_books_by_title_ignoring_case() {
    let app = spawn_app();
    let genre = app.genre("Adventure").await;
    let author = app.author("Jules", "Verne").await;
    app.book("Zanzibar Nights", author.id, vec![genre.id]).await;
    app.book("around the World", author.id, vec![genre.id]).await;

    let page = app.server.get(&genre.url()).await.text();

    let first = page.find("around the World").unwrap();
    let last = page.find("Zanzibar Nights").unwrap();
    assert!(first < last);
}

#[tokio::test]
async fn list_sorts_names_ignoring_case() {
    let app = spawn_app();
    app.genre("Zombie Fiction").await;
    app.genre("adventure").await;

    let page = app.server.get("/catalog/genres").await.text();

    assert!(page.find("adventure").unwrap() < page.find("Zombie Fiction").unwrap());
}
