use axum::http::StatusCode;
use locallibrary::{config::CatalogConfig, models::BookStatus, repository::Repository};
use uuid::Uuid;

use crate::common::{location, spawn_app, spawn_app_with};

#[tokio::test]
async fn omitted_genre_is_stored_as_empty_set() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let author_id = author.id.to_string();

    let response = app
        .server
        .post("/catalog/book/create")
        .form(&[
            ("title", "Persuasion"),
            ("author", author_id.as_str()),
            ("summary", "Second chances"),
            ("isbn", "9780141439686"),
        ])
        .await;
    let url = location(&response);

    let book = app.repo.books_list().await.unwrap().remove(0);
    assert_eq!(url, book.url());
    assert!(book.genre.is_empty());
}

#[tokio::test]
async fn single_and_multiple_genres_are_stored() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let romance = app.genre("Romance").await;
    let satire = app.genre("Satire").await;
    let author_id = author.id.to_string();
    let romance_id = romance.id.to_string();
    let satire_id = satire.id.to_string();

    app.server
        .post("/catalog/book/create")
        .form(&[
            ("title", "Emma"),
            ("author", author_id.as_str()),
            ("summary", "Matchmaking"),
            ("isbn", "1"),
            ("genre", romance_id.as_str()),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);
    app.server
        .post("/catalog/book/create")
        .form(&[
            ("title", "Northanger Abbey"),
            ("author", author_id.as_str()),
            ("summary", "Gothic parody"),
            ("isbn", "2"),
            ("genre", romance_id.as_str()),
            ("genre", satire_id.as_str()),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let books = app.repo.books_list().await.unwrap();
    assert_eq!(books[0].title, "Emma");
    assert_eq!(books[0].genre, vec![romance.id]);
    assert_eq!(books[1].genre, vec![romance.id, satire.id]);

    let detail = app.server.get(&books[1].url()).await;
    detail.assert_status_ok();
    let page = detail.text();
    assert!(page.contains("Romance"));
    assert!(page.contains("Satire"));
    assert!(page.contains("Austen, Jane"));
}

#[tokio::test]
async fn invalid_book_keeps_selected_genres() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let romance = app.genre("Romance").await;
    let author_id = author.id.to_string();
    let romance_id = romance.id.to_string();

    let response = app
        .server
        .post("/catalog/book/create")
        .form(&[
            ("title", ""),
            ("author", author_id.as_str()),
            ("summary", "Matchmaking"),
            ("isbn", "1"),
            ("genre", romance_id.as_str()),
        ])
        .await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("Title must not be empty."));
    assert!(page.contains(&format!("value=\"{}\" checked", romance.id)));
    assert!(page.contains(&format!("value=\"{}\" selected", author.id)));
    assert_eq!(app.repo.books_count().await.unwrap(), 0);
}

#[tokio::test]
async fn title_round_trips_escaped_once() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let author_id = author.id.to_string();

    let response = app
        .server
        .post("/catalog/book/create")
        .form(&[
            ("title", "Pride & Prejudice"),
            ("author", author_id.as_str()),
            ("summary", "Courtship"),
            ("isbn", "9780141439518"),
        ])
        .await;
    let url = location(&response);

    let book = app.repo.books_list().await.unwrap().remove(0);
    assert_eq!(book.title, "Pride &amp; Prejudice");
    let page = app.server.get(&url).await.text();
    assert!(page.contains("Pride &amp; Prejudice"));
    assert!(!page.contains("&amp;amp;"));
}

#[tokio::test]
async fn book_delete_ignores_copies_by_default() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let book = app.book("Emma", author.id, vec![]).await;
    app.copy(book.id, BookStatus::Loaned).await;

    let response = app.server.post(&format!("{}/delete", book.url())).await;

    assert_eq!(location(&response), "/catalog/books");
    assert_eq!(app.repo.books_count().await.unwrap(), 0);
}

#[tokio::test]
async fn guarded_book_delete_keeps_book_with_copies() {
    let app = spawn_app_with(CatalogConfig {
        guard_book_delete: true,
    });
    let author = app.author("Jane", "Austen").await;
    let book = app.book("Emma", author.id, vec![]).await;
    app.copy(book.id, BookStatus::Loaned).await;

    let response = app.server.post(&format!("{}/delete", book.url())).await;

    response.assert_status_ok();
    assert!(response.text().contains("Delete the following copies"));
    assert_eq!(app.repo.books_count().await.unwrap(), 1);
}

#[tokio::test]
async fn book_without_copies_is_deleted() {
    let app = spawn_app_with(CatalogConfig {
        guard_book_delete: true,
    });
    let author = app.author("Jane", "Austen").await;
    let keep = app.book("Emma", author.id, vec![]).await;
    let gone = app.book("Sanditon", author.id, vec![]).await;

    let response = app.server.post(&format!("{}/delete", gone.url())).await;

    assert_eq!(location(&response), "/catalog/books");
    assert_eq!(app.repo.books_list().await.unwrap(), vec![keep]);
}

#[tokio::test]
async fn missing_book() {
    let app = spawn_app();
    let url = format!("/catalog/book/{}", Uuid::new_v4());

    app.server.get(&url).await.assert_status(StatusCode::NOT_FOUND);
    app.server
        .get(&format!("{}/update", url))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert_eq!(location(&app.server.get(&format!("{}/delete", url)).await), "/catalog/books");
    assert_eq!(location(&app.server.post(&format!("{}/delete", url)).await), "/catalog/books");
}

#[tokio::test]
async fn update_form_marks_current_genres() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let romance = app.genre("Romance").await;
    let satire = app.genre("Satire").await;
    let book = app.book("Emma", author.id, vec![satire.id]).await;

    let response = app.server.get(&format!("{}/update", book.url())).await;

    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains(&format!("value=\"{}\" checked", satire.id)));
    assert!(!page.contains(&format!("value=\"{}\" checked", romance.id)));
}

#[tokio::test]
async fn repeated_genre_is_stored_once() {
    let app = spawn_app();
    let author = app.author("Jane", "Austen").await;
    let romance = app.genre("Romance").await;
    let author_id = author.id.to_string();
    let romance_id = romance.id.to_string();

    let response = app
        .server
        .post("/catalog/book/create")
        .form(&[
            ("title", "Emma"),
            ("author", author_id.as_str()),
            ("summary", "Matchmaking"),
            ("isbn", "1"),
            ("genre", romance_id.as_str()),
            ("genre", romance_id.as_str()),
        ])
        .await;
    location(&response);

    let book = app.repo.books_list().await.unwrap().remove(0);
    assert_eq!(book.genre, vec![romance.id]);
}
