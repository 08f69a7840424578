//! Shared test application setup

use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use chrono::NaiveDate;
use uuid::Uuid;

use locallibrary::{
    api,
    config::{AppConfig, CatalogConfig},
    models::{Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookStatus, Genre, GenreData},
    repository::{MemoryRepository, Repository},
    services::Services,
    templates::Templates,
    AppState,
};

pub struct TestApp {
    pub server: TestServer,
    pub repo: Arc<MemoryRepository>,
}

pub fn spawn_app() -> TestApp {
    spawn_app_with(CatalogConfig::default())
}

pub fn spawn_app_with(catalog: CatalogConfig) -> TestApp {
    let config = AppConfig {
        catalog,
        ..Default::default()
    };
    let repo = Arc::new(MemoryRepository::new());
    let services = Services::new(repo.clone(), &config.catalog);
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
        templates: Arc::new(Templates::new().unwrap()),
    };

    TestApp {
        server: TestServer::new(api::router(state)).unwrap(),
        repo,
    }
}

/// Target of a 303 redirect
pub fn location(response: &TestResponse) -> String {
    response.assert_status(axum::http::StatusCode::SEE_OTHER);
    response.header("location").to_str().unwrap().to_string()
}

impl TestApp {
    pub async fn genre(&self, name: &str) -> Genre {
        self.repo
            .genres_create(&GenreData { name: name.to_string() })
            .await
            .unwrap()
    }

    pub async fn author(&self, first_name: &str, family_name: &str) -> Author {
        self.repo
            .authors_create(&AuthorData {
                first_name: first_name.to_string(),
                family_name: family_name.to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
    }

    pub async fn book(&self, title: &str, author: Uuid, genre: Vec<Uuid>) -> Book {
        self.repo
            .books_create(&BookData {
                title: title.to_string(),
                author,
                summary: "A summary".to_string(),
                isbn: "9780141439518".to_string(),
                genre,
            })
            .await
            .unwrap()
    }

    pub async fn copy(&self, book: Uuid, status: BookStatus) -> BookInstance {
        self.repo
            .book_instances_create(&BookInstanceData {
                book,
                imprint: "Penguin Classics, 2003".to_string(),
                status,
                due_back: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            })
            .await
            .unwrap()
    }
}
