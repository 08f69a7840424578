//! Catalog-wide summary for the home page

use serde::Serialize;

use crate::{error::AppResult, models::BookStatus, repository::SharedRepository};

/// Record counts shown on the home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub book_count: i64,
    pub book_instance_count: i64,
    pub book_instance_available_count: i64,
    pub author_count: i64,
    pub genre_count: i64,
}

#[derive(Clone)]
pub struct CatalogService {
    repository: SharedRepository,
}

impl CatalogService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    /// Check that the store answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    /// Count every collection concurrently
    pub async fn summary(&self) -> AppResult<CatalogSummary> {
        let repo = &self.repository;
        let (book_count, book_instance_count, book_instance_available_count, author_count, genre_count) =
            tokio::try_join!(
                repo.books_count(),
                repo.book_instances_count(),
                repo.book_instances_count_by_status(BookStatus::Available),
                repo.authors_count(),
                repo.genres_count(),
            )?;

        Ok(CatalogSummary {
            book_count,
            book_instance_count,
            book_instance_available_count,
            author_count,
            genre_count,
        })
    }
}
