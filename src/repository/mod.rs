//! Repository layer for catalog storage.
//!
//! [`Repository`] is the document-store seam: lookups by id or filter,
//! sorted listings, counts and in-place writes for the four collections.
//! Reads of a single document return `Ok(None)` when it does not exist; the
//! services decide whether that is a 404 or nothing to do.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookStatus, Genre,
        GenreData,
    },
};

pub use memory::MemoryRepository;
pub use postgres::PgRepository;

/// Shared handle injected into the services
pub type SharedRepository = Arc<dyn Repository>;

#[async_trait]
pub trait Repository: Send + Sync {
    /// Cheap round trip used by the readiness probe
    async fn ping(&self) -> AppResult<()>;

    /// Release connections; the repository must not be used afterwards
    async fn close(&self);

    // Genres

    /// All genres sorted by name
    async fn genres_list(&self) -> AppResult<Vec<Genre>>;
    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>>;
    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>>;
    async fn genres_create(&self, data: &GenreData) -> AppResult<Genre>;
    /// Insert unless a genre with the same name, ignoring case, exists.
    /// The check and the insert are atomic. Returns the stored genre and
    /// whether it was created.
    async fn genres_find_or_create(&self, data: &GenreData) -> AppResult<(Genre, bool)>;
    async fn genres_update(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>>;
    async fn genres_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn genres_count(&self) -> AppResult<i64>;

    // Authors

    /// All authors sorted by family name
    async fn authors_list(&self) -> AppResult<Vec<Author>>;
    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>>;
    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>>;
    async fn authors_create(&self, data: &AuthorData) -> AppResult<Author>;
    async fn authors_update(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>>;
    async fn authors_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn authors_count(&self) -> AppResult<i64>;

    // Books

    /// All books sorted by title
    async fn books_list(&self) -> AppResult<Vec<Book>>;
    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>>;
    async fn books_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>>;
    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>>;
    async fn books_create(&self, data: &BookData) -> AppResult<Book>;
    async fn books_update(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>>;
    async fn books_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn books_count(&self) -> AppResult<i64>;

    // Book instances

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>>;
    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>>;
    async fn book_instances_create(&self, data: &BookInstanceData) -> AppResult<BookInstance>;
    async fn book_instances_update(
        &self,
        id: Uuid,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>>;
    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool>;
    async fn book_instances_count(&self) -> AppResult<i64>;
    async fn book_instances_count_by_status(&self, status: BookStatus) -> AppResult<i64>;
}
