//! In-process catalog store.
//!
//! Documents live in insertion order behind a single `Mutex`. The lock is
//! never held across an await point.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use super::Repository;
use crate::{
    error::{AppError, AppResult},
    models::{
        Author, AuthorData, Book, BookData, BookInstance, BookInstanceData, BookStatus, Genre,
        GenreData,
    },
};

#[derive(Debug, Default)]
struct Collections {
    genres: Vec<Genre>,
    authors: Vec<Author>,
    books: Vec<Book>,
    book_instances: Vec<BookInstance>,
}

#[derive(Debug, Default)]
pub struct MemoryRepository {
    data: Mutex<Collections>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn data(&self) -> AppResult<MutexGuard<'_, Collections>> {
        self.data
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }
}

/// Sort by a display key, ignoring case
fn sort_by_name<T>(mut docs: Vec<T>, key: impl Fn(&T) -> &str) -> Vec<T> {
    docs.sort_by_cached_key(|doc| key(doc).to_lowercase());
    docs
}

fn remove_by_id<T>(docs: &mut Vec<T>, id: Uuid, id_of: impl Fn(&T) -> Uuid) -> bool {
    let before = docs.len();
    docs.retain(|doc| id_of(doc) != id);
    docs.len() != before
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn ping(&self) -> AppResult<()> {
        self.data().map(|_| ())
    }

    async fn close(&self) {}

    // =========================================================================
    // GENRES
    // =========================================================================

    async fn genres_list(&self) -> AppResult<Vec<Genre>> {
        let genres = self.data()?.genres.clone();
        Ok(sort_by_name(genres, |g| &g.name))
    }

    async fn genres_get(&self, id: Uuid) -> AppResult<Option<Genre>> {
        Ok(self.data()?.genres.iter().find(|g| g.id == id).cloned())
    }

    async fn genres_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Genre>> {
        let genres: Vec<Genre> = self
            .data()?
            .genres
            .iter()
            .filter(|g| ids.contains(&g.id))
            .cloned()
            .collect();
        Ok(sort_by_name(genres, |g| &g.name))
    }

    async fn genres_create(&self, data: &GenreData) -> AppResult<Genre> {
        let genre = Genre {
            id: Uuid::new_v4(),
            name: data.name.clone(),
        };
        self.data()?.genres.push(genre.clone());
        Ok(genre)
    }

    async fn genres_find_or_create(&self, data: &GenreData) -> AppResult<(Genre, bool)> {
        let wanted = data.name.to_lowercase();
        let mut store = self.data()?;
        if let Some(existing) = store.genres.iter().find(|g| g.name.to_lowercase() == wanted) {
            return Ok((existing.clone(), false));
        }
        let genre = Genre {
            id: Uuid::new_v4(),
            name: data.name.clone(),
        };
        store.genres.push(genre.clone());
        Ok((genre, true))
    }

    async fn genres_update(&self, id: Uuid, data: &GenreData) -> AppResult<Option<Genre>> {
        let mut store = self.data()?;
        Ok(store.genres.iter_mut().find(|g| g.id == id).map(|genre| {
            genre.name = data.name.clone();
            genre.clone()
        }))
    }

    async fn genres_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove_by_id(&mut self.data()?.genres, id, |g| g.id))
    }

    async fn genres_count(&self) -> AppResult<i64> {
        Ok(self.data()?.genres.len() as i64)
    }

    // =========================================================================
    // AUTHORS
    // =========================================================================

    async fn authors_list(&self) -> AppResult<Vec<Author>> {
        let authors = self.data()?.authors.clone();
        Ok(sort_by_name(authors, |a| &a.family_name))
    }

    async fn authors_get(&self, id: Uuid) -> AppResult<Option<Author>> {
        Ok(self.data()?.authors.iter().find(|a| a.id == id).cloned())
    }

    async fn authors_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Author>> {
        Ok(self
            .data()?
            .authors
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect())
    }

    async fn authors_create(&self, data: &AuthorData) -> AppResult<Author> {
        let author = Author {
            id: Uuid::new_v4(),
            first_name: data.first_name.clone(),
            family_name: data.family_name.clone(),
            date_of_birth: data.date_of_birth,
            date_of_death: data.date_of_death,
        };
        self.data()?.authors.push(author.clone());
        Ok(author)
    }

    async fn authors_update(&self, id: Uuid, data: &AuthorData) -> AppResult<Option<Author>> {
        let mut store = self.data()?;
        Ok(store.authors.iter_mut().find(|a| a.id == id).map(|author| {
            author.first_name = data.first_name.clone();
            author.family_name = data.family_name.clone();
            author.date_of_birth = data.date_of_birth;
            author.date_of_death = data.date_of_death;
            author.clone()
        }))
    }

    async fn authors_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove_by_id(&mut self.data()?.authors, id, |a| a.id))
    }

    async fn authors_count(&self) -> AppResult<i64> {
        Ok(self.data()?.authors.len() as i64)
    }

    // =========================================================================
    // BOOKS
    // =========================================================================

    async fn books_list(&self) -> AppResult<Vec<Book>> {
        let books = self.data()?.books.clone();
        Ok(sort_by_name(books, |b| &b.title))
    }

    async fn books_get(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.data()?.books.iter().find(|b| b.id == id).cloned())
    }

    async fn books_get_many(&self, ids: &[Uuid]) -> AppResult<Vec<Book>> {
        Ok(self
            .data()?
            .books
            .iter()
            .filter(|b| ids.contains(&b.id))
            .cloned()
            .collect())
    }

    async fn books_by_author(&self, author_id: Uuid) -> AppResult<Vec<Book>> {
        let books: Vec<Book> = self
            .data()?
            .books
            .iter()
            .filter(|b| b.author == author_id)
            .cloned()
            .collect();
        Ok(sort_by_name(books, |b| &b.title))
    }

    async fn books_by_genre(&self, genre_id: Uuid) -> AppResult<Vec<Book>> {
        let books: Vec<Book> = self
            .data()?
            .books
            .iter()
            .filter(|b| b.genre.contains(&genre_id))
            .cloned()
            .collect();
        Ok(sort_by_name(books, |b| &b.title))
    }

    async fn books_create(&self, data: &BookData) -> AppResult<Book> {
        let book = Book {
            id: Uuid::new_v4(),
            title: data.title.clone(),
            author: data.author,
            summary: data.summary.clone(),
            isbn: data.isbn.clone(),
            genre: data.genre.clone(),
        };
        self.data()?.books.push(book.clone());
        Ok(book)
    }

    async fn books_update(&self, id: Uuid, data: &BookData) -> AppResult<Option<Book>> {
        let mut store = self.data()?;
        Ok(store.books.iter_mut().find(|b| b.id == id).map(|book| {
            book.title = data.title.clone();
            book.author = data.author;
            book.summary = data.summary.clone();
            book.isbn = data.isbn.clone();
            book.genre = data.genre.clone();
            book.clone()
        }))
    }

    async fn books_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove_by_id(&mut self.data()?.books, id, |b| b.id))
    }

    async fn books_count(&self) -> AppResult<i64> {
        Ok(self.data()?.books.len() as i64)
    }

    // =========================================================================
    // BOOK INSTANCES
    // =========================================================================

    async fn book_instances_list(&self) -> AppResult<Vec<BookInstance>> {
        Ok(self.data()?.book_instances.clone())
    }

    async fn book_instances_get(&self, id: Uuid) -> AppResult<Option<BookInstance>> {
        Ok(self
            .data()?
            .book_instances
            .iter()
            .find(|i| i.id == id)
            .cloned())
    }

    async fn book_instances_by_book(&self, book_id: Uuid) -> AppResult<Vec<BookInstance>> {
        Ok(self
            .data()?
            .book_instances
            .iter()
            .filter(|i| i.book == book_id)
            .cloned()
            .collect())
    }

    async fn book_instances_create(&self, data: &BookInstanceData) -> AppResult<BookInstance> {
        let instance = BookInstance {
            id: Uuid::new_v4(),
            book: data.book,
            imprint: data.imprint.clone(),
            status: data.status,
            due_back: data.due_back,
        };
        self.data()?.book_instances.push(instance.clone());
        Ok(instance)
    }

    async fn book_instances_update(
        &self,
        id: Uuid,
        data: &BookInstanceData,
    ) -> AppResult<Option<BookInstance>> {
        let mut store = self.data()?;
        Ok(store
            .book_instances
            .iter_mut()
            .find(|i| i.id == id)
            .map(|instance| {
                instance.book = data.book;
                instance.imprint = data.imprint.clone();
                instance.status = data.status;
                instance.due_back = data.due_back;
                instance.clone()
            }))
    }

    async fn book_instances_delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(remove_by_id(&mut self.data()?.book_instances, id, |i| i.id))
    }

    async fn book_instances_count(&self) -> AppResult<i64> {
        Ok(self.data()?.book_instances.len() as i64)
    }

    async fn book_instances_count_by_status(&self, status: BookStatus) -> AppResult<i64> {
        Ok(self
            .data()?
            .book_instances
            .iter()
            .filter(|i| i.status == status)
            .count() as i64)
    }
}
