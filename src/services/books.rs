//! Book management service

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    forms::FormFields,
    models::{Author, Book, BookData, BookDraft, BookInstance, Genre},
    repository::SharedRepository,
    validation::FieldError,
};

/// A book with its author populated
#[derive(Debug, Clone, Serialize)]
pub struct BookListEntry {
    pub book: Book,
    pub author: Option<Author>,
}

/// A book with author, genres and copies populated
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    pub book: Book,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub book_instances: Vec<BookInstance>,
}

/// A genre checkbox on the book form
#[derive(Debug, Clone, Serialize)]
pub struct GenreOption {
    pub genre: Genre,
    pub checked: bool,
}

/// Choices, values and errors for the book form
#[derive(Debug, Clone, Serialize)]
pub struct BookForm {
    pub authors: Vec<Author>,
    pub genres: Vec<GenreOption>,
    pub book: BookDraft,
    pub errors: Vec<FieldError>,
}

/// Delete confirmation for a book
#[derive(Debug, Clone, Serialize)]
pub struct BookDelete {
    pub book: Book,
    pub author: Option<Author>,
    pub book_instances: Vec<BookInstance>,
    /// Copies prevent deletion
    pub blocked: bool,
}

#[derive(Clone)]
pub struct BooksService {
    repository: SharedRepository,
    guard_delete: bool,
}

impl BooksService {
    /// `guard_delete` refuses to delete a book while copies of it exist
    pub fn new(repository: SharedRepository, guard_delete: bool) -> Self {
        Self {
            repository,
            guard_delete,
        }
    }

    /// All books sorted by title, each with its author
    pub async fn list(&self) -> AppResult<Vec<BookListEntry>> {
        let books = self.repository.books_list().await?;

        let mut author_ids: Vec<Uuid> = books.iter().map(|b| b.author).collect();
        author_ids.sort();
        author_ids.dedup();
        let authors: HashMap<Uuid, Author> = self
            .repository
            .authors_get_many(&author_ids)
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        Ok(books
            .into_iter()
            .map(|book| BookListEntry {
                author: authors.get(&book.author).cloned(),
                book,
            })
            .collect())
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookDetail> {
        let (book, book_instances) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.book_instances_by_book(id),
        )?;
        let book = book.ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;

        let (author, genres) = tokio::try_join!(
            self.repository.authors_get(book.author),
            self.repository.genres_get_many(&book.genre),
        )?;

        Ok(BookDetail {
            book,
            author,
            genres,
            book_instances,
        })
    }

    /// Load the author and genre choices, ticking the genres `book` already has
    async fn form(&self, book: BookDraft, errors: Vec<FieldError>) -> AppResult<BookForm> {
        let (authors, genres) = tokio::try_join!(
            self.repository.authors_list(),
            self.repository.genres_list(),
        )?;
        let genres = genres
            .into_iter()
            .map(|genre| GenreOption {
                checked: book.genre.contains(&genre.id),
                genre,
            })
            .collect();

        Ok(BookForm {
            authors,
            genres,
            book,
            errors,
        })
    }

    pub async fn create_form(&self) -> AppResult<BookForm> {
        self.form(BookDraft::default(), Vec::new()).await
    }

    pub async fn create(&self, fields: &FormFields) -> AppResult<FormOutcome<BookForm>> {
        match BookData::validate(fields) {
            Ok(data) => {
                let book = self.repository.books_create(&data).await?;
                tracing::info!("Created book {} ({})", book.id, book.title);
                Ok(FormOutcome::Saved { url: book.url() })
            }
            Err(invalid) => Ok(FormOutcome::Invalid(
                self.form(invalid.draft, invalid.errors).await?,
            )),
        }
    }

    async fn find_for_delete(&self, id: Uuid) -> AppResult<Option<BookDelete>> {
        let (book, book_instances) = tokio::try_join!(
            self.repository.books_get(id),
            self.repository.book_instances_by_book(id),
        )?;
        let Some(book) = book else {
            return Ok(None);
        };
        let author = self.repository.authors_get(book.author).await?;

        Ok(Some(BookDelete {
            blocked: self.guard_delete && !book_instances.is_empty(),
            book,
            author,
            book_instances,
        }))
    }

    /// Confirmation data, or `None` when the book is already gone
    pub async fn delete_page(&self, id: Uuid) -> AppResult<Option<BookDelete>> {
        self.find_for_delete(id).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<BookDelete>> {
        let Some(page) = self.find_for_delete(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if page.blocked {
            tracing::info!(
                "Refusing to delete book {}: {} copies still exist",
                id,
                page.book_instances.len()
            );
            return Ok(DeleteOutcome::Blocked(page));
        }
        if !page.book_instances.is_empty() {
            tracing::warn!(
                "Deleting book {} leaves {} copies without a book",
                id,
                page.book_instances.len()
            );
        }

        if self.repository.books_delete(id).await? {
            tracing::info!("Deleted book {}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<BookForm> {
        let book = self
            .repository
            .books_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        self.form(book.draft(), Vec::new()).await
    }

    pub async fn update(&self, id: Uuid, fields: &FormFields) -> AppResult<FormOutcome<BookForm>> {
        let data = match BookData::validate(fields) {
            Ok(data) => data,
            Err(invalid) => {
                return Ok(FormOutcome::Invalid(
                    self.form(invalid.draft, invalid.errors).await?,
                ))
            }
        };

        let book = self
            .repository
            .books_update(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book not found".to_string()))?;
        tracing::info!("Updated book {}", book.id);
        Ok(FormOutcome::Saved { url: book.url() })
    }
}
