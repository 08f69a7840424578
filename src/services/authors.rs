//! Author management service

use serde::Serialize;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    forms::FormFields,
    models::{Author, AuthorData, Book},
    repository::SharedRepository,
    validation::FieldError,
};

/// An author with the books they wrote
#[derive(Debug, Clone, Serialize)]
pub struct AuthorDetail {
    pub author: Author,
    pub author_books: Vec<Book>,
}

/// Values and errors for the author form
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuthorForm {
    pub author: AuthorData,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct AuthorsService {
    repository: SharedRepository,
}

impl AuthorsService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    /// All authors sorted by family name
    pub async fn list(&self) -> AppResult<Vec<Author>> {
        self.repository.authors_list().await
    }

    async fn find_with_books(&self, id: Uuid) -> AppResult<Option<AuthorDetail>> {
        let (author, author_books) = tokio::try_join!(
            self.repository.authors_get(id),
            self.repository.books_by_author(id),
        )?;
        Ok(author.map(|author| AuthorDetail {
            author,
            author_books,
        }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<AuthorDetail> {
        self.find_with_books(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))
    }

    pub fn create_form(&self) -> AuthorForm {
        AuthorForm::default()
    }

    pub async fn create(&self, fields: &FormFields) -> AppResult<FormOutcome<AuthorForm>> {
        match AuthorData::validate(fields) {
            Ok(data) => {
                let author = self.repository.authors_create(&data).await?;
                tracing::info!("Created author {} ({})", author.id, author.name());
                Ok(FormOutcome::Saved { url: author.url() })
            }
            Err(invalid) => Ok(FormOutcome::Invalid(AuthorForm {
                author: invalid.draft,
                errors: invalid.errors,
            })),
        }
    }

    /// Confirmation data, or `None` when the author is already gone
    pub async fn delete_page(&self, id: Uuid) -> AppResult<Option<AuthorDetail>> {
        self.find_with_books(id).await
    }

    /// Delete an author with no books
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<AuthorDetail>> {
        let Some(detail) = self.find_with_books(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !detail.author_books.is_empty() {
            tracing::info!(
                "Refusing to delete author {}: {} book(s) still reference them",
                id,
                detail.author_books.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }

        if self.repository.authors_delete(id).await? {
            tracing::info!("Deleted author {}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<AuthorForm> {
        let author = self
            .repository
            .authors_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        Ok(AuthorForm {
            author: author.data(),
            errors: Vec::new(),
        })
    }

    pub async fn update(&self, id: Uuid, fields: &FormFields) -> AppResult<FormOutcome<AuthorForm>> {
        let data = match AuthorData::validate(fields) {
            Ok(data) => data,
            Err(invalid) => {
                return Ok(FormOutcome::Invalid(AuthorForm {
                    author: invalid.draft,
                    errors: invalid.errors,
                }))
            }
        };

        let author = self
            .repository
            .authors_update(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Author not found".to_string()))?;
        tracing::info!("Updated author {}", author.id);
        Ok(FormOutcome::Saved { url: author.url() })
    }
}
