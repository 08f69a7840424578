//! Genre management service

use serde::Serialize;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    forms::FormFields,
    models::{Book, Genre, GenreData},
    repository::SharedRepository,
    validation::FieldError,
};

/// A genre with the books filed under it
#[derive(Debug, Clone, Serialize)]
pub struct GenreDetail {
    pub genre: Genre,
    pub genre_books: Vec<Book>,
}

/// Values and errors for the genre form
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenreForm {
    pub genre: GenreData,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct GenresService {
    repository: SharedRepository,
}

impl GenresService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    /// All genres sorted by name
    pub async fn list(&self) -> AppResult<Vec<Genre>> {
        self.repository.genres_list().await
    }

    async fn find_with_books(&self, id: Uuid) -> AppResult<Option<GenreDetail>> {
        let (genre, genre_books) = tokio::try_join!(
            self.repository.genres_get(id),
            self.repository.books_by_genre(id),
        )?;
        Ok(genre.map(|genre| GenreDetail { genre, genre_books }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<GenreDetail> {
        self.find_with_books(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))
    }

    pub fn create_form(&self) -> GenreForm {
        GenreForm::default()
    }

    /// Create a genre unless one with the same name (ignoring case) exists
    pub async fn create(&self, fields: &FormFields) -> AppResult<FormOutcome<GenreForm>> {
        let data = match GenreData::validate(fields) {
            Ok(data) => data,
            Err(invalid) => {
                return Ok(FormOutcome::Invalid(GenreForm {
                    genre: invalid.draft,
                    errors: invalid.errors,
                }))
            }
        };

        let (genre, created) = self.repository.genres_find_or_create(&data).await?;
        if created {
            tracing::info!("Created genre {} ({})", genre.id, genre.name);
        } else {
            tracing::info!("Genre '{}' already exists as {}", data.name, genre.id);
        }
        Ok(FormOutcome::Saved { url: genre.url() })
    }

    /// Confirmation data, or `None` when the genre is already gone
    pub async fn delete_page(&self, id: Uuid) -> AppResult<Option<GenreDetail>> {
        self.find_with_books(id).await
    }

    /// Delete a genre that no book references
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<GenreDetail>> {
        let Some(detail) = self.find_with_books(id).await? else {
            return Ok(DeleteOutcome::Missing);
        };
        if !detail.genre_books.is_empty() {
            tracing::info!(
                "Refusing to delete genre {}: {} book(s) still use it",
                id,
                detail.genre_books.len()
            );
            return Ok(DeleteOutcome::Blocked(detail));
        }

        if self.repository.genres_delete(id).await? {
            tracing::info!("Deleted genre {}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<GenreForm> {
        let genre = self
            .repository
            .genres_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        Ok(GenreForm {
            genre: genre.data(),
            errors: Vec::new(),
        })
    }

    pub async fn update(&self, id: Uuid, fields: &FormFields) -> AppResult<FormOutcome<GenreForm>> {
        let data = match GenreData::validate(fields) {
            Ok(data) => data,
            Err(invalid) => {
                return Ok(FormOutcome::Invalid(GenreForm {
                    genre: invalid.draft,
                    errors: invalid.errors,
                }))
            }
        };

        let genre = self
            .repository
            .genres_update(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Genre not found".to_string()))?;
        tracing::info!("Updated genre {}", genre.id);
        Ok(FormOutcome::Saved { url: genre.url() })
    }
}
