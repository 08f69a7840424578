//! Book instance (copy) management service

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

use super::{DeleteOutcome, FormOutcome};
use crate::{
    error::{AppError, AppResult},
    forms::FormFields,
    models::{Book, BookInstance, BookInstanceData, BookInstanceDraft, BookStatus},
    repository::SharedRepository,
    validation::FieldError,
};

/// A copy with its book populated
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceEntry {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceDetail {
    pub bookinstance: BookInstance,
    pub book: Option<Book>,
}

/// Choices, values and errors for the copy form
#[derive(Debug, Clone, Serialize)]
pub struct BookInstanceForm {
    pub book_list: Vec<Book>,
    pub statuses: [BookStatus; 4],
    pub bookinstance: BookInstanceDraft,
    pub errors: Vec<FieldError>,
}

#[derive(Clone)]
pub struct BookInstancesService {
    repository: SharedRepository,
}

impl BookInstancesService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<BookInstanceEntry>> {
        let instances = self.repository.book_instances_list().await?;

        let mut book_ids: Vec<Uuid> = instances.iter().map(|i| i.book).collect();
        book_ids.sort();
        book_ids.dedup();
        let books: HashMap<Uuid, Book> = self
            .repository
            .books_get_many(&book_ids)
            .await?
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        Ok(instances
            .into_iter()
            .map(|instance| BookInstanceEntry {
                book: books.get(&instance.book).cloned(),
                instance,
            })
            .collect())
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        let Some(bookinstance) = self.repository.book_instances_get(id).await? else {
            return Ok(None);
        };
        let book = self.repository.books_get(bookinstance.book).await?;
        Ok(Some(BookInstanceDetail { bookinstance, book }))
    }

    pub async fn detail(&self, id: Uuid) -> AppResult<BookInstanceDetail> {
        self.find(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))
    }

    async fn form(
        &self,
        bookinstance: BookInstanceDraft,
        errors: Vec<FieldError>,
    ) -> AppResult<BookInstanceForm> {
        let book_list = self.repository.books_list().await?;
        Ok(BookInstanceForm {
            book_list,
            statuses: BookStatus::ALL,
            bookinstance,
            errors,
        })
    }

    pub async fn create_form(&self) -> AppResult<BookInstanceForm> {
        self.form(BookInstanceDraft::default(), Vec::new()).await
    }

    pub async fn create(&self, fields: &FormFields) -> AppResult<FormOutcome<BookInstanceForm>> {
        match BookInstanceData::validate(fields) {
            Ok(data) => {
                let instance = self.repository.book_instances_create(&data).await?;
                tracing::info!("Created copy {} of book {}", instance.id, instance.book);
                Ok(FormOutcome::Saved {
                    url: instance.url(),
                })
            }
            Err(invalid) => Ok(FormOutcome::Invalid(
                self.form(invalid.draft, invalid.errors).await?,
            )),
        }
    }

    /// Confirmation data, or `None` when the copy is already gone
    pub async fn delete_page(&self, id: Uuid) -> AppResult<Option<BookInstanceDetail>> {
        self.find(id).await
    }

    /// Copies have no dependents, so a delete is never blocked
    pub async fn delete(&self, id: Uuid) -> AppResult<DeleteOutcome<BookInstanceDetail>> {
        if self.repository.book_instances_delete(id).await? {
            tracing::info!("Deleted copy {}", id);
            Ok(DeleteOutcome::Deleted)
        } else {
            Ok(DeleteOutcome::Missing)
        }
    }

    pub async fn update_form(&self, id: Uuid) -> AppResult<BookInstanceForm> {
        let instance = self
            .repository
            .book_instances_get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        self.form(instance.draft(), Vec::new()).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        fields: &FormFields,
    ) -> AppResult<FormOutcome<BookInstanceForm>> {
        let data = match BookInstanceData::validate(fields) {
            Ok(data) => data,
            Err(invalid) => {
                return Ok(FormOutcome::Invalid(
                    self.form(invalid.draft, invalid.errors).await?,
                ))
            }
        };

        let instance = self
            .repository
            .book_instances_update(id, &data)
            .await?
            .ok_or_else(|| AppError::NotFound("Book copy not found".to_string()))?;
        tracing::info!("Updated copy {}", instance.id);
        Ok(FormOutcome::Saved {
            url: instance.url(),
        })
    }
}
