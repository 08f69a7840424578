//! Business logic services

pub mod authors;
pub mod book_instances;
pub mod books;
pub mod catalog;
pub mod genres;

use crate::{config::CatalogConfig, repository::SharedRepository};

/// Result of a create or update submission
#[derive(Debug)]
pub enum FormOutcome<F> {
    /// Persisted; redirect to the document's location
    Saved { url: String },
    /// Rejected; show the form again
    Invalid(F),
}

/// Result of a delete submission
#[derive(Debug)]
pub enum DeleteOutcome<P> {
    Deleted,
    /// Nothing stored under that id, so nothing to do
    Missing,
    /// Dependents still reference the document
    Blocked(P),
}

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub genres: genres::GenresService,
    pub authors: authors::AuthorsService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: SharedRepository, catalog_config: &CatalogConfig) -> Self {
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            genres: genres::GenresService::new(repository.clone()),
            authors: authors::AuthorsService::new(repository.clone()),
            books: books::BooksService::new(repository.clone(), catalog_config.guard_book_delete),
            book_instances: book_instances::BookInstancesService::new(repository),
        }
    }
}
