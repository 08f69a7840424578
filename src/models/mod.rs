//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;

use chrono::NaiveDate;

// Re-export commonly used types
pub use author::{Author, AuthorData};
pub use book::{Book, BookData, BookDraft};
pub use book_instance::{BookInstance, BookInstanceData, BookInstanceDraft, BookStatus};
pub use genre::{Genre, GenreData};

/// Medium display format, e.g. `Jun 5, 1995`
pub fn format_date_med(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
