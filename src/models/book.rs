//! Book model and related types

use std::collections::HashSet;

use serde::{ser::SerializeStruct, Serialize, Serializer};
use uuid::Uuid;

use crate::{
    forms::FormFields,
    validation::{Invalid, Validator},
};

/// Stored book document. `author` and `genre` hold references only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }

    pub fn draft(&self) -> BookDraft {
        BookDraft {
            title: self.title.clone(),
            author: Some(self.author),
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genre: self.genre.clone(),
        }
    }
}

impl Serialize for Book {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Book", 7)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("author", &self.author)?;
        s.serialize_field("summary", &self.summary)?;
        s.serialize_field("isbn", &self.isbn)?;
        s.serialize_field("genre", &self.genre)?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

/// Validated book content, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookData {
    pub title: String,
    pub author: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

/// Sanitized book form values, kept for redisplay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookDraft {
    pub title: String,
    pub author: Option<Uuid>,
    pub summary: String,
    pub isbn: String,
    pub genre: Vec<Uuid>,
}

impl BookData {
    pub fn validate(fields: &FormFields) -> Result<BookData, Invalid<BookDraft>> {
        // An unticked genre list is not sent at all
        let genre_raw = fields.submitted("genre").into_values();

        let mut v = Validator::new();
        let title = v
            .field("title", fields.get("title"))
            .trim()
            .not_empty("Title must not be empty.")
            .escape()
            .value();
        let author = v
            .field("author", fields.get("author"))
            .trim()
            .not_empty("Author must not be empty.")
            .uuid("Author must be a valid identifier.");
        let summary = v
            .field("summary", fields.get("summary"))
            .trim()
            .not_empty("Summary must not be empty.")
            .escape()
            .value();
        let isbn = v
            .field("isbn", fields.get("isbn"))
            .trim()
            .not_empty("ISBN must not be empty")
            .escape()
            .value();
        let mut genre: Vec<Uuid> = v
            .each("genre", &genre_raw, |f| f.trim().uuid("Genre must be a valid identifier."))
            .into_iter()
            .flatten()
            .collect();
        // A set: repeated ticks collapse, first occurrence wins
        let mut seen = HashSet::new();
        genre.retain(|id| seen.insert(*id));

        let data = author.map(|author| BookData {
            title: title.clone(),
            author,
            summary: summary.clone(),
            isbn: isbn.clone(),
            genre: genre.clone(),
        });
        let draft = BookDraft {
            title,
            author,
            summary,
            isbn,
            genre,
        };
        v.finish(data, draft)
    }
}
