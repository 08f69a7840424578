//! Book instance (physical copy) model and related types

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, Utc};
use serde::{ser::SerializeStruct, Serialize, Serializer};
use uuid::Uuid;

use super::format_date_med;
use crate::{
    forms::FormFields,
    validation::{Invalid, Validator},
};

/// Circulation status of a copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BookStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl BookStatus {
    pub const ALL: [BookStatus; 4] = [
        BookStatus::Maintenance,
        BookStatus::Available,
        BookStatus::Loaned,
        BookStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Available => "Available",
            BookStatus::Maintenance => "Maintenance",
            BookStatus::Loaned => "Loaned",
            BookStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(BookStatus::Available),
            "Maintenance" => Ok(BookStatus::Maintenance),
            "Loaned" => Ok(BookStatus::Loaned),
            "Reserved" => Ok(BookStatus::Reserved),
            other => Err(format!("unknown book status '{}'", other)),
        }
    }
}

/// Stored copy of a book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstance {
    pub id: Uuid,
    pub book: Uuid,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: NaiveDate,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_date_med(self.due_back)
    }

    pub fn draft(&self) -> BookInstanceDraft {
        BookInstanceDraft {
            book: Some(self.book),
            imprint: self.imprint.clone(),
            status: self.status,
            due_back: Some(self.due_back),
        }
    }
}

impl Serialize for BookInstance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("BookInstance", 7)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("book", &self.book)?;
        s.serialize_field("imprint", &self.imprint)?;
        s.serialize_field("status", &self.status)?;
        s.serialize_field("due_back", &self.due_back)?;
        s.serialize_field("due_back_formatted", &self.due_back_formatted())?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

/// Validated copy content, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookInstanceData {
    pub book: Uuid,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: NaiveDate,
}

/// Sanitized copy form values, kept for redisplay
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookInstanceDraft {
    pub book: Option<Uuid>,
    pub imprint: String,
    pub status: BookStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceData {
    pub fn validate(fields: &FormFields) -> Result<BookInstanceData, Invalid<BookInstanceDraft>> {
        let mut v = Validator::new();
        let book = v
            .field("book", fields.get("book"))
            .trim()
            .not_empty("Book must be specified")
            .uuid("Book must be a valid identifier.");
        let imprint = v
            .field("imprint", fields.get("imprint"))
            .trim()
            .not_empty("Imprint must be specified")
            .escape()
            .value();
        let status = v
            .field("status", fields.get("status"))
            .trim()
            .optional()
            .escape()
            .parse::<BookStatus>("Status must be one of Available, Maintenance, Loaned, Reserved.")
            .unwrap_or_default();

        let due_back_raw = fields.get("due_back").unwrap_or_default();
        let due_back = v
            .field("due_back", Some(due_back_raw))
            .optional()
            .date("Invalid date");
        // Left blank means due today
        let due_back = if due_back_raw.is_empty() {
            Some(Utc::now().date_naive())
        } else {
            due_back
        };

        let data = match (book, due_back) {
            (Some(book), Some(due_back)) => Some(BookInstanceData {
                book,
                imprint: imprint.clone(),
                status,
                due_back,
            }),
            _ => None,
        };
        let draft = BookInstanceDraft {
            book,
            imprint,
            status,
            due_back,
        };
        v.finish(data, draft)
    }
}
