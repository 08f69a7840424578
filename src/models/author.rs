//! Author model and related types

use chrono::NaiveDate;
use serde::{ser::SerializeStruct, Serialize, Serializer};
use uuid::Uuid;

use super::format_date_med;
use crate::{
    forms::FormFields,
    validation::{Invalid, Validator},
};

/// Stored author document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// "Family, First", or empty when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            String::new()
        } else {
            format!("{}, {}", self.family_name, self.first_name)
        }
    }

    pub fn lifespan(&self) -> String {
        let birth = self.date_of_birth.map(format_date_med).unwrap_or_default();
        let death = self.date_of_death.map(format_date_med).unwrap_or_default();
        format!("{} - {}", birth, death)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn data(&self) -> AuthorData {
        AuthorData {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

impl Serialize for Author {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Author", 8)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("first_name", &self.first_name)?;
        s.serialize_field("family_name", &self.family_name)?;
        s.serialize_field("date_of_birth", &self.date_of_birth)?;
        s.serialize_field("date_of_death", &self.date_of_death)?;
        s.serialize_field("name", &self.name())?;
        s.serialize_field("lifespan", &self.lifespan())?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

/// Author content as submitted and persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuthorData {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorData {
    pub fn validate(fields: &FormFields) -> Result<AuthorData, Invalid<AuthorData>> {
        let mut v = Validator::new();
        let first_name = v
            .field("first_name", fields.get("first_name"))
            .trim()
            .not_empty("First name must be specified.")
            .length(None, Some(100), "First name must not exceed 100 characters.")
            .escape()
            .alphanumeric("First name has non-alphanumeric characters.")
            .value();
        let family_name = v
            .field("family_name", fields.get("family_name"))
            .trim()
            .not_empty("Family name must be specified.")
            .length(None, Some(100), "Family name must not exceed 100 characters.")
            .escape()
            .alphanumeric("Family name has non-alphanumeric characters.")
            .value();
        let date_of_birth = v
            .field("date_of_birth", fields.get("date_of_birth"))
            .optional()
            .date("Invalid date of birth");
        let date_of_death = v
            .field("date_of_death", fields.get("date_of_death"))
            .optional()
            .date("Invalid date of death");

        let data = AuthorData {
            first_name,
            family_name,
            date_of_birth,
            date_of_death,
        };
        v.finish(Some(data.clone()), data)
    }
}
