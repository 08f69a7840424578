//! Genre model

use serde::{ser::SerializeStruct, Serialize, Serializer};
use uuid::Uuid;

use crate::{
    forms::FormFields,
    validation::{Invalid, Validator},
};

/// Stored genre document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }

    pub fn data(&self) -> GenreData {
        GenreData {
            name: self.name.clone(),
        }
    }
}

impl Serialize for Genre {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Genre", 3)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("url", &self.url())?;
        s.end()
    }
}

/// Genre content as submitted and persisted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenreData {
    pub name: String,
}

impl GenreData {
    pub fn validate(fields: &FormFields) -> Result<GenreData, Invalid<GenreData>> {
        let mut v = Validator::new();
        let name = v
            .field("name", fields.get("name"))
            .trim()
            .length(Some(3), None, "Genre name must contain at least 3 characters")
            .length(None, Some(100), "Genre name must not exceed 100 characters")
            .escape()
            .value();

        let data = GenreData { name };
        v.finish(Some(data.clone()), data)
    }
}
