//! Decoded `application/x-www-form-urlencoded` submissions

/// Raw key/value pairs of one form submission, in the order they were sent
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl From<Vec<(String, String)>> for FormFields {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }
}

impl FormFields {
    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Everything submitted under `name` (`name[]` is accepted as an alias)
    pub fn submitted(&self, name: &str) -> Submitted<'_> {
        let mut values: Vec<&str> = self
            .pairs
            .iter()
            .filter(|(key, _)| key == name || key.strip_suffix("[]") == Some(name))
            .map(|(_, value)| value.as_str())
            .collect();
        match values.len() {
            0 => Submitted::Absent,
            1 => Submitted::Scalar(values.remove(0)),
            _ => Submitted::Collection(values),
        }
    }
}

/// Shape of a possibly multi-valued field as it arrived on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submitted<'a> {
    Absent,
    Scalar(&'a str),
    Collection(Vec<&'a str>),
}

impl Submitted<'_> {
    /// Normalize to a list: absent is empty, a scalar is a single element
    pub fn into_values(self) -> Vec<String> {
        match self {
            Submitted::Absent => Vec::new(),
            Submitted::Scalar(value) => vec![value.to_string()],
            Submitted::Collection(values) => values.into_iter().map(str::to_string).collect(),
        }
    }
}
