use serde::{Deserialize, Serialize};

use crate::{cursor::SEPARATOR, error::PaginationError};

/// Label of the collection a cursor points into.
///
/// It is only used to build cursors and is never checked against the query.
/// It cannot contain the cursor separator `.`, which keeps decoding unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CollectionName(String);

impl CollectionName {
    pub fn new(name: impl Into<String>) -> Result<Self, PaginationError> {
        let name = name.into();
        if name.is_empty() {
            return Err(PaginationError::InvalidArguments(
                "collection name must not be empty".to_string(),
            ));
        }
        if name.contains(SEPARATOR) {
            return Err(PaginationError::InvalidArguments(format!(
                "collection name '{name}' must not contain '{SEPARATOR}'"
            )));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CollectionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::str::FromStr for CollectionName {
    type Err = PaginationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CollectionName {
    type Error = PaginationError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<CollectionName> for String {
    fn from(name: CollectionName) -> Self {
        name.0
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListDirection {
    #[default]
    Ascending,
    Descending,
}
