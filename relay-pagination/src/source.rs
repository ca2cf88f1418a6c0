use async_trait::async_trait;

use crate::{error::PaginationError, filter::Filter, primitives::ListDirection};

/// A record with a stable, unique and totally ordered key.
pub trait Record {
    type Key: Ord
        + Clone
        + std::fmt::Display
        + std::str::FromStr
        + std::fmt::Debug
        + Send
        + Sync;

    fn key(&self) -> Self::Key;
}

pub type KeyOf<S> = <<S as RecordSource>::Record as Record>::Key;

/// Fields to load from the source. The key field is always loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection(Vec<String>);

impl Projection {
    pub fn new<I, F>(fields: I) -> Self
    where
        I: IntoIterator<Item = F>,
        F: Into<String>,
    {
        Self(fields.into_iter().map(Into::into).collect())
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| f == field)
    }
}

/// Query over a collection of records.
///
/// Every configuration call returns a new source and leaves `self` untouched,
/// so a base query can be shared between concurrent callers.
#[async_trait]
pub trait RecordSource: Clone + Send + Sync {
    type Record: Record + Send;
    type Err: From<PaginationError> + std::fmt::Debug + Send;

    /// ANDs `filter` with whatever the source already filters on.
    fn with_filter(&self, filter: Filter<KeyOf<Self>>) -> Self;
    fn sort(&self, direction: ListDirection) -> Self;
    fn limit(&self, limit: usize) -> Self;

    /// Sources that always load whole records may ignore the projection.
    fn select(&self, _projection: &Projection) -> Self {
        self.clone()
    }

    async fn execute(&self) -> Result<Vec<Self::Record>, Self::Err>;
    async fn count(&self) -> Result<usize, Self::Err>;

    fn sort_ascending_by_key(&self) -> Self {
        self.sort(ListDirection::Ascending)
    }

    fn sort_descending_by_key(&self) -> Self {
        self.sort(ListDirection::Descending)
    }
}
