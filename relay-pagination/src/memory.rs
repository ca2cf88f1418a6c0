//! [`RecordSource`] over records held in memory.
//!
//! Field conditions are checked against the serde JSON form of each record.
//! Dotted field names reach into nested objects. Numbers compare numerically,
//! strings lexicographically, and an ordered comparison between different JSON
//! types never matches. Records are always loaded whole, so projections are
//! ignored.
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use std::{cmp::Ordering, sync::Arc};

use crate::{error::PaginationError, filter::*, primitives::ListDirection, source::*};

#[derive(Error, Debug)]
pub enum MemorySourceError {
    #[error("MemorySourceError - Serialization: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("{0}")]
    Pagination(#[from] PaginationError),
}

pub struct MemorySource<R: Record> {
    records: Arc<Vec<R>>,
    filter: Filter<R::Key>,
    direction: Option<ListDirection>,
    limit: Option<usize>,
}

impl<R: Record> Clone for MemorySource<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
            filter: self.filter.clone(),
            direction: self.direction,
            limit: self.limit,
        }
    }
}

impl<R: Record> MemorySource<R> {
    pub fn new(records: impl IntoIterator<Item = R>) -> Self {
        Self::from_shared(Arc::new(records.into_iter().collect()))
    }

    pub fn from_shared(records: Arc<Vec<R>>) -> Self {
        Self {
            records,
            filter: Filter::default(),
            direction: None,
            limit: None,
        }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }
}

impl<R: Record + Serialize> MemorySource<R> {
    fn matching(&self) -> Result<Vec<&R>, MemorySourceError> {
        let mut matching = Vec::new();
        for record in self.records.iter() {
            if !self.filter.key_range.contains(&record.key()) {
                continue;
            }
            if !self.filter.conditions.is_empty() {
                let document = serde_json::to_value(record)?;
                if !self
                    .filter
                    .conditions
                    .iter()
                    .all(|condition| matches(&document, condition))
                {
                    continue;
                }
            }
            matching.push(record);
        }
        Ok(matching)
    }
}

#[async_trait]
impl<R> RecordSource for MemorySource<R>
where
    R: Record + Serialize + Clone + Send + Sync,
{
    type Record = R;
    type Err = MemorySourceError;

    fn with_filter(&self, filter: Filter<R::Key>) -> Self {
        let mut source = self.clone();
        source.filter = source.filter.and(filter);
        source
    }

    fn sort(&self, direction: ListDirection) -> Self {
        let mut source = self.clone();
        source.direction = Some(direction);
        source
    }

    fn limit(&self, limit: usize) -> Self {
        let mut source = self.clone();
        source.limit = Some(limit);
        source
    }

    async fn execute(&self) -> Result<Vec<R>, MemorySourceError> {
        let mut records: Vec<R> = self.matching()?.into_iter().cloned().collect();
        match self.direction {
            Some(ListDirection::Ascending) => records.sort_by_key(|record| record.key()),
            Some(ListDirection::Descending) => {
                records.sort_by_key(|record| std::cmp::Reverse(record.key()))
            }
            None => (),
        }
        if let Some(limit) = self.limit {
            records.truncate(limit);
        }
        Ok(records)
    }

    async fn count(&self) -> Result<usize, MemorySourceError> {
        Ok(self.matching()?.len())
    }
}

fn matches(document: &Value, condition: &Condition) -> bool {
    let field = lookup(document, &condition.field).unwrap_or(&Value::Null);
    match condition.op {
        Comparison::Eq => field == &condition.value,
        Comparison::Lt => compare(field, &condition.value) == Some(Ordering::Less),
        Comparison::Gt => compare(field, &condition.value) == Some(Ordering::Greater),
    }
}

fn lookup<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |value, segment| value.get(segment))
}

fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Number(left), Value::Number(right)) => {
            match (as_integer(left), as_integer(right)) {
                (Some(left), Some(right)) => Some(left.cmp(&right)),
                _ => left.as_f64()?.partial_cmp(&right.as_f64()?),
            }
        }
        (Value::String(left), Value::String(right)) => Some(left.cmp(right)),
        _ => None,
    }
}

fn as_integer(number: &serde_json::Number) -> Option<i128> {
    number
        .as_i64()
        .map(i128::from)
        .or_else(|| number.as_u64().map(i128::from))
}
