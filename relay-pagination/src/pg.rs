//! [`RecordSource`] backed by a Postgres table.
//!
//! [`PgQuery`] is a plain description of the query and renders it through
//! [`sqlx::QueryBuilder`] with every value bound as a parameter. Table, key and
//! field names are checked against `[A-Za-z_][A-Za-z0-9_.]*` and double
//! quoted segment by segment.
use async_trait::async_trait;
use serde_json::Value;
use sqlx::{
    postgres::{PgPool, PgRow, Postgres},
    Encode, FromRow, QueryBuilder, Type,
};
use thiserror::Error;

use std::marker::PhantomData;

use crate::{error::PaginationError, filter::*, primitives::ListDirection, source::*};

#[derive(Error, Debug)]
pub enum PgSourceError {
    #[error("PgSourceError - Sqlx: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("PgSourceError - InvalidIdentifier: '{0}'")]
    InvalidIdentifier(String),
    #[error("{0}")]
    Pagination(#[from] PaginationError),
}

#[derive(Debug, Clone)]
pub struct PgQuery<K> {
    table: String,
    key_column: String,
    filter: Filter<K>,
    direction: Option<ListDirection>,
    limit: Option<usize>,
    columns: Option<Vec<String>>,
}

impl<K> PgQuery<K>
where
    K: for<'q> Encode<'q, Postgres> + Type<Postgres> + Ord + Clone + Send + 'static,
{
    pub fn new(
        table: impl Into<String>,
        key_column: impl Into<String>,
    ) -> Result<Self, PgSourceError> {
        let table = table.into();
        let key_column = key_column.into();
        validate_identifier(&table)?;
        validate_identifier(&key_column)?;
        Ok(Self {
            table,
            key_column,
            filter: Filter::default(),
            direction: None,
            limit: None,
            columns: None,
        })
    }

    pub fn with_filter(&self, filter: Filter<K>) -> Self {
        let mut query = self.clone();
        query.filter = query.filter.and(filter);
        query
    }

    pub fn sort(&self, direction: ListDirection) -> Self {
        let mut query = self.clone();
        query.direction = Some(direction);
        query
    }

    pub fn limit(&self, limit: usize) -> Self {
        let mut query = self.clone();
        query.limit = Some(limit);
        query
    }

    pub fn select(&self, projection: &Projection) -> Self {
        let mut query = self.clone();
        let mut columns: Vec<String> = projection.fields().map(str::to_string).collect();
        if !projection.contains(&self.key_column) {
            columns.insert(0, self.key_column.clone());
        }
        query.columns = Some(columns);
        query
    }

    pub fn select_query(&self) -> Result<QueryBuilder<'static, Postgres>, PgSourceError> {
        let mut builder = QueryBuilder::new("SELECT ");
        match &self.columns {
            Some(columns) => {
                for (idx, column) in columns.iter().enumerate() {
                    if idx > 0 {
                        builder.push(", ");
                    }
                    builder.push(quote_identifier(column)?);
                }
            }
            None => {
                builder.push("*");
            }
        }
        builder.push(" FROM ").push(quote_identifier(&self.table)?);
        self.push_where(&mut builder)?;
        if let Some(direction) = self.direction {
            let dir = match direction {
                ListDirection::Ascending => "ASC",
                ListDirection::Descending => "DESC",
            };
            builder
                .push(" ORDER BY ")
                .push(quote_identifier(&self.key_column)?)
                .push(" ")
                .push(dir);
        }
        if let Some(limit) = self.limit {
            builder
                .push(" LIMIT ")
                .push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }
        Ok(builder)
    }

    /// Counts matching rows, ignoring sort and limit.
    pub fn count_query(&self) -> Result<QueryBuilder<'static, Postgres>, PgSourceError> {
        let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM ");
        builder.push(quote_identifier(&self.table)?);
        self.push_where(&mut builder)?;
        Ok(builder)
    }

    fn push_where(
        &self,
        builder: &mut QueryBuilder<'static, Postgres>,
    ) -> Result<(), PgSourceError> {
        let mut keyword = " WHERE ";
        for condition in &self.filter.conditions {
            builder
                .push(keyword)
                .push(quote_identifier(&condition.field)?);
            push_condition(builder, condition)?;
            keyword = " AND ";
        }
        let key = quote_identifier(&self.key_column)?;
        if let Some(after) = &self.filter.key_range.after {
            builder
                .push(keyword)
                .push(&key)
                .push(" > ")
                .push_bind(after.clone());
            keyword = " AND ";
        }
        if let Some(before) = &self.filter.key_range.before {
            builder
                .push(keyword)
                .push(&key)
                .push(" < ")
                .push_bind(before.clone());
        }
        Ok(())
    }
}

fn push_condition(
    builder: &mut QueryBuilder<'static, Postgres>,
    condition: &Condition,
) -> Result<(), PgSourceError> {
    let op = match condition.op {
        Comparison::Eq => " = ",
        Comparison::Lt => " < ",
        Comparison::Gt => " > ",
    };
    match &condition.value {
        Value::Null if condition.op == Comparison::Eq => {
            builder.push(" IS NULL");
        }
        Value::Null => {
            return Err(PaginationError::InvalidArguments(format!(
                "cannot order '{}' against null",
                condition.field
            ))
            .into())
        }
        Value::Bool(value) => {
            builder.push(op).push_bind(*value);
        }
        Value::Number(number) => {
            builder.push(op);
            match number.as_i64() {
                Some(value) => builder.push_bind(value),
                None => builder.push_bind(number.as_f64().unwrap_or(f64::NAN)),
            };
        }
        Value::String(value) => {
            builder.push(op).push_bind(value.clone());
        }
        value => {
            builder.push(op).push_bind(sqlx::types::Json(value.clone()));
        }
    }
    Ok(())
}

fn validate_identifier(name: &str) -> Result<(), PgSourceError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        }
        None => false,
    };
    if valid && !name.ends_with('.') && !name.contains("..") {
        Ok(())
    } else {
        Err(PgSourceError::InvalidIdentifier(name.to_string()))
    }
}

fn quote_identifier(name: &str) -> Result<String, PgSourceError> {
    validate_identifier(name)?;
    Ok(name
        .split('.')
        .map(|segment| format!("\"{segment}\""))
        .collect::<Vec<_>>()
        .join("."))
}

/// Pages over rows of a single table, ordered by its key column.
pub struct PgSource<R: Record> {
    pool: PgPool,
    query: PgQuery<R::Key>,
    _phantom: PhantomData<fn() -> R>,
}

impl<R: Record> Clone for PgSource<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            query: self.query.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<R> PgSource<R>
where
    R: Record,
    R::Key: for<'q> Encode<'q, Postgres> + Type<Postgres> + 'static,
{
    pub fn new(
        pool: &PgPool,
        table: impl Into<String>,
        key_column: impl Into<String>,
    ) -> Result<Self, PgSourceError> {
        Ok(Self {
            pool: pool.clone(),
            query: PgQuery::new(table, key_column)?,
            _phantom: PhantomData,
        })
    }

    pub fn query(&self) -> &PgQuery<R::Key> {
        &self.query
    }

    fn map_query(&self, f: impl FnOnce(&PgQuery<R::Key>) -> PgQuery<R::Key>) -> Self {
        Self {
            pool: self.pool.clone(),
            query: f(&self.query),
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<R> RecordSource for PgSource<R>
where
    R: Record + for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static,
    R::Key: for<'q> Encode<'q, Postgres> + Type<Postgres> + 'static,
{
    type Record = R;
    type Err = PgSourceError;

    fn with_filter(&self, filter: Filter<R::Key>) -> Self {
        self.map_query(|query| query.with_filter(filter))
    }

    fn sort(&self, direction: ListDirection) -> Self {
        self.map_query(|query| query.sort(direction))
    }

    fn limit(&self, limit: usize) -> Self {
        self.map_query(|query| query.limit(limit))
    }

    fn select(&self, projection: &Projection) -> Self {
        self.map_query(|query| query.select(projection))
    }

    async fn execute(&self) -> Result<Vec<R>, PgSourceError> {
        let mut builder = self.query.select_query()?;
        let records = builder
            .build_query_as::<R>()
            .fetch_all(&self.pool)
            .await?;
        Ok(records)
    }

    async fn count(&self) -> Result<usize, PgSourceError> {
        let mut builder = self.query.count_query()?;
        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}
