use tracing::instrument;

use crate::{
    args::{PaginationArgs, Window},
    config::PaginationConfig,
    connection::*,
    cursor::{self, Cursor, CursorPolicy},
    error::PaginationError,
    filter::{Filter, KeyRange},
    primitives::CollectionName,
    source::*,
};

/// Slices record sources into Relay connections.
///
/// Each page costs one query: the engine over-fetches a single record past the
/// requested size to learn whether another page exists and trims it off
/// again. Turning on `include_total_count` adds a `count` query in front.
///
/// Only the direction being paged reports a neighbouring page: `first` sets
/// `has_next_page`, `last` sets `has_previous_page`, and the other flag stays
/// `false`. Cursors alone never set either flag.
#[derive(Debug, Clone)]
pub struct Paginator {
    collection: CollectionName,
    config: PaginationConfig,
}

impl Paginator {
    pub fn new(collection: CollectionName, config: PaginationConfig) -> Self {
        Self { collection, config }
    }

    pub fn collection(&self) -> &CollectionName {
        &self.collection
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn cursor_for<R: Record>(&self, record: &R) -> Cursor {
        Cursor::encode(&self.collection, &record.key())
    }

    /// Filters `source` with `filter` and pages through the result.
    #[instrument(
        name = "relay_pagination.find_connections",
        skip(self, source, filter, projection),
        fields(collection = %self.collection),
        err(Debug)
    )]
    pub async fn find_connections<S: RecordSource>(
        &self,
        source: &S,
        filter: Filter<KeyOf<S>>,
        args: PaginationArgs,
        projection: Option<&Projection>,
    ) -> Result<ConnectionResult<S::Record>, S::Err> {
        self.paginate(&source.with_filter(filter), args, projection).await
    }

    /// Pages through a query that already carries its filter.
    #[instrument(
        name = "relay_pagination.paginate",
        skip(self, query, projection),
        fields(collection = %self.collection),
        err(Debug)
    )]
    pub async fn paginate<S: RecordSource>(
        &self,
        query: &S,
        args: PaginationArgs,
        projection: Option<&Projection>,
    ) -> Result<ConnectionResult<S::Record>, S::Err> {
        let window = args.window()?;
        let key_range = self.key_range::<KeyOf<S>>(&args)?;

        let query = match projection {
            Some(projection) => query.select(projection),
            None => query.clone(),
        };
        let total_count = if self.config.include_total_count {
            Some(query.count().await?)
        } else {
            None
        };
        let query = if key_range.is_unbounded() {
            query
        } else {
            query.with_filter(Filter::from(key_range))
        };

        let mut page_info = PageInfo::default();
        let records = match window {
            Window::First(first) => {
                let mut records = query
                    .sort_ascending_by_key()
                    .limit(first + 1)
                    .execute()
                    .await?;
                if records.len() > first {
                    page_info.has_next_page = true;
                    records.truncate(first);
                }
                records
            }
            Window::Last(last) => {
                let mut records = query
                    .sort_descending_by_key()
                    .limit(last + 1)
                    .execute()
                    .await?;
                if records.len() > last {
                    page_info.has_previous_page = true;
                    records.truncate(last);
                }
                records.reverse();
                records
            }
            Window::All => query.sort_ascending_by_key().execute().await?,
        };

        let edges = records
            .into_iter()
            .map(|node| Edge {
                cursor: self.cursor_for(&node),
                node,
            })
            .collect::<Vec<_>>();
        let mut result = ConnectionResult::new(edges, page_info);
        result.total_count = total_count;

        tracing::debug!(
            edges = result.edges.len(),
            has_next_page = result.page_info.has_next_page,
            has_previous_page = result.page_info.has_previous_page,
            "paginated"
        );
        Ok(result)
    }

    fn key_range<K>(&self, args: &PaginationArgs) -> Result<KeyRange<K>, PaginationError>
    where
        K: std::str::FromStr,
    {
        Ok(KeyRange {
            after: self.decode_key(args.after.as_ref())?,
            before: self.decode_key(args.before.as_ref())?,
        })
    }

    fn decode_key<K>(&self, cursor: Option<&Cursor>) -> Result<Option<K>, PaginationError>
    where
        K: std::str::FromStr,
    {
        let policy = self.config.cursor_policy;
        let Some(key) = cursor::decode(cursor, policy)?.key else {
            return Ok(None);
        };
        match key.parse() {
            Ok(key) => Ok(Some(key)),
            Err(_) if policy == CursorPolicy::Lenient => {
                tracing::debug!(key = %key, "ignoring cursor with unparseable key");
                Ok(None)
            }
            Err(_) => Err(PaginationError::InvalidCursor(format!(
                "key '{key}' does not match the record key type"
            ))),
        }
    }
}
