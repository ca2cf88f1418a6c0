use serde::Serialize;

use crate::cursor::Cursor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge<T> {
    pub cursor: Cursor,
    pub node: T,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub start_cursor: Option<Cursor>,
    pub end_cursor: Option<Cursor>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// One page of records, ascending by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionResult<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_count: Option<usize>,
}

impl<T> ConnectionResult<T> {
    pub(crate) fn new(edges: Vec<Edge<T>>, mut page_info: PageInfo) -> Self {
        page_info.start_cursor = edges.first().map(|edge| edge.cursor.clone());
        page_info.end_cursor = edges.last().map(|edge| edge.cursor.clone());
        Self {
            edges,
            page_info,
            total_count: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }

    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }

    pub fn map_nodes<U>(self, mut f: impl FnMut(T) -> U) -> ConnectionResult<U> {
        ConnectionResult {
            edges: self
                .edges
                .into_iter()
                .map(|Edge { cursor, node }| Edge {
                    cursor,
                    node: f(node),
                })
                .collect(),
            page_info: self.page_info,
            total_count: self.total_count,
        }
    }
}
