use async_graphql::{
    connection::{Connection, CursorType, Edge as GqlEdge},
    OutputType,
};

use crate::{args::PaginationArgs, connection::ConnectionResult, cursor::Cursor};

impl CursorType for Cursor {
    type Error = std::convert::Infallible;

    fn decode_cursor(s: &str) -> Result<Self, Self::Error> {
        Ok(Cursor::from(s))
    }

    fn encode_cursor(&self) -> String {
        self.as_str().to_string()
    }
}

impl PaginationArgs {
    /// Takes the arguments in the order `async_graphql::connection::query` hands them out.
    pub fn from_graphql(
        after: Option<String>,
        before: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
    ) -> Self {
        Self {
            first,
            last,
            before: before.map(Cursor::from),
            after: after.map(Cursor::from),
        }
    }
}

impl<T: OutputType> ConnectionResult<T> {
    pub fn into_graphql(self) -> Connection<Cursor, T> {
        let mut connection = Connection::new(
            self.page_info.has_previous_page,
            self.page_info.has_next_page,
        );
        connection.edges.extend(
            self.edges
                .into_iter()
                .map(|edge| GqlEdge::new(edge.cursor, edge.node)),
        );
        connection
    }
}
