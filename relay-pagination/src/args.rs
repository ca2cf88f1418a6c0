use serde::{Deserialize, Serialize};

use crate::{cursor::Cursor, error::PaginationError};

/// `first`/`after` page forward, `last`/`before` page backward.
/// When both `first` and `last` are given, `first` decides the direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationArgs {
    pub first: Option<i32>,
    pub last: Option<i32>,
    pub before: Option<Cursor>,
    pub after: Option<Cursor>,
}

impl PaginationArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first(mut self, first: i32) -> Self {
        self.first = Some(first);
        self
    }

    pub fn last(mut self, last: i32) -> Self {
        self.last = Some(last);
        self
    }

    pub fn after(mut self, cursor: impl Into<Cursor>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    pub fn before(mut self, cursor: impl Into<Cursor>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    pub(crate) fn window(&self) -> Result<Window, PaginationError> {
        let first = non_negative("first", self.first)?;
        let last = non_negative("last", self.last)?;
        Ok(match (first, last) {
            (Some(first), _) => Window::First(first),
            (None, Some(last)) => Window::Last(last),
            (None, None) => Window::All,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Window {
    First(usize),
    Last(usize),
    All,
}

fn non_negative(name: &str, value: Option<i32>) -> Result<Option<usize>, PaginationError> {
    match value {
        Some(n) if n < 0 => Err(PaginationError::InvalidArguments(format!(
            "'{name}' must be non-negative, got {n}"
        ))),
        Some(n) => Ok(Some(n as usize)),
        None => Ok(None),
    }
}
