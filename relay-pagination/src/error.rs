use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaginationError {
    #[error("PaginationError - InvalidCursor: {0}")]
    InvalidCursor(String),
    #[error("PaginationError - InvalidArguments: {0}")]
    InvalidArguments(String),
}
