#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]

//! Relay style cursor pagination over any ordered, uniquely keyed record source.
//!
//! A [`Paginator`] decodes `before`/`after` cursors into key bounds, asks a
//! [`RecordSource`] for one batch of records and trims that batch into a
//! [`ConnectionResult`].

mod args;
mod config;
mod connection;
pub mod cursor;
mod engine;
pub mod error;
mod filter;
pub mod memory;
mod primitives;
mod source;

#[cfg(feature = "graphql")]
mod graphql;
#[cfg(feature = "postgres")]
pub mod pg;

pub use args::*;
pub use config::*;
pub use connection::*;
pub use cursor::{Cursor, CursorPolicy, DecodedCursor};
pub use engine::*;
pub use error::PaginationError;
pub use filter::*;
pub use primitives::*;
pub use source::*;
