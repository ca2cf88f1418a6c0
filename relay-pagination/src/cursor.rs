//! Opaque cursors identifying a record by collection and key.
//!
//! A cursor is the URL safe, unpadded base64 form of `rc1:{collection}.{key}`.
//! The `rc1:` tag versions the payload. Only the first `.` after the tag is
//! structural, so keys may contain the separator themselves.
//!
//! Decoding runs under a [`CursorPolicy`]:
//! * [`CursorPolicy::Lenient`] turns malformed input into an empty
//!   [`DecodedCursor`], which callers treat as "no bound".
//! * [`CursorPolicy::Strict`] rejects malformed input with
//!   [`PaginationError::InvalidCursor`].
//!
//! Under both policies an absent cursor decodes to an empty [`DecodedCursor`].
use base64::{engine::general_purpose, Engine as _};
use serde::{Deserialize, Serialize};

use crate::{error::PaginationError, primitives::CollectionName};

pub(crate) const SEPARATOR: char = '.';
const SCHEME: &str = "rc1:";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cursor(String);

impl Cursor {
    pub fn encode(collection: &CollectionName, key: &impl std::fmt::Display) -> Self {
        let payload = format!("{SCHEME}{collection}{SEPARATOR}{key}");
        Self(general_purpose::URL_SAFE_NO_PAD.encode(payload.as_bytes()))
    }

    pub fn decode(&self, policy: CursorPolicy) -> Result<DecodedCursor, PaginationError> {
        decode(Some(self), policy)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Cursor {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Cursor {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorPolicy {
    #[default]
    Lenient,
    Strict,
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct DecodedCursor {
    pub collection: Option<String>,
    pub key: Option<String>,
}

impl DecodedCursor {
    pub fn is_empty(&self) -> bool {
        self.key.is_none()
    }
}

pub fn encode(collection: &CollectionName, key: &impl std::fmt::Display) -> Cursor {
    Cursor::encode(collection, key)
}

pub fn decode(
    cursor: Option<&Cursor>,
    policy: CursorPolicy,
) -> Result<DecodedCursor, PaginationError> {
    let Some(cursor) = cursor else {
        return Ok(DecodedCursor::default());
    };
    match parse(cursor.as_str()) {
        Ok((collection, key)) => Ok(DecodedCursor {
            collection: Some(collection),
            key: Some(key),
        }),
        Err(reason) => match policy {
            CursorPolicy::Lenient => {
                tracing::debug!(cursor = %cursor, reason, "ignoring malformed cursor");
                Ok(DecodedCursor::default())
            }
            CursorPolicy::Strict => Err(PaginationError::InvalidCursor(format!(
                "'{cursor}': {reason}"
            ))),
        },
    }
}

fn parse(raw: &str) -> Result<(String, String), &'static str> {
    if raw.is_empty() {
        return Err("empty cursor");
    }
    let bytes = general_purpose::URL_SAFE_NO_PAD
        .decode(raw.as_bytes())
        .map_err(|_| "not base64")?;
    let payload = String::from_utf8(bytes).map_err(|_| "not utf-8")?;
    let body = payload
        .strip_prefix(SCHEME)
        .ok_or("unknown cursor scheme")?;
    let (collection, key) = body.split_once(SEPARATOR).ok_or("missing separator")?;
    if collection.is_empty() || key.is_empty() {
        return Err("empty collection or key");
    }
    Ok((collection.to_string(), key.to_string()))
}
