use anyhow::Context;
use relay_pagination::{Comparison, Filter, Record};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Number, Value};

use std::{cmp::Ordering, fmt, path::Path, str::FromStr};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordsConfig {
    pub key_field: String,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            key_field: "id".to_string(),
        }
    }
}

/// Key of a [`JsonRecord`]. Numbers order numerically and ahead of strings.
/// Displays as JSON so cursors tell `42` and `"42"` apart.
#[derive(Debug, Clone)]
pub enum JsonKey {
    Number(Number),
    String(String),
}

impl JsonKey {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::String(key) if !key.is_empty() => Some(Self::String(key.clone())),
            _ => None,
        }
    }
}

impl Ord for JsonKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(left), Self::Number(right)) => compare_numbers(left, right),
            (Self::Number(_), Self::String(_)) => Ordering::Less,
            (Self::String(_), Self::Number(_)) => Ordering::Greater,
            (Self::String(left), Self::String(right)) => left.cmp(right),
        }
    }
}

impl PartialOrd for JsonKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for JsonKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for JsonKey {}

fn compare_numbers(left: &Number, right: &Number) -> Ordering {
    fn as_integer(number: &Number) -> Option<i128> {
        number
            .as_i64()
            .map(i128::from)
            .or_else(|| number.as_u64().map(i128::from))
    }
    match (as_integer(left), as_integer(right)) {
        (Some(left), Some(right)) => left.cmp(&right),
        _ => {
            let left = left.as_f64().unwrap_or(f64::NAN);
            left.total_cmp(&right.as_f64().unwrap_or(f64::NAN))
        }
    }
}

impl fmt::Display for JsonKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::String(key) => {
                let quoted = serde_json::to_string(key).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
        }
    }
}

impl FromStr for JsonKey {
    type Err = anyhow::Error;

    /// Reads the JSON form. Text that is not JSON is taken as a string key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value =
            serde_json::from_str::<Value>(s).unwrap_or_else(|_| Value::String(s.to_string()));
        Self::from_value(&value).with_context(|| format!("'{s}' is not a record key"))
    }
}

/// A JSON object keyed by one of its fields.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonRecord {
    key: JsonKey,
    document: Value,
}

impl JsonRecord {
    pub fn new(document: Value, key_field: &str) -> anyhow::Result<Self> {
        let key = match document.get(key_field) {
            Some(value) => JsonKey::from_value(value).with_context(|| {
                format!("key field '{key_field}' has unsupported value {value}")
            })?,
            None => anyhow::bail!("record without key field '{key_field}': {document}"),
        };
        Ok(Self { key, document })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }
}

impl Record for JsonRecord {
    type Key = JsonKey;

    fn key(&self) -> JsonKey {
        self.key.clone()
    }
}

impl Serialize for JsonRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}

pub fn load_records(
    path: impl AsRef<Path>,
    key_field: &str,
) -> anyhow::Result<Vec<JsonRecord>> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Couldn't read records file {}", path.display()))?;
    parse_records(&raw, key_field)
}

pub fn parse_records(raw: &str, key_field: &str) -> anyhow::Result<Vec<JsonRecord>> {
    let documents: Vec<Value> =
        serde_json::from_str(raw).context("Records must be a JSON array of objects")?;
    documents
        .into_iter()
        .map(|document| JsonRecord::new(document, key_field))
        .collect()
}

/// Parses `field=value`, `field<value` or `field>value`. The value is read as
/// JSON when it parses, otherwise as a plain string.
pub fn parse_condition(raw: &str) -> anyhow::Result<(String, Comparison, Value)> {
    let idx = raw
        .find(|c: char| matches!(c, '=' | '<' | '>'))
        .with_context(|| format!("Condition '{raw}' needs one of '=', '<' or '>'"))?;
    let (field, rest) = raw.split_at(idx);
    let op = match &rest[..1] {
        "<" => Comparison::Lt,
        ">" => Comparison::Gt,
        _ => Comparison::Eq,
    };
    let raw_value = &rest[1..];
    if field.is_empty() {
        anyhow::bail!("Condition '{raw}' has no field");
    }
    let value =
        serde_json::from_str(raw_value).unwrap_or_else(|_| Value::String(raw_value.to_string()));
    Ok((field.to_string(), op, value))
}

pub fn build_filter(conditions: &[String]) -> anyhow::Result<Filter<JsonKey>> {
    conditions
        .iter()
        .try_fold(Filter::new(), |filter, raw| -> anyhow::Result<_> {
            let (field, op, value) = parse_condition(raw)?;
            Ok(filter.condition(field, op, value))
        })
}
