use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Lt,
    Gt,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub op: Comparison,
    pub value: Value,
}

/// Exclusive bounds on the record key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange<K> {
    pub after: Option<K>,
    pub before: Option<K>,
}

impl<K> Default for KeyRange<K> {
    fn default() -> Self {
        Self {
            after: None,
            before: None,
        }
    }
}

impl<K: Ord> KeyRange<K> {
    pub fn is_unbounded(&self) -> bool {
        self.after.is_none() && self.before.is_none()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.after.as_ref().map_or(true, |after| key > after)
            && self.before.as_ref().map_or(true, |before| key < before)
    }

    fn intersect(self, other: Self) -> Self {
        Self {
            after: tighter(self.after, other.after, std::cmp::max),
            before: tighter(self.before, other.before, std::cmp::min),
        }
    }
}

fn tighter<K>(a: Option<K>, b: Option<K>, pick: fn(K, K) -> K) -> Option<K> {
    match (a, b) {
        (Some(a), Some(b)) => Some(pick(a, b)),
        (a, b) => a.or(b),
    }
}

/// Conjunction of field conditions plus a range on the record key.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter<K> {
    pub conditions: Vec<Condition>,
    pub key_range: KeyRange<K>,
}

impl<K> Default for Filter<K> {
    fn default() -> Self {
        Self {
            conditions: Vec::new(),
            key_range: KeyRange::default(),
        }
    }
}

impl<K: Ord> Filter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(field, Comparison::Eq, value)
    }

    pub fn less_than(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(field, Comparison::Lt, value)
    }

    pub fn greater_than(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.condition(field, Comparison::Gt, value)
    }

    pub fn condition(
        mut self,
        field: impl Into<String>,
        op: Comparison,
        value: impl Into<Value>,
    ) -> Self {
        self.conditions.push(Condition {
            field: field.into(),
            op,
            value: value.into(),
        });
        self
    }

    pub fn and(mut self, other: Filter<K>) -> Self {
        self.conditions.extend(other.conditions);
        self.key_range = self.key_range.intersect(other.key_range);
        self
    }
}

impl<K> From<KeyRange<K>> for Filter<K> {
    fn from(key_range: KeyRange<K>) -> Self {
        Self {
            conditions: Vec::new(),
            key_range,
        }
    }
}
