#![allow(dead_code)]
use serde::Serialize;

use relay_pagination::{memory::MemorySource, *};

pub const COLLECTION: &str = "test";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestDocument {
    pub id: u64,
    pub label: String,
    pub field: String,
}

impl Record for TestDocument {
    type Key = u64;

    fn key(&self) -> u64 {
        self.id
    }
}

/// `n` documents labelled `k0..k{n-1}` with sparse, increasing ids, plus one
/// unrelated document after each of them.
pub fn test_documents(n: u64) -> Vec<TestDocument> {
    (0..n)
        .flat_map(|i| {
            [
                TestDocument {
                    id: 1_000 + i * 10,
                    label: format!("k{i}"),
                    field: "test".to_string(),
                },
                TestDocument {
                    id: 1_000 + i * 10 + 5,
                    label: format!("other{i}"),
                    field: "other".to_string(),
                },
            ]
        })
        .collect()
}

pub fn test_source(n: u64) -> MemorySource<TestDocument> {
    MemorySource::new(test_documents(n))
}

pub fn test_filter() -> Filter<u64> {
    Filter::new().equals("field", "test")
}

pub fn paginator() -> Paginator {
    Paginator::new(
        CollectionName::new(COLLECTION).unwrap(),
        PaginationConfig::default(),
    )
}

pub fn strict_paginator() -> Paginator {
    let config = PaginationConfig::builder()
        .cursor_policy(CursorPolicy::Strict)
        .build()
        .unwrap();
    Paginator::new(CollectionName::new(COLLECTION).unwrap(), config)
}

pub fn cursor_of(label_idx: u64) -> Cursor {
    Cursor::encode(
        &CollectionName::new(COLLECTION).unwrap(),
        &(1_000 + label_idx * 10),
    )
}

pub fn labels(result: &ConnectionResult<TestDocument>) -> Vec<String> {
    result.nodes().map(|doc| doc.label.clone()).collect()
}

pub fn expected(range: std::ops::Range<u64>) -> Vec<String> {
    range.map(|i| format!("k{i}")).collect()
}
