mod helpers;

use relay_pagination::{memory::*, *};

use helpers::*;

#[tokio::test]
async fn returns_everything_without_args() -> anyhow::Result<()> {
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), PaginationArgs::new(), None)
        .await?;

    assert_eq!(labels(&result), expected(0..15));
    assert_eq!(result.page_info.start_cursor, Some(cursor_of(0)));
    assert_eq!(result.page_info.end_cursor, Some(cursor_of(14)));
    assert_eq!(result.page_info.start_cursor.as_ref(), Some(&result.edges[0].cursor));
    assert!(!result.page_info.has_next_page);
    assert!(!result.page_info.has_previous_page);
    assert_eq!(result.total_count, None);
    Ok(())
}

#[tokio::test]
async fn first_five() -> anyhow::Result<()> {
    let args = PaginationArgs::new().first(5);
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(0..5));
    assert_eq!(result.page_info.start_cursor, Some(cursor_of(0)));
    assert_eq!(result.page_info.end_cursor, Some(cursor_of(4)));
    assert!(result.page_info.has_next_page);
    assert!(!result.page_info.has_previous_page);
    Ok(())
}

#[tokio::test]
async fn last_five() -> anyhow::Result<()> {
    let args = PaginationArgs::new().last(5);
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(10..15));
    assert_eq!(result.page_info.start_cursor, Some(cursor_of(10)));
    assert_eq!(result.page_info.end_cursor, Some(cursor_of(14)));
    assert!(result.page_info.has_previous_page);
    assert!(!result.page_info.has_next_page);
    Ok(())
}

#[tokio::test]
async fn after_cursor() -> anyhow::Result<()> {
    let args = PaginationArgs::new().after(cursor_of(4));
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(5..15));
    assert!(!result.page_info.has_next_page);
    assert!(!result.page_info.has_previous_page);
    Ok(())
}

#[tokio::test]
async fn between_after_and_before() -> anyhow::Result<()> {
    let args = PaginationArgs::new()
        .after(cursor_of(4))
        .before(cursor_of(10));
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(5..10));
    assert_eq!(result.edges.len(), 5);
    Ok(())
}

#[tokio::test]
async fn before_cursor_alone_sets_no_flags() -> anyhow::Result<()> {
    let args = PaginationArgs::new().before(cursor_of(4));
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(0..4));
    assert!(!result.page_info.has_next_page);
    assert!(!result.page_info.has_previous_page);
    Ok(())
}

#[tokio::test]
async fn first_with_before_reports_next_page() -> anyhow::Result<()> {
    let args = PaginationArgs::new().first(2).before(cursor_of(10));
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(0..2));
    assert!(result.page_info.has_next_page);
    assert!(!result.page_info.has_previous_page);
    Ok(())
}

#[tokio::test]
async fn last_with_after_reports_previous_page() -> anyhow::Result<()> {
    let args = PaginationArgs::new().last(2).after(cursor_of(4));
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(13..15));
    assert!(result.page_info.has_previous_page);
    assert!(!result.page_info.has_next_page);
    Ok(())
}

#[tokio::test]
async fn walks_forward_page_by_page() -> anyhow::Result<()> {
    let source = test_source(15);
    let paginator = paginator();
    let mut seen = Vec::new();
    let mut after = None;
    loop {
        let mut args = PaginationArgs::new().first(4);
        args.after = after;
        let page = paginator
            .find_connections(&source, test_filter(), args, None)
            .await?;
        seen.extend(labels(&page));
        assert!(!page.page_info.has_previous_page);
        if !page.page_info.has_next_page {
            break;
        }
        after = page.page_info.end_cursor;
    }
    assert_eq!(seen, expected(0..15));
    Ok(())
}

#[tokio::test]
async fn after_with_first() -> anyhow::Result<()> {
    let source = test_source(15);

    let args = PaginationArgs::new().after(cursor_of(4)).first(5);
    let result = paginator()
        .find_connections(&source, test_filter(), args, None)
        .await?;
    assert_eq!(labels(&result), expected(5..10));
    assert!(result.page_info.has_next_page);

    let args = PaginationArgs::new().after(cursor_of(9)).first(5);
    let result = paginator()
        .find_connections(&source, test_filter(), args, None)
        .await?;
    assert_eq!(labels(&result), expected(10..15));
    assert!(!result.page_info.has_next_page);
    assert!(!result.page_info.has_previous_page);
    Ok(())
}

#[tokio::test]
async fn before_with_last() -> anyhow::Result<()> {
    let args = PaginationArgs::new().before(cursor_of(10)).last(3);
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(7..10));
    assert!(result.page_info.has_previous_page);
    assert!(!result.page_info.has_next_page);

    let args = PaginationArgs::new().before(cursor_of(3)).last(3);
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;
    assert_eq!(labels(&result), expected(0..3));
    assert!(!result.page_info.has_previous_page);
    Ok(())
}

#[tokio::test]
async fn zero_sized_pages() -> anyhow::Result<()> {
    let source = test_source(15);

    let result = paginator()
        .find_connections(&source, test_filter(), PaginationArgs::new().first(0), None)
        .await?;
    assert!(result.is_empty());
    assert!(result.page_info.has_next_page);
    assert_eq!(result.page_info.start_cursor, None);
    assert_eq!(result.page_info.end_cursor, None);

    let result = paginator()
        .find_connections(&source, test_filter(), PaginationArgs::new().last(0), None)
        .await?;
    assert!(result.is_empty());
    assert!(result.page_info.has_previous_page);
    assert!(!result.page_info.has_next_page);

    let args = PaginationArgs::new().after(cursor_of(14)).first(0);
    let result = paginator()
        .find_connections(&source, test_filter(), args, None)
        .await?;
    assert!(!result.page_info.has_next_page);
    Ok(())
}

#[tokio::test]
async fn first_wins_over_last() -> anyhow::Result<()> {
    let args = PaginationArgs::new().first(3).last(2);
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(0..3));
    assert!(result.page_info.has_next_page);
    assert!(!result.page_info.has_previous_page);
    Ok(())
}

#[tokio::test]
async fn empty_collection() -> anyhow::Result<()> {
    let source = test_source(0);
    for args in [
        PaginationArgs::new(),
        PaginationArgs::new().first(5),
        PaginationArgs::new().last(5),
        PaginationArgs::new().after(cursor_of(1)).before(cursor_of(3)),
    ] {
        let result = paginator()
            .find_connections(&source, test_filter(), args, None)
            .await?;
        assert!(result.edges.is_empty());
        assert_eq!(result.page_info, PageInfo::default());
    }
    Ok(())
}

#[tokio::test]
async fn bounds_need_not_exist() -> anyhow::Result<()> {
    let collection = CollectionName::new(COLLECTION)?;
    // ids are 1000, 1010, ... so 1042 and 1077 fall between k4/k5 and k7/k8
    let args = PaginationArgs::new()
        .after(Cursor::encode(&collection, &1_042))
        .before(Cursor::encode(&collection, &1_077));
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(5..8));
    Ok(())
}

#[tokio::test]
async fn cursor_collection_is_not_checked() -> anyhow::Result<()> {
    let foreign = Cursor::encode(&CollectionName::new("elsewhere")?, &1_040);
    let args = PaginationArgs::new().after(foreign).first(2);
    let result = paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(labels(&result), expected(5..7));
    Ok(())
}

#[tokio::test]
async fn base_filter_is_respected() -> anyhow::Result<()> {
    let filter = test_filter().greater_than("id", 1_020).less_than("id", 1_060);
    let result = paginator()
        .find_connections(&test_source(15), filter, PaginationArgs::new(), None)
        .await?;

    assert_eq!(labels(&result), expected(3..6));
    Ok(())
}

#[tokio::test]
async fn repeated_calls_are_identical() -> anyhow::Result<()> {
    let source = test_source(15);
    let args = PaginationArgs::new().after(cursor_of(2)).last(4);
    let first = paginator()
        .find_connections(&source, test_filter(), args.clone(), None)
        .await?;
    let second = paginator()
        .find_connections(&source, test_filter(), args, None)
        .await?;

    assert_eq!(first, second);
    assert_eq!(labels(&first), expected(11..15));
    Ok(())
}

#[tokio::test]
async fn reports_total_count_when_configured() -> anyhow::Result<()> {
    let config = PaginationConfig::builder()
        .include_total_count(true)
        .build()?;
    let paginator = Paginator::new(CollectionName::new(COLLECTION)?, config);

    let args = PaginationArgs::new().after(cursor_of(4)).first(2);
    let result = paginator
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;

    assert_eq!(result.edges.len(), 2);
    assert_eq!(result.total_count, Some(15));
    Ok(())
}

#[tokio::test]
async fn lenient_policy_ignores_malformed_cursors() -> anyhow::Result<()> {
    let collection = CollectionName::new(COLLECTION)?;
    for cursor in [
        Cursor::from("not a cursor"),
        Cursor::from(""),
        Cursor::encode(&collection, &"not-a-number"),
    ] {
        let args = PaginationArgs::new().after(cursor).first(3);
        let result = paginator()
            .find_connections(&test_source(15), test_filter(), args, None)
            .await?;
        assert_eq!(labels(&result), expected(0..3));
    }
    Ok(())
}

#[tokio::test]
async fn strict_policy_rejects_malformed_cursors() -> anyhow::Result<()> {
    let collection = CollectionName::new(COLLECTION)?;
    for cursor in [
        Cursor::from("not a cursor"),
        Cursor::from(""),
        Cursor::encode(&collection, &"not-a-number"),
    ] {
        let args = PaginationArgs::new().before(cursor);
        let result = strict_paginator()
            .find_connections(&test_source(15), test_filter(), args, None)
            .await;
        assert!(matches!(
            result,
            Err(MemorySourceError::Pagination(
                PaginationError::InvalidCursor(_)
            ))
        ));
    }

    let args = PaginationArgs::new().after(cursor_of(4)).first(2);
    let result = strict_paginator()
        .find_connections(&test_source(15), test_filter(), args, None)
        .await?;
    assert_eq!(labels(&result), expected(5..7));
    Ok(())
}

#[tokio::test]
async fn negative_counts_are_rejected() -> anyhow::Result<()> {
    for args in [
        PaginationArgs::new().first(-1),
        PaginationArgs::new().last(-3),
    ] {
        let result = paginator()
            .find_connections(&test_source(15), test_filter(), args, None)
            .await;
        assert!(matches!(
            result,
            Err(MemorySourceError::Pagination(
                PaginationError::InvalidArguments(_)
            ))
        ));
    }
    Ok(())
}

#[tokio::test]
async fn edge_cursors_decode_to_record_keys() -> anyhow::Result<()> {
    let result = paginator()
        .find_connections(&test_source(3), test_filter(), PaginationArgs::new(), None)
        .await?;

    for edge in &result.edges {
        let decoded = edge.cursor.decode(CursorPolicy::Strict)?;
        assert_eq!(decoded.collection.as_deref(), Some(COLLECTION));
        assert_eq!(decoded.key, Some(edge.node.id.to_string()));
    }
    Ok(())
}
