//! Integration tests across the store: cancellation, decoding failures,
//! table name overrides, envelopes and configuration

mod common;

use std::time::Duration;

use common::nosqlite::Foo;
use common::open_store;
use docstore::prelude::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(name = "people")]
pub struct Person {
    pub name: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Document)]
#[document(name = "people")]
pub struct StrictPerson {
    pub name: String,
    pub age: i64,
    pub email: String,
}

#[model]
#[document(name = "audit_entries")]
pub struct AuditEntry {
    pub action: String,
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BadlyNamed {
    pub value: i64,
}

impl Document for BadlyNamed {
    fn table_name() -> String {
        "Bad-Name".to_string()
    }
}

#[tokio::test]
async fn test_cancelled_context_fails_fast() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();
    let foos = store.table::<Foo>(&ctx).await.unwrap();

    let token = CancellationToken::new();
    let cancelled = Context::with_token(token.clone());
    token.cancel();

    let err = foos
        .insert(&cancelled, &Foo::new(1, "foo", "bar", &[]))
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(matches!(err, StoreError::Cancelled(CancelReason::Cancelled)));

    let err = foos.query_one(&cancelled, &all()).await.unwrap_err();
    assert!(err.is_cancelled());

    let err = foos.count(&cancelled).await.unwrap_err();
    assert!(err.is_cancelled());

    let err = store.begin(&cancelled).await.unwrap_err();
    assert!(err.is_cancelled());

    assert_eq!(foos.count(&ctx).await.unwrap(), 0);
}

#[tokio::test]
async fn test_expired_deadline_fails_fast() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();
    let foos = store.table::<Foo>(&ctx).await.unwrap();

    let expired = Context::background().with_timeout(Duration::ZERO);
    let err = foos.query_many(&expired, &all()).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Cancelled(CancelReason::DeadlineExceeded)
    ));
}

#[tokio::test]
async fn test_cancelled_transaction_view_fails_fast() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();
    let foos = store.table::<Foo>(&ctx).await.unwrap();

    let tx = store.begin(&ctx).await.unwrap();
    let token = CancellationToken::new();
    let cancelled = Context::with_token(token.child_token());
    token.cancel();

    let err = foos
        .with_transaction(&tx)
        .insert(&cancelled, &Foo::new(1, "foo", "bar", &[]))
        .await
        .unwrap_err();
    assert!(err.is_cancelled());

    // The transaction itself is still usable
    assert!(tx.is_active().await);
    tx.rollback().await.unwrap();
}

#[tokio::test]
async fn test_decoding_failure_is_distinct() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();

    let people = store.table::<Person>(&ctx).await.unwrap();
    assert_eq!(people.name(), "people");
    people
        .insert(
            &ctx,
            &Person {
                name: "ada".to_string(),
                age: 36,
            },
        )
        .await
        .unwrap();

    let strict = store.table::<StrictPerson>(&ctx).await.unwrap();
    let err = strict
        .query_one(&ctx, &equal("$.name", "ada"))
        .await
        .unwrap_err();
    assert!(err.is_serialization(), "unexpected error: {err:?}");
    assert!(!err.is_database());

    let err = strict.query_many(&ctx, &all()).await.unwrap_err();
    assert!(err.is_serialization());
}

#[tokio::test]
async fn test_model_attribute_derives_document() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();

    let entries = store.table::<AuditEntry>(&ctx).await.unwrap();
    assert_eq!(entries.name(), "audit_entries");

    let entry = AuditEntry {
        action: "login".to_string(),
        ok: true,
    };
    entries.insert(&ctx, &entry).await.unwrap();

    let found = entries.query_one(&ctx, &equal("$.ok", true)).await.unwrap();
    assert_eq!(found.map(|e| e.action), Some(entry.action));
    assert!(entries
        .query_one(&ctx, &equal("$.ok", false))
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_invalid_table_name_is_rejected() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();

    let err = store.table::<BadlyNamed>(&ctx).await.unwrap_err();
    assert!(matches!(
        err,
        DocStoreError::Store(StoreError::Validation(_))
    ));
}

#[tokio::test]
async fn test_item_envelope_table() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();

    let items = store.table::<Item<Foo>>(&ctx).await.unwrap();
    assert_eq!(items.name(), "nosqlite_foo_item");

    let mut item = Item::new(Foo::new(1, "foo", "bar", &["a"]));
    items.insert(&ctx, &item).await.unwrap();

    item.replace(Foo::new(1, "renamed", "bar", &["a"]));
    let affected = items
        .update(&ctx, &equal("$.data.id", 1), &item)
        .await
        .unwrap();
    assert_eq!(affected, 1);

    let stored = items
        .query_one(&ctx, &contains("$.data.list", "a"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.data.name, "renamed");
    assert!(stored.updated >= stored.created);
}

#[tokio::test]
async fn test_boxed_records_share_a_table() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();

    let foos = store.table::<Foo>(&ctx).await.unwrap();
    let boxed = store.table::<Box<Foo>>(&ctx).await.unwrap();
    assert_eq!(boxed.name(), foos.name());

    boxed
        .insert(&ctx, &Box::new(Foo::new(1, "boxed", "bar", &[])))
        .await
        .unwrap();
    let found = foos.query_one(&ctx, &equal("$.name", "boxed")).await.unwrap();
    assert_eq!(found.map(|f| f.id), Some(1));
}

#[tokio::test]
async fn test_combined_clauses() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();
    let foos = store.table::<Foo>(&ctx).await.unwrap();

    foos.insert(&ctx, &Foo::new(1, "alpha", "x", &["red"])).await.unwrap();
    foos.insert(&ctx, &Foo::new(2, "beta", "y", &["blue"])).await.unwrap();
    foos.insert(&ctx, &Foo::new(3, "gamma", "x", &["red", "blue"])).await.unwrap();

    let clause = equal("$.bar.name", "x").and(contains("$.list", "blue"));
    let found = foos.query_many(&ctx, &clause).await.unwrap();
    assert_eq!(found.iter().map(|f| f.id).collect::<Vec<_>>(), vec![3]);

    let clause = or(vec![
        equal("$.name", "alpha"),
        and(vec![greater_than("$.id", 1), not_equal("$.bar.name", "x")]),
    ]);
    let found = foos.query_many(&ctx, &clause).await.unwrap();
    assert_eq!(found.iter().map(|f| f.id).collect::<Vec<_>>(), vec![1, 2]);

    let empty_or = foos.query_many(&ctx, &or(vec![])).await.unwrap();
    assert_eq!(empty_or.len(), 3);
}

#[tokio::test]
async fn test_health_check_and_close() {
    let (_dir, store) = open_store().await;
    store.health_check().await.unwrap();
    store.close().await;
    assert!(store.pool().is_closed());
}

#[tokio::test]
async fn test_open_from_toml_config() {
    let dir = tempfile::TempDir::new().unwrap();
    let db_path = dir.path().join("configured.db");
    let toml = format!(
        r#"
[database]
path = "{}"
max_connections = 2
busy_timeout_ms = 1000
synchronous = "full"
journal_mode = "wal"
"#,
        db_path.to_string_lossy().replace('\\', "/")
    );

    let config = AppConfig::from_toml_str(&toml).unwrap();
    assert_eq!(config.database.synchronous, SynchronousMode::Full);

    let store = DocStore::from_config(&config).await.unwrap();
    store.health_check().await.unwrap();
    assert!(db_path.exists());
}

#[tokio::test]
async fn test_in_memory_path_is_rejected() {
    let err = DocStore::new(DatabaseConfig::new(":memory:"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DocStoreError::Store(StoreError::Validation(_))
    ));
}
