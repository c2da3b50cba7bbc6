//! Integration tests for transactional table views

mod common;

use common::nosqlite::Foo;
use common::open_store;
use docstore::prelude::*;

#[tokio::test]
async fn test_commit_makes_writes_visible() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();
    let foos = store.table::<Foo>(&ctx).await.unwrap();

    let tx = store.begin(&ctx).await.unwrap();
    let view = foos.with_transaction(&tx);
    assert_eq!(view.name(), foos.name());

    view.insert(&ctx, &Foo::new(1, "foo", "bar", &[])).await.unwrap();

    // Visible inside the transaction
    let inside = view.query_one(&ctx, &equal("$.name", "foo")).await.unwrap();
    assert_eq!(inside.map(|f| f.id), Some(1));
    assert_eq!(view.count(&ctx).await.unwrap(), 1);

    // Not yet visible outside
    assert_eq!(foos.count(&ctx).await.unwrap(), 0);

    tx.commit().await.unwrap();
    assert!(!tx.is_active().await);

    assert_eq!(foos.count(&ctx).await.unwrap(), 1);
}

#[tokio::test]
async fn test_rollback_discards_writes() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();
    let foos = store.table::<Foo>(&ctx).await.unwrap();
    foos.insert(&ctx, &Foo::new(1, "kept", "bar", &[])).await.unwrap();

    let tx = store.begin(&ctx).await.unwrap();
    let view = foos.with_transaction(&tx);

    view.insert(&ctx, &Foo::new(2, "dropped", "bar", &[])).await.unwrap();
    view.update(&ctx, &equal("$.id", 1), &Foo::new(1, "changed", "bar", &[]))
        .await
        .unwrap();
    assert_eq!(view.count(&ctx).await.unwrap(), 2);

    tx.rollback().await.unwrap();

    let remaining = foos.all(&ctx).await.unwrap();
    assert_eq!(remaining, vec![Foo::new(1, "kept", "bar", &[])]);
}

#[tokio::test]
async fn test_views_share_one_transaction() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();
    let foos = store.table::<Foo>(&ctx).await.unwrap();
    let items = store.table::<Item<Foo>>(&ctx).await.unwrap();

    let tx = store.begin(&ctx).await.unwrap();
    let foo_view = foos.with_transaction(&tx);
    let item_view = items.with_transaction(&tx);

    let foo = Foo::new(1, "foo", "bar", &[]);
    foo_view.insert(&ctx, &foo).await.unwrap();
    item_view.insert(&ctx, &Item::new(foo.clone())).await.unwrap();

    let second_view = foos.with_transaction(&tx);
    assert_eq!(second_view.count(&ctx).await.unwrap(), 1);

    tx.commit().await.unwrap();

    assert_eq!(foos.count(&ctx).await.unwrap(), 1);
    let stored = items.query_one(&ctx, &equal("$.data.id", 1)).await.unwrap();
    assert_eq!(stored.map(Item::into_inner), Some(foo));
}

#[tokio::test]
async fn test_use_after_commit_fails() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();
    let foos = store.table::<Foo>(&ctx).await.unwrap();

    let tx = store.begin(&ctx).await.unwrap();
    let view = foos.with_transaction(&tx);
    view.insert(&ctx, &Foo::new(1, "foo", "bar", &[])).await.unwrap();
    tx.commit().await.unwrap();

    let err = view
        .insert(&ctx, &Foo::new(2, "late", "bar", &[]))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::TransactionClosed));

    let err = view.query_one(&ctx, &all()).await.unwrap_err();
    assert!(matches!(err, StoreError::TransactionClosed));

    assert!(matches!(
        tx.commit().await.unwrap_err(),
        StoreError::TransactionClosed
    ));
    assert!(matches!(
        tx.rollback().await.unwrap_err(),
        StoreError::TransactionClosed
    ));

    assert_eq!(foos.count(&ctx).await.unwrap(), 1);
}

#[tokio::test]
async fn test_transaction_delete_and_pagination() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();
    let foos = store.table::<Foo>(&ctx).await.unwrap();
    foos.insert_many(&ctx, &common::numbered_foos()).await.unwrap();

    let tx = store.begin(&ctx).await.unwrap();
    let view = foos.with_transaction(&tx);

    let deleted = view.delete(&ctx, &less_than("$.id", 6)).await.unwrap();
    assert_eq!(deleted, 5);

    let page = view
        .query_many_with_pagination(&ctx, &all(), 2, 1)
        .await
        .unwrap();
    assert_eq!(page.iter().map(|f| f.id).collect::<Vec<_>>(), vec![7, 8]);
    assert_eq!(
        view.count_where(&ctx, &greater_than("$.id", 8)).await.unwrap(),
        2
    );

    tx.commit().await.unwrap();
    assert_eq!(foos.count(&ctx).await.unwrap(), 5);
}

#[tokio::test]
async fn test_dropped_transaction_rolls_back() {
    let (_dir, store) = open_store().await;
    let ctx = Context::background();
    let foos = store.table::<Foo>(&ctx).await.unwrap();

    {
        let tx = store.begin(&ctx).await.unwrap();
        foos.with_transaction(&tx)
            .insert(&ctx, &Foo::new(1, "foo", "bar", &[]))
            .await
            .unwrap();
    }

    assert_eq!(foos.count(&ctx).await.unwrap(), 0);
}
