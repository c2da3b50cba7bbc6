//! Transactional table views
//!
//! A [`TableTx`] runs every operation inside one open [`Transaction`]. Its
//! writes are visible to reads through any view on the same transaction and
//! invisible to plain tables until the transaction commits. Tables and
//! indexes are created through [`Table`](super::Table), never inside a
//! transaction.
//!
//! # Example
//! ```ignore
//! let tx = connection.begin(&ctx).await?;
//! let foos = table.with_transaction(&tx);
//!
//! foos.insert(&ctx, &foo).await?;
//! let found = foos.query_one(&ctx, &equal("$.name", "foo")).await?;
//!
//! tx.commit().await?;
//! ```

use crate::cancel::Context;
use crate::connection::Transaction;
use crate::errors::StoreError;
use crate::generic_store::operations::DocumentOps;
use crate::query_builder::{Clause, Pagination};
use crate::traits::{Document, StoreObject};
use async_trait::async_trait;
use std::marker::PhantomData;

/// A table view bound to one open transaction
pub struct TableTx<'a, T: Document> {
    name: &'a str,
    tx: Transaction,
    _phantom: PhantomData<T>,
}

impl<T: Document> std::fmt::Debug for TableTx<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableTx")
            .field("name", &self.name)
            .field("tx", &self.tx)
            .finish()
    }
}

impl<'a, T: Document> TableTx<'a, T> {
    pub(crate) fn new(name: &'a str, tx: Transaction) -> Self {
        Self {
            name,
            tx,
            _phantom: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        self.name
    }

    pub fn transaction(&self) -> &Transaction {
        &self.tx
    }

    fn ops(&self) -> DocumentOps<'_, Transaction> {
        DocumentOps::new(&self.tx, self.name)
    }
}

#[async_trait]
impl<'a, T: Document> StoreObject for TableTx<'a, T> {
    type Model = T;

    fn table_name(&self) -> &str {
        self.name
    }

    async fn insert(&self, ctx: &Context, data: &Self::Model) -> Result<(), StoreError> {
        self.ops().insert(ctx, data).await
    }

    async fn query_one(
        &self,
        ctx: &Context,
        clause: &Clause,
    ) -> Result<Option<Self::Model>, StoreError> {
        self.ops().query_one(ctx, clause).await
    }

    async fn query_many_with_pagination(
        &self,
        ctx: &Context,
        clause: &Clause,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Self::Model>, StoreError> {
        self.ops()
            .query_many(ctx, clause, Pagination::new(limit, offset))
            .await
    }

    async fn update(
        &self,
        ctx: &Context,
        clause: &Clause,
        data: &Self::Model,
    ) -> Result<u64, StoreError> {
        self.ops().update(ctx, clause, data).await
    }

    async fn delete(&self, ctx: &Context, clause: &Clause) -> Result<u64, StoreError> {
        self.ops().delete(ctx, clause).await
    }

    async fn count(&self, ctx: &Context) -> Result<u64, StoreError> {
        self.ops().count(ctx, None).await
    }

    async fn count_where(&self, ctx: &Context, clause: &Clause) -> Result<u64, StoreError> {
        self.ops().count(ctx, Some(clause)).await
    }
}
