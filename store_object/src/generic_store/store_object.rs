//! Generic store implementations
//!
//! [`StoreObject`] for plain tables: every statement runs on the pool.

use super::core::Table;
use crate::cancel::Context;
use crate::errors::StoreError;
use crate::query_builder::{Clause, Pagination};
use crate::traits::{Document, StoreObject};
use async_trait::async_trait;

#[async_trait]
impl<T: Document> StoreObject for Table<T> {
    type Model = T;

    fn table_name(&self) -> &str {
        &self.name
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
