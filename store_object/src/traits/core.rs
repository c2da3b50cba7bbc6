//! Trait definitions
//!
//! This module defines the read/write contract shared by plain tables and
//! transactional table views.

use crate::cancel::Context;
use crate::query_builder::{all, Clause, Pagination};
use crate::traits::Document;
use crate::StoreError;
use async_trait::async_trait;

/// CRUD, counting and paginated queries over one document table
#[async_trait]
pub trait StoreObject: Send + Sync {
    /// The record type stored in this table
    type Model: Document;

    /// Physical table name
    fn table_name(&self) -> &str;

    /// Serialize and append one row. Duplicates are kept.
    async fn insert(&self, ctx: &Context, data: &Self::Model) -> Result<(), StoreError>;

    /// Insert every record in order, stopping at the first failure
    async fn insert_many(&self, ctx: &Context, data: &[Self::Model]) -> Result<(), StoreError> {
        for record in data {
            self.insert(ctx, record).await?;
        }
        Ok(())
    }

    /// First matching record in engine order, `None` when nothing matches
    async fn query_one(
        &self,
        ctx: &Context,
        clause: &Clause,
    ) -> Result<Option<Self::Model>, StoreError>;

    /// Matching records with `limit`/`offset` applied; zero means unset
    async fn query_many_with_pagination(
        &self,
        ctx: &Context,
        clause: &Clause,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<Self::Model>, StoreError>;

    /// Every matching record in engine order
    async fn query_many(
        &self,
        ctx: &Context,
        clause: &Clause,
    ) -> Result<Vec<Self::Model>, StoreError> {
        self.query_many_with_pagination(ctx, clause, 0, 0).await
    }

    async fn query_page(
        &self,
        ctx: &Context,
        clause: &Clause,
        page: Pagination,
    ) -> Result<Vec<Self::Model>, StoreError> {
        self.query_many_with_pagination(ctx, clause, page.limit, page.offset)
            .await
    }

    async fn all(&self, ctx: &Context) -> Result<Vec<Self::Model>, StoreError> {
        self.query_many(ctx, &all()).await
    }

    /// Replace the document of every matching row, returning the affected row count
    async fn update(
        &self,
        ctx: &Context,
        clause: &Clause,
        data: &Self::Model,
    ) -> Result<u64, StoreError>;

    /// Remove every matching row, returning the affected row count
    async fn delete(&self, ctx: &Context, clause: &Clause) -> Result<u64, StoreError>;

    /// Total rows in the table
    async fn count(&self, ctx: &Context) -> Result<u64, StoreError>;

    async fn count_where(&self, ctx: &Context, clause: &Clause) -> Result<u64, StoreError>;
}
