//! Statement assembly shared by [`Table`](super::Table) and
//! [`TableTx`](super::TableTx).
//!
//! Every statement is built from the table name and a clause's rendered SQL
//! and values; the executor decides whether it runs on the pool or inside a
//! transaction.

use crate::cancel::Context;
use crate::errors::StoreError;
use crate::naming::index_name;
use crate::query_builder::{json_field, Clause, Pagination, DOCUMENT_COLUMN};
use crate::traits::{Document, DocumentExecutor, Statement};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

pub(crate) struct DocumentOps<'a, E: DocumentExecutor + ?Sized> {
    pub(crate) executor: &'a E,
    pub(crate) table: &'a str,
}

impl<'a, E: DocumentExecutor + ?Sized> DocumentOps<'a, E> {
    pub(crate) fn new(executor: &'a E, table: &'a str) -> Self {
        Self { executor, table }
    }

    pub(crate) async fn create_table(&self, ctx: &Context) -> Result<(), StoreError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS \"{}\" ({} TEXT NOT NULL)",
            self.table, DOCUMENT_COLUMN
        );
        self.executor
            .execute(ctx, &Statement::new(self.table, "create_table", sql))
            .await?;
        Ok(())
    }

    pub(crate) async fn create_index(
        &self,
        ctx: &Context,
        fields: &[&str],
    ) -> Result<String, StoreError> {
        let name = index_name(self.table, fields);

        let projections = fields
            .iter()
            .map(|field| json_field(field))
            .collect::<Vec<_>>()
            .join(", ");

        let sql = format!(
            "CREATE INDEX IF NOT EXISTS \"{}\" ON \"{}\" ({})",
            name, self.table, projections
        );

        self.executor
            .execute(ctx, &Statement::new(self.table, "create_index", sql))
            .await
            .map_err(|e| StoreError::index_creation(&name, fields, e))?;

        tracing::debug!(table = self.table, index = %name, "index ensured");
        Ok(name)
    }

    pub(crate) async fn create_indexes(
        &self,
        ctx: &Context,
        indexes: &[&[&str]],
    ) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::with_capacity(indexes.len());
        for fields in indexes {
            names.push(self.create_index(ctx, fields).await?);
        }
        Ok(names)
    }

    pub(crate) async fn has_index(&self, ctx: &Context, name: &str) -> Result<bool, StoreError> {
        let statement = Statement::new(
            self.table,
            "has_index",
            "SELECT name FROM sqlite_master WHERE type = 'index' AND tbl_name = ? AND name = ?",
        )
        .with_param(self.table)
        .with_param(name);

        Ok(self.executor.fetch_optional(ctx, &statement).await?.is_some())
    }

    fn encode<T: Document>(&self, operation: &'static str, data: &T) -> Result<String, StoreError> {
        serde_json::to_string(data).map_err(|e| StoreError::serialization(self.table, operation, e))
    }

    fn decode<T: Document>(&self, operation: &'static str, row: &SqliteRow) -> Result<T, StoreError> {
        let raw: String = row
            .try_get(DOCUMENT_COLUMN)
            .map_err(|e| StoreError::database_operation(self.table, operation, e))?;
        serde_json::from_str(&raw).map_err(|e| StoreError::serialization(self.table, operation, e))
    }

    pub(crate) async fn insert<T: Document>(&self, ctx: &Context, data: &T) -> Result<(), StoreError> {
        ctx.check()?;
        let document = self.encode("insert", data)?;
        let sql = format!("INSERT INTO \"{}\" ({}) VALUES (?)", self.table, DOCUMENT_COLUMN);
        let statement = Statement::new(self.table, "insert", sql).with_param(document);

        self.executor.execute(ctx, &statement).await?;
        Ok(())
    }

    fn select_sql(&self, where_clause: &str, page: Pagination) -> String {
        format!(
            "SELECT {} FROM \"{}\" WHERE {}{}",
            DOCUMENT_COLUMN,
            self.table,
            where_clause,
            page.to_sql()
        )
    }

    pub(crate) async fn query_one<T: Document>(
        &self,
        ctx: &Context,
        clause: &Clause,
    ) -> Result<Option<T>, StoreError> {
        let (where_clause, values) = clause.build();
        let sql = self.select_sql(&where_clause, Pagination::new(1, 0));
        let statement = Statement::new(self.table, "query_one", sql).with_params(values);

        match self.executor.fetch_optional(ctx, &statement).await? {
            Some(row) => self.decode("query_one", &row).map(Some),
            None => Ok(None),
        }
    }

    pub(crate) async fn query_many<T: Document>(
        &self,
        ctx: &Context,
        clause: &Clause,
        page: Pagination,
    ) -> Result<Vec<T>, StoreError> {
        let (where_clause, values) = clause.build();
        let sql = self.select_sql(&where_clause, page);
        debug_log!("[QUERY_MANY] Table: {} SQL: {}", self.table, sql);
        let statement = Statement::new(self.table, "query_many", sql).with_params(values);

        let rows = self.executor.fetch_all(ctx, &statement).await?;
        rows.iter()
            .map(|row| self.decode("query_many", row))
            .collect()
    }

    pub(crate) async fn update<T: Document>(
        &self,
        ctx: &Context,
        clause: &Clause,
        data: &T,
    ) -> Result<u64, StoreError> {
        ctx.check()?;
        let document = self.encode("update", data)?;
        let (where_clause, values) = clause.build();
        let sql = format!(
            "UPDATE \"{}\" SET {} = ? WHERE {}",
            self.table, DOCUMENT_COLUMN, where_clause
        );
        let statement = Statement::new(self.table, "update", sql)
            .with_param(document)
            .with_params(values);

        let affected = self.executor.execute(ctx, &statement).await?;
        debug_log!("[UPDATE] Table: {} affected rows: {}", self.table, affected);
        Ok(affected)
    }

    pub(crate) async fn delete(&self, ctx: &Context, clause: &Clause) -> Result<u64, StoreError> {
        let (where_clause, values) = clause.build();
        let sql = format!("DELETE FROM \"{}\" WHERE {}", self.table, where_clause);
        let statement = Statement::new(self.table, "delete", sql).with_params(values);

        let affected = self.executor.execute(ctx, &statement).await?;
        debug_log!("[DELETE] Table: {} affected rows: {}", self.table, affected);
        Ok(affected)
    }

    pub(crate) async fn count(&self, ctx: &Context, clause: Option<&Clause>) -> Result<u64, StoreError> {
        let mut sql = format!("SELECT COUNT(*) AS count FROM \"{}\"", self.table);
        let mut values = Vec::new();
        if let Some(clause) = clause {
            let (where_clause, clause_values) = clause.build();
            sql.push_str(" WHERE ");
            sql.push_str(&where_clause);
            values = clause_values;
        }
        let statement = Statement::new(self.table, "count", sql).with_params(values);

        let row = self
            .executor
            .fetch_optional(ctx, &statement)
            .await?
            .ok_or_else(|| StoreError::database_operation(self.table, "count", sqlx::Error::RowNotFound))?;
        let count: i64 = row
            .try_get("count")
            .map_err(|e| StoreError::database_operation(self.table, "count", e))?;
        Ok(count.max(0) as u64)
    }
}
