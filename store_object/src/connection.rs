//! Connection façade
//!
//! [`Connection`] wraps a SQLite pool opened with the configured pragmas.
//! [`Transaction`] wraps one open engine transaction. Both implement
//! [`DocumentExecutor`], so table operations run identically in either scope.

use crate::cancel::Context;
use crate::errors::StoreError;
use crate::query_builder::bind_values;
use crate::traits::{DocumentExecutor, Statement};
use async_trait::async_trait;
use config::{DatabaseConfig, JournalMode, SynchronousMode};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions, SqliteRow,
    SqliteSynchronous,
};
use sqlx::Sqlite;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

fn synchronous_mode(mode: SynchronousMode) -> SqliteSynchronous {
    match mode {
        SynchronousMode::Off => SqliteSynchronous::Off,
        SynchronousMode::Normal => SqliteSynchronous::Normal,
        SynchronousMode::Full => SqliteSynchronous::Full,
        SynchronousMode::Extra => SqliteSynchronous::Extra,
    }
}

fn journal_mode(mode: JournalMode) -> SqliteJournalMode {
    match mode {
        JournalMode::Delete => SqliteJournalMode::Delete,
        JournalMode::Truncate => SqliteJournalMode::Truncate,
        JournalMode::Persist => SqliteJournalMode::Persist,
        JournalMode::Memory => SqliteJournalMode::Memory,
        JournalMode::Wal => SqliteJournalMode::Wal,
        JournalMode::Off => SqliteJournalMode::Off,
    }
}

/// Handle to a pooled SQLite database
#[derive(Debug, Clone)]
pub struct Connection {
    pool: SqlitePool,
}

impl Connection {
    /// Open the database, applying busy timeout, synchronous and journal
    /// mode to every pooled connection.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        config
            .validate()
            .map_err(|e| StoreError::validation(e.to_string()))?;

        let options = SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(config.create_if_missing)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
            .synchronous(synchronous_mode(config.synchronous))
            .journal_mode(journal_mode(config.journal_mode));

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_seconds))
            .connect_with(options)
            .await
            .map_err(StoreError::Connection)?;

        tracing::debug!(
            path = %config.path,
            journal_mode = %config.journal_mode,
            synchronous = %config.synchronous,
            "opened sqlite pool"
        );

        Ok(Self { pool })
    }

    /// Wrap an already configured pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Begin a transaction on a dedicated pooled connection
    pub async fn begin(&self, ctx: &Context) -> Result<Transaction, StoreError> {
        let tx = ctx
            .run(self.pool.begin())
            .await?
            .map_err(|e| StoreError::database_operation("transaction", "begin", e))?;

        debug_log!("transaction started");
        Ok(Transaction {
            inner: Arc::new(Mutex::new(Some(tx))),
        })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl DocumentExecutor for Connection {
    async fn execute(&self, ctx: &Context, statement: &Statement<'_>) -> Result<u64, StoreError> {
        trace_log!("[{}] {} ({} params)", statement.operation, statement.sql, statement.params.len());
        let query = bind_values(sqlx::query(&statement.sql), &statement.params);
        let result = ctx
            .run(query.execute(&self.pool))
            .await?
            .map_err(|e| StoreError::database_operation(statement.table, statement.operation, e))?;
        Ok(result.rows_affected())
    }

    async fn fetch_all(
        &self,
        ctx: &Context,
        statement: &Statement<'_>,
    ) -> Result<Vec<SqliteRow>, StoreError> {
        trace_log!("[{}] {} ({} params)", statement.operation, statement.sql, statement.params.len());
        let query = bind_values(sqlx::query(&statement.sql), &statement.params);
        ctx.run(query.fetch_all(&self.pool))
            .await?
            .map_err(|e| StoreError::database_operation(statement.table, statement.operation, e))
    }

    async fn fetch_optional(
        &self,
        ctx: &Context,
        statement: &Statement<'_>,
    ) -> Result<Option<SqliteRow>, StoreError> {
        trace_log!("[{}] {} ({} params)", statement.operation, statement.sql, statement.params.len());
        let query = bind_values(sqlx::query(&statement.sql), &statement.params);
        ctx.run(query.fetch_optional(&self.pool))
            .await?
            .map_err(|e| StoreError::database_operation(statement.table, statement.operation, e))
    }
}

/// An open engine transaction.
///
/// Clones share the same transaction. After [`Transaction::commit`] or
/// [`Transaction::rollback`] every operation through any clone fails with
/// [`StoreError::TransactionClosed`]. Dropping the last clone of an
/// unfinished transaction rolls it back.
#[derive(Clone)]
pub struct Transaction {
    inner: Arc<Mutex<Option<sqlx::Transaction<'static, Sqlite>>>>,
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("shared_handles", &Arc::strong_count(&self.inner))
            .finish()
    }
}

impl Transaction {
    pub async fn is_active(&self) -> bool {
        self.inner.lock().await.is_some()
    }

    pub async fn commit(&self) -> Result<(), StoreError> {
        let tx = self
            .inner
            .lock()
            .await
            .take()
            .ok_or(StoreError::TransactionClosed)?;

        tx.commit()
            .await
            .map_err(|e| StoreError::database_operation("transaction", "commit", e))?;
        debug_log!("transaction committed");
        Ok(())
    }

    pub async fn rollback(&self) -> Result<(), StoreError> {
        let tx = self
            .inner
            .lock()
            .await
            .take()
            .ok_or(StoreError::TransactionClosed)?;

        tx.rollback()
            .await
            .map_err(|e| StoreError::database_operation("transaction", "rollback", e))?;
        debug_log!("transaction rolled back");
        Ok(())
    }
}

#[async_trait]
impl DocumentExecutor for Transaction {
    async fn execute(&self, ctx: &Context, statement: &Statement<'_>) -> Result<u64, StoreError> {
        trace_log!("[tx:{}] {} ({} params)", statement.operation, statement.sql, statement.params.len());
        let query = bind_values(sqlx::query(&statement.sql), &statement.params);
        ctx.run(async {
            let mut guard = self.inner.lock().await;
            let tx = guard.as_mut().ok_or(StoreError::TransactionClosed)?;
            let result = query.execute(&mut **tx).await.map_err(|e| {
                StoreError::database_operation(statement.table, statement.operation, e)
            })?;
            Ok::<_, StoreError>(result.rows_affected())
        })
        .await?
    }

    async fn fetch_all(
        &self,
        ctx: &Context,
        statement: &Statement<'_>,
    ) -> Result<Vec<SqliteRow>, StoreError> {
        trace_log!("[tx:{}] {} ({} params)", statement.operation, statement.sql, statement.params.len());
        let query = bind_values(sqlx::query(&statement.sql), &statement.params);
        ctx.run(async {
            let mut guard = self.inner.lock().await;
            let tx = guard.as_mut().ok_or(StoreError::TransactionClosed)?;
            query.fetch_all(&mut **tx).await.map_err(|e| {
                StoreError::database_operation(statement.table, statement.operation, e)
            })
        })
        .await?
    }

    async fn fetch_optional(
        &self,
        ctx: &Context,
        statement: &Statement<'_>,
    ) -> Result<Option<SqliteRow>, StoreError> {
        trace_log!("[tx:{}] {} ({} params)", statement.operation, statement.sql, statement.params.len());
        let query = bind_values(sqlx::query(&statement.sql), &statement.params);
        ctx.run(async {
            let mut guard = self.inner.lock().await;
            let tx = guard.as_mut().ok_or(StoreError::TransactionClosed)?;
            query.fetch_optional(&mut **tx).await.map_err(|e| {
                StoreError::database_operation(statement.table, statement.operation, e)
            })
        })
        .await?
    }
}
