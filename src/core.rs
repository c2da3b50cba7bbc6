//! Core DocStore functionality
//!
//! This module contains the main DocStore struct, which owns the connection
//! pool and hands out tables and transactions bound to it.

use sqlx::SqlitePool;
use store_object::{Context, Connection, Document, Table, Transaction};

use crate::errors::DocStoreError;
use config::{AppConfig, DatabaseConfig};

/// Main DocStore coordinator that manages the database connection
#[derive(Debug, Clone)]
pub struct DocStore {
    connection: Connection,
}

impl DocStore {
    /// Open the database described by `config`
    pub async fn new(config: DatabaseConfig) -> Result<Self, DocStoreError> {
        let connection = Connection::open(&config).await?;
        debug_log!(path = %config.path, "docstore opened");
        Ok(Self { connection })
    }

    /// Open the database described by an application config
    pub async fn from_config(config: &AppConfig) -> Result<Self, DocStoreError> {
        Self::new(config.database.clone()).await
    }

    /// Load configuration from `DOCSTORE_CONFIG` or `./docstore.toml` and open it
    pub async fn load() -> Result<Self, DocStoreError> {
        let config = AppConfig::load()?;
        Self::from_config(&config).await
    }

    /// Wrap an existing connection
    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Get database pool reference
    pub fn pool(&self) -> &SqlitePool {
        self.connection.pool()
    }

    /// Bind `T` to its table, creating the table if it does not exist
    pub async fn table<T: Document>(&self, ctx: &Context) -> Result<Table<T>, DocStoreError> {
        let table = Table::new(ctx, &self.connection).await?;
        trace_log!(table = table.name(), "table bound");
        Ok(table)
    }

    /// Begin a transaction on a dedicated pooled connection
    pub async fn begin(&self, ctx: &Context) -> Result<Transaction, DocStoreError> {
        Ok(self.connection.begin(ctx).await?)
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), DocStoreError> {
        sqlx::query("SELECT 1").fetch_one(self.pool()).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked out connections to be returned
    pub async fn close(&self) {
        self.connection.close().await;
        tracing::info!("docstore closed");
    }
}
