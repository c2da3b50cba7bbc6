use crate::cancel::Context;
use crate::connection::{Connection, Transaction};
use crate::errors::StoreError;
use crate::generic_store::operations::DocumentOps;
use crate::generic_store::transaction::TableTx;
use crate::naming::{index_name, validate_identifier};
use crate::traits::Document;
use std::marker::PhantomData;

/// A record type bound to its physical table.
///
/// The table holds one JSON document column per row and is created on
/// construction if it does not exist.
pub struct Table<T: Document> {
    pub(crate) connection: Connection,
    pub(crate) name: String,
    pub(crate) _phantom: PhantomData<T>,
}

impl<T: Document> Clone for Table<T> {
    fn clone(&self) -> Self {
        Self {
            connection: self.connection.clone(),
            name: self.name.clone(),
            _phantom: PhantomData,
        }
    }
}

impl<T: Document> std::fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table").field("name", &self.name).finish()
    }
}

impl<T: Document> Table<T> {
    /// Bind `T` to its table, creating the table if needed
    pub async fn new(ctx: &Context, connection: &Connection) -> Result<Self, StoreError> {
        let name = T::table_name();
        validate_identifier(&name)
            .map_err(|e| StoreError::validation(format!("table for {}: {}", T::type_path(), e)))?;

        let table = Self {
            connection: connection.clone(),
            name,
            _phantom: PhantomData,
        };
        table.create_table(ctx).await?;
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub(crate) fn ops(&self) -> DocumentOps<'_, Connection> {
        DocumentOps::new(&self.connection, &self.name)
    }

    /// Create the table if it does not exist
    pub async fn create_table(&self, ctx: &Context) -> Result<(), StoreError> {
        self.ops().create_table(ctx).await
    }

    /// Create an index over the given field paths if it does not exist,
    /// returning its deterministic name
    pub async fn create_index(&self, ctx: &Context, fields: &[&str]) -> Result<String, StoreError> {
        self.ops().create_index(ctx, fields).await
    }

    /// Create several indexes, stopping at the first field set that fails
    pub async fn create_indexes(
        &self,
        ctx: &Context,
        indexes: &[&[&str]],
    ) -> Result<Vec<String>, StoreError> {
        self.ops().create_indexes(ctx, indexes).await
    }

    pub fn index_name(&self, fields: &[&str]) -> String {
        index_name(&self.name, fields)
    }

    pub async fn has_index(&self, ctx: &Context, name: &str) -> Result<bool, StoreError> {
        self.ops().has_index(ctx, name).await
    }

    /// View of this table bound to an open transaction.
    ///
    /// Does not begin, commit or roll back `tx`.
    pub fn with_transaction(&self, tx: &Transaction) -> TableTx<'_, T> {
        TableTx::new(&self.name, tx.clone())
    }
}
