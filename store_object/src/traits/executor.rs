//! Statement execution seam shared by plain tables and transactional views

use crate::cancel::Context;
use crate::errors::StoreError;
use async_trait::async_trait;
use serde_json::Value;
use sqlx::sqlite::SqliteRow;

/// A SQL statement with its positional parameters and the context used to
/// attribute failures.
#[derive(Debug, Clone)]
pub struct Statement<'a> {
    pub table: &'a str,
    pub operation: &'static str,
    pub sql: String,
    pub params: Vec<Value>,
}

impl<'a> Statement<'a> {
    pub fn new(table: &'a str, operation: &'static str, sql: impl Into<String>) -> Self {
        Self {
            table,
            operation,
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn with_params(mut self, params: Vec<Value>) -> Self {
        self.params.extend(params);
        self
    }

    pub fn with_param(mut self, param: impl Into<Value>) -> Self {
        self.params.push(param.into());
        self
    }
}

/// Execute-without-result, query-many and query-one over some scope.
///
/// Implementations must check `ctx` before touching the engine and abandon
/// in-flight work when it is cancelled.
#[async_trait]
pub trait DocumentExecutor: Send + Sync {
    /// Run a statement, returning the number of affected rows
    async fn execute(&self, ctx: &Context, statement: &Statement<'_>) -> Result<u64, StoreError>;

    async fn fetch_all(
        &self,
        ctx: &Context,
        statement: &Statement<'_>,
    ) -> Result<Vec<SqliteRow>, StoreError>;

    async fn fetch_optional(
        &self,
        ctx: &Context,
        statement: &Statement<'_>,
    ) -> Result<Option<SqliteRow>, StoreError>;
}
