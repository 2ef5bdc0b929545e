mod builder;
pub use builder::Builder;

mod connect;
pub use connect::Connect;

use crate::{Executor, Transaction};

use tether_core::{
    async_trait,
    driver::{operation, Connection, Operation, Response},
    Result, Schema,
};

use std::sync::Arc;

/// A database handle owning one connection.
///
/// Operations run in the order they are issued. Use [`Db::transaction`] or
/// [`Transaction::begin`] to group them into an atomic unit.
#[derive(Debug)]
pub struct Db {
    schema: Arc<Schema>,

    connection: Box<dyn Connection>,

    /// Transactions dropped while open, innermost last. Each one is rolled
    /// back before the next operation runs.
    abandoned: usize,
}

impl Db {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(schema: Arc<Schema>, connection: Box<dyn Connection>) -> Db {
        Db {
            schema,
            connection,
            abandoned: 0,
        }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Creates the tables for every registered model and join table.
    pub async fn push_schema(&mut self) -> Result<()> {
        self.rollback_abandoned().await?;
        self.connection.push_schema(&self.schema).await
    }

    pub async fn transaction(&mut self) -> Result<Transaction<'_>> {
        Transaction::begin(self).await
    }

    async fn rollback_abandoned(&mut self) -> Result<()> {
        while self.abandoned > 0 {
            self.abandoned -= 1;

            tracing::debug!("rolling back abandoned transaction");
            self.connection
                .exec(&self.schema, operation::Transaction::Rollback.into())
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl Executor for Db {
    fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        self.rollback_abandoned().await?;
        self.connection.exec(&self.schema, op).await
    }

    fn abandon_transaction(&mut self) {
        self.abandoned += 1;
    }
}
