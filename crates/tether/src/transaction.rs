use crate::Executor;

use tether_core::{
    async_trait,
    driver::{operation, Operation, Response},
    Result, Schema,
};

use std::sync::Arc;

/// An atomic unit of work.
///
/// Borrows the parent executor for its lifetime. Beginning a transaction on
/// another transaction nests it; the driver maps nested levels to savepoints.
///
/// If dropped without calling [`commit`](Self::commit) or
/// [`rollback`](Self::rollback), the transaction is rolled back before the
/// parent executor runs its next operation.
pub struct Transaction<'a> {
    executor: &'a mut dyn Executor,

    /// Whether commit or rollback has been issued.
    finished: bool,
}

impl<'a> Transaction<'a> {
    pub async fn begin(executor: &'a mut dyn Executor) -> Result<Transaction<'a>> {
        executor
            .exec(operation::Transaction::Start.into())
            .await?;

        tracing::debug!("transaction started");

        Ok(Transaction {
            executor,
            finished: false,
        })
    }

    /// Commit the transaction.
    pub async fn commit(mut self) -> Result<()> {
        self.finished = true;
        self.executor
            .exec(operation::Transaction::Commit.into())
            .await?;

        tracing::debug!("transaction committed");
        Ok(())
    }

    /// Roll back the transaction.
    pub async fn rollback(mut self) -> Result<()> {
        self.finished = true;
        self.executor
            .exec(operation::Transaction::Rollback.into())
            .await?;

        tracing::debug!("transaction rolled back");
        Ok(())
    }

    /// Commits if `result` is `Ok`, otherwise rolls back and returns the
    /// original error.
    pub async fn finish<T>(self, result: Result<T>) -> Result<T> {
        match result {
            Ok(value) => {
                self.commit().await?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = self.rollback().await {
                    tracing::warn!(error = %rollback_err, "rollback failed");
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl Executor for Transaction<'_> {
    fn schema(&self) -> &Arc<Schema> {
        self.executor.schema()
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        self.executor.exec(op).await
    }

    fn abandon_transaction(&mut self) {
        self.executor.abandon_transaction();
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!("transaction dropped while open");
            self.executor.abandon_transaction();
        }
    }
}

impl std::fmt::Debug for Transaction<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("finished", &self.finished)
            .finish()
    }
}
