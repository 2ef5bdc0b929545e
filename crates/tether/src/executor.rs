use tether_core::{
    async_trait,
    driver::{operation::QuerySql, Operation, Response},
    stmt::{Statement, Type, ValueRecord},
    Result, Schema,
};

use std::sync::Arc;

/// Runs operations against a database session.
///
/// Implemented by [`Db`](crate::Db) and by [`Transaction`](crate::Transaction),
/// so every relation accessor and persistence helper works the same way
/// inside and outside a transaction.
#[async_trait]
pub trait Executor: Send {
    fn schema(&self) -> &Arc<Schema>;

    async fn exec(&mut self, op: Operation) -> Result<Response>;

    /// Records that a transaction opened on this executor was dropped while
    /// still open. It must be rolled back before the next operation runs.
    #[doc(hidden)]
    fn abandon_transaction(&mut self);
}

/// Runs a statement that does not return rows and returns the affected row
/// count.
pub(crate) async fn exec_count<E>(db: &mut E, stmt: Statement) -> Result<u64>
where
    E: Executor + ?Sized,
{
    let op = QuerySql { stmt, ret: None };
    db.exec(op.into()).await?.into_count()
}

/// Runs a statement returning rows with the given column types.
pub(crate) async fn exec_rows<E>(
    db: &mut E,
    stmt: Statement,
    ret: Vec<Type>,
) -> Result<Vec<ValueRecord>>
where
    E: Executor + ?Sized,
{
    let op = QuerySql {
        stmt,
        ret: Some(ret),
    };
    db.exec(op.into()).await?.into_values()
}
