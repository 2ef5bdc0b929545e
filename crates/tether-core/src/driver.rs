mod response;
pub use response::{Response, Rows};

pub mod operation;
pub use operation::Operation;

mod transaction_nesting;
pub use transaction_nesting::TransactionNesting;

use crate::{async_trait, Result, Schema};

use std::{fmt::Debug, sync::Arc};

/// Opens connections to a database.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Opens a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A single database session.
///
/// Statements run in the order they are submitted. Transaction control is
/// expressed as [`operation::Transaction`] operations; nesting is the
/// connection's responsibility.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Execute a database operation
    async fn exec(&mut self, schema: &Arc<Schema>, op: Operation) -> Result<Response>;

    /// Creates the tables described by the schema.
    async fn push_schema(&mut self, schema: &Schema) -> Result<()>;
}
