use std::sync::{Arc, Mutex};
use tether::driver::Driver;
use tether_core::{
    async_trait,
    driver::{Connection, Operation, Response},
    err,
    stmt::Statement,
    Result, Schema,
};

/// Wraps a driver, recording every operation and its response.
///
/// A [`FailPoint`] makes matching statements fail without reaching the
/// database, which lets tests observe rollback behavior.
#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Log of all operations executed through this driver
    ops_log: Arc<Mutex<Vec<DriverOp>>>,

    fail_point: Arc<Mutex<Option<FailPoint>>>,
}

impl LoggingDriver {
    pub fn new(driver: Box<dyn Driver>) -> Self {
        Self {
            inner: driver,
            ops_log: Arc::new(Mutex::new(Vec::new())),
            fail_point: Arc::new(Mutex::new(None)),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }

    /// Get a handle to arm or clear the fail point
    pub fn fail_point_handle(&self) -> Arc<Mutex<Option<FailPoint>>> {
        self.fail_point.clone()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            ops_log: self.ops_log_handle(),
            fail_point: self.fail_point_handle(),
        }))
    }
}

#[derive(Debug)]
pub struct DriverOp {
    pub operation: Operation,
    pub response: Response,
}

/// Which statements a [`LoggingDriver`] rejects.
#[derive(Debug, Clone)]
pub struct FailPoint {
    kind: StatementKind,
    table: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StatementKind {
    Insert,
    Update,
    Delete,
}

impl FailPoint {
    pub fn insert_into(table: &str) -> Self {
        Self::new(StatementKind::Insert, table)
    }

    pub fn update_of(table: &str) -> Self {
        Self::new(StatementKind::Update, table)
    }

    pub fn delete_from(table: &str) -> Self {
        Self::new(StatementKind::Delete, table)
    }

    fn new(kind: StatementKind, table: &str) -> Self {
        Self {
            kind,
            table: table.to_string(),
        }
    }

    fn matches(&self, operation: &Operation) -> bool {
        let Some(query) = operation.as_query_sql() else {
            return false;
        };

        let kind = match &query.stmt {
            Statement::Insert(_) => StatementKind::Insert,
            Statement::Update(_) => StatementKind::Update,
            Statement::Delete(_) => StatementKind::Delete,
            Statement::Select(_) => return false,
        };

        kind == self.kind && query.stmt.table() == self.table
    }
}

#[derive(Debug)]
pub struct LoggingConnection {
    /// The underlying connection that actually executes operations
    inner: Box<dyn Connection>,

    ops_log: Arc<Mutex<Vec<DriverOp>>>,

    fail_point: Arc<Mutex<Option<FailPoint>>>,
}

#[async_trait]
impl Connection for LoggingConnection {
    async fn exec(&mut self, schema: &Arc<Schema>, operation: Operation) -> Result<Response> {
        let fail = self
            .fail_point
            .lock()
            .expect("Failed to acquire fail point lock")
            .as_ref()
            .is_some_and(|fail_point| fail_point.matches(&operation));

        if fail {
            return Err(err!("injected failure; operation={operation:?}"));
        }

        let response = self.inner.exec(schema, operation.clone()).await?;

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(DriverOp {
                operation,
                response: response.clone(),
            });

        Ok(response)
    }

    async fn push_schema(&mut self, schema: &Schema) -> Result<()> {
        self.inner.push_schema(schema).await
    }
}
