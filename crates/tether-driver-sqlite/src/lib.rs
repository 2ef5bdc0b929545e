mod value;
pub(crate) use value::Value;

use rusqlite::Connection as RusqliteConnection;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tether_core::{
    async_trait,
    driver::{
        operation::{Operation, QuerySql, Transaction},
        Driver, Response, TransactionNesting,
    },
    err,
    schema::db::Table,
    stmt, Error, Result, Schema,
};
use tether_sql::Serializer;
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a connection URL: `sqlite::memory:` or
    /// `sqlite:<path>`.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(err!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            ));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    async fn connect(&self) -> Result<Box<dyn tether_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
    nesting: TransactionNesting,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;
        Ok(Self::new(connection))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Self::new(connection))
    }

    fn new(connection: RusqliteConnection) -> Self {
        Self {
            connection,
            nesting: TransactionNesting::sqlite(),
        }
    }
}

#[async_trait]
impl tether_core::driver::Connection for Connection {
    async fn exec(&mut self, _schema: &Arc<Schema>, op: Operation) -> Result<Response> {
        match op {
            Operation::QuerySql(op) => self.query_sql(op),
            Operation::Transaction(op) => self.transaction(op),
        }
    }

    async fn push_schema(&mut self, schema: &Schema) -> Result<()> {
        for table in &schema.db.tables {
            self.create_table(table)?;
        }

        Ok(())
    }
}

impl Connection {
    fn query_sql(&mut self, op: QuerySql) -> Result<Response> {
        let QuerySql { stmt, ret } = op;

        match stmt {
            // RETURNING order is unspecified for multi-row inserts, so each
            // row gets its own statement and rows come back in input order.
            stmt::Statement::Insert(insert)
                if !insert.returning.is_empty() && insert.rows.len() > 1 =>
            {
                let mut rows = vec![];

                for insert in insert.split_rows() {
                    let response = self.run(&insert.into(), ret.as_deref())?;
                    rows.extend(response.into_values()?);
                }

                Ok(Response::values(rows))
            }
            stmt => self.run(&stmt, ret.as_deref()),
        }
    }

    fn run(&mut self, stmt: &stmt::Statement, ret: Option<&[stmt::Type]>) -> Result<Response> {
        let mut params: Vec<stmt::Value> = vec![];
        let sql = Serializer::sqlite().serialize(stmt, &mut params);

        tracing::trace!(%sql, params = params.len(), "executing statement");

        let mut prepared = self
            .connection
            .prepare_cached(&sql)
            .map_err(Error::driver_operation_failed)?;

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        if !stmt.returns_rows() {
            let count = prepared
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(Error::driver_operation_failed)?;

            return Ok(Response::count(count as u64));
        }

        let Some(ret) = ret else {
            return Err(Error::invalid_result(format!(
                "statement returns rows but no return types were given; sql={sql}"
            )));
        };

        let mut rows = prepared
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver_operation_failed)?;

        let mut values = vec![];

        while let Some(row) = rows.next().map_err(Error::driver_operation_failed)? {
            let mut items = Vec::with_capacity(ret.len());

            for (index, ty) in ret.iter().enumerate() {
                items.push(Value::from_sql(row, index, *ty)?.into_inner());
            }

            values.push(stmt::ValueRecord::from_vec(items));
        }

        Ok(Response::values(values))
    }

    fn transaction(&mut self, op: Transaction) -> Result<Response> {
        let sql = match op {
            Transaction::Start => self.nesting.start(),
            Transaction::Commit => self.nesting.commit()?,
            Transaction::Rollback => self.nesting.rollback()?,
        };

        tracing::debug!(%sql, depth = self.nesting.depth(), "transaction");

        if let Err(err) = self.connection.execute_batch(&sql) {
            if op == Transaction::Start {
                self.nesting.abort_start();
            }
            return Err(Error::driver_operation_failed(err));
        }

        Ok(Response::empty())
    }

    fn create_table(&mut self, table: &Table) -> Result<()> {
        let sql = Serializer::sqlite().serialize_create_table(table);

        tracing::debug!(table = %table.name, "creating table");

        self.connection
            .execute(&sql, [])
            .map_err(Error::driver_operation_failed)?;

        Ok(())
    }
}
