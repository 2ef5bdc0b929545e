
pub mod db;

mod db_test;
pub use db_test::DbTest;

mod exec_log;
pub use exec_log::ExecLog;

mod logging_driver;
pub use logging_driver::{DriverOp, FailPoint, LoggingDriver};

pub mod prelude;

use tether::{
    driver::{operation::QuerySql, Driver},
    Executor,
};
use tether_core::stmt::{Select, Type, ValueRecord};

/// A database backend the scenario tests run against.
pub trait Setup: Send + Sync + 'static {
    /// A driver for a fresh, empty database.
    fn driver(&self) -> Box<dyn Driver>;

    /// Configure the builder with backend specific settings (like table prefixes)
    fn configure_builder(&self, _builder: &mut tether::db::Builder) {}
}

/// Installs a `tracing` subscriber writing to the test output. Filtered with
/// `RUST_LOG`; only the first call in a process has an effect.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Reads the given columns of every row of `table`, bypassing models and
/// relations.
pub async fn table_rows(
    db: &mut impl Executor,
    table: &str,
    columns: &[(&str, Type)],
) -> tether::Result<Vec<ValueRecord>> {
    let select = Select::new(
        table,
        columns.iter().map(|(name, _)| name.to_string()).collect(),
    );

    let op = QuerySql {
        stmt: select.into(),
        ret: Some(columns.iter().map(|(_, ty)| *ty).collect()),
    };

    db.exec(op.into()).await?.into_values()
}
