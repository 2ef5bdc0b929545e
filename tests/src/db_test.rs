use crate::{
    logging_driver::{DriverOp, FailPoint, LoggingDriver},
    ExecLog, Setup,
};
use std::sync::{Arc, Mutex};
use tether::Db;

/// Per-test state: the backend setup plus handles into the logging driver
/// the database was built with.
pub struct DbTest {
    setup: Box<dyn Setup>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
    fail_point: Arc<Mutex<Option<FailPoint>>>,
}

impl DbTest {
    pub fn new(setup: Box<dyn Setup>) -> Self {
        Self {
            setup,
            ops_log: Arc::new(Mutex::new(Vec::new())),
            fail_point: Arc::new(Mutex::new(None)),
        }
    }

    /// Try to setup a database with models, returns Result for error handling
    pub async fn try_setup_db(&mut self, mut builder: tether::db::Builder) -> tether::Result<Db> {
        self.setup.configure_builder(&mut builder);

        // Always wrap with logging
        let logging_driver = LoggingDriver::new(self.setup.driver());
        self.ops_log = logging_driver.ops_log_handle();
        self.fail_point = logging_driver.fail_point_handle();

        builder.build(logging_driver).await
    }

    /// Setup a database with models, always with logging enabled
    pub async fn setup_db(&mut self, builder: tether::db::Builder) -> Db {
        self.try_setup_db(builder).await.unwrap()
    }

    /// Operations executed since the database was built, or since the log
    /// was last cleared
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }

    /// Makes matching statements fail until [`clear_fail_point`] is called.
    ///
    /// [`clear_fail_point`]: Self::clear_fail_point
    pub fn fail_on(&self, fail_point: FailPoint) {
        *self.fail_point.lock().unwrap() = Some(fail_point);
    }

    pub fn clear_fail_point(&self) {
        *self.fail_point.lock().unwrap() = None;
    }
}
