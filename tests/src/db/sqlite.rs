use tether::driver::Driver;
use tether_driver_sqlite::Sqlite;

use crate::Setup;

pub struct SetupSqlite;

impl SetupSqlite {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SetupSqlite {
    fn default() -> Self {
        Self::new()
    }
}

impl Setup for SetupSqlite {
    fn driver(&self) -> Box<dyn Driver> {
        // Every connection to `InMemory` opens its own database
        Box::new(Sqlite::in_memory())
    }
}
