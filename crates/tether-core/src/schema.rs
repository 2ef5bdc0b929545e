pub mod app;
pub mod db;

use crate::Result;

/// Runtime schema: the application level model and relation metadata
/// together with the database tables derived from it.
#[derive(Debug)]
pub struct Schema {
    /// Models and their relations
    pub app: app::Schema,

    /// Tables backing the models and join tables
    pub db: db::Schema,
}

impl Schema {
    /// Derives the database schema from a fully resolved app schema.
    pub fn from_app(app: app::Schema) -> Result<Schema> {
        let db = db::Schema::from_app(&app)?;
        Ok(Schema { app, db })
    }
}
