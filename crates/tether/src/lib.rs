// Lets `#[derive(Model)]` be used in this crate's own tests.
#[cfg(test)]
extern crate self as tether;

pub mod db;
pub use db::Db;

mod executor;
pub use executor::Executor;

mod model;
pub use model::{generate_unique_id, Model};

pub mod persist;

pub mod relation;
pub use relation::{BelongsTo, HasMany, HasManyThrough, HasOne};

pub mod schema;

pub mod stmt;
pub use stmt::{col, Query};

mod transaction;
pub use transaction::Transaction;

pub use tether_macros::Model;

pub use tether_core::{driver, Error, Result};

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{
        model::generate_unique_id,
        relation::{BelongsTo, HasMany, HasManyThrough, HasOne},
        schema,
        stmt::Primitive,
        Error, Model, Result,
    };
    pub use std::{default::Default, sync::OnceLock, vec::Vec};
    pub use tether_core::{
        schema::app::ModelId,
        stmt::{Value, ValueRecord},
    };
}
