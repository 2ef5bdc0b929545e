#[macro_use]
mod fmt;
use fmt::ToSql;

mod create_table;

mod delim;
use delim::{Comma, Delimited};

mod expr;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

mod statement;

use tether_core::{schema::db::Table, stmt::Statement};

/// Serializes statements to SQLite SQL text.
///
/// Values are never inlined; each one is handed to [`Params`] and replaced by
/// a numbered placeholder (`?1`, `?2`, ...).
#[derive(Debug, Default)]
pub struct Serializer {
    _priv: (),
}

struct Formatter<'a, T> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer { _priv: () }
    }

    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut f = Formatter {
            dst: &mut ret,
            params,
        };

        stmt.to_sql(&mut f);

        ret.push(';');
        ret
    }

    /// Serializes a `CREATE TABLE IF NOT EXISTS` statement for the table.
    pub fn serialize_create_table(&self, table: &Table) -> String {
        let mut ret = String::new();
        let mut params = params::NoParams;

        let mut f = Formatter {
            dst: &mut ret,
            params: &mut params,
        };

        create_table::CreateTable(table).to_sql(&mut f);

        ret.push(';');
        ret
    }
}
