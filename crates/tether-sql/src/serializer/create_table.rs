use super::{Comma, Formatter, Ident, Params, ToSql};

use tether_core::{
    schema::db::{Column, Table},
    stmt::Type,
};

pub(super) struct CreateTable<'a>(pub(super) &'a Table);

impl ToSql for CreateTable<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let table = self.0;

        // SQLite only supports an auto incrementing column when it is the
        // whole primary key, declared inline.
        let inline_pk = table
            .columns
            .iter()
            .any(|column| column.auto_increment && column.primary_key);

        fmt!(f, "CREATE TABLE IF NOT EXISTS " Ident(&table.name) " (");

        for (index, column) in table.columns.iter().enumerate() {
            fmt!(f, "\n    " ColumnDef(column));
            if index < table.columns.len() - 1 {
                fmt!(f, ",");
            }
        }

        if !inline_pk {
            let pk = Comma(table.primary_key_columns().map(|column| Ident(&column.name)));
            fmt!(f, ",\n    PRIMARY KEY (" pk ")");
        }

        fmt!(f, "\n)");
    }
}

struct ColumnDef<'a>(&'a Column);

impl ToSql for ColumnDef<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let column = self.0;

        fmt!(f, Ident(&column.name) " " storage_ty(column.ty));

        if column.auto_increment && column.primary_key {
            fmt!(f, " PRIMARY KEY AUTOINCREMENT");
        } else if !column.nullable {
            fmt!(f, " NOT NULL");
        }
    }
}

fn storage_ty(ty: Type) -> &'static str {
    match ty {
        Type::Bool | Type::I32 | Type::I64 => "INTEGER",
        Type::String | Type::Timestamp => "TEXT",
    }
}
