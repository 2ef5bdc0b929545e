use super::{Column, Table};
use crate::schema::app;
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct Schema {
    pub tables: Vec<Table>,
}

impl Schema {
    /// Derives one table per model plus one per distinct join table.
    ///
    /// Both sides of a many-to-many relation may declare the same join
    /// table; the declarations must then agree on its columns.
    pub fn from_app(app: &app::Schema) -> Result<Schema> {
        let mut schema = Schema::default();

        for model in app.models() {
            let columns = model
                .fields
                .iter()
                .map(|field| Column {
                    name: field.name.clone(),
                    ty: field.ty,
                    nullable: field.nullable,
                    primary_key: field.primary_key,
                    auto_increment: field.is_auto_increment(),
                })
                .collect();

            schema.push(Table {
                name: model.table_name.clone(),
                columns,
            })?;
        }

        for model in app.models() {
            for relation in model.relations.values() {
                let Some(through) = &relation.through else {
                    continue;
                };

                let mut columns = vec![];

                for join_column in through.base.iter().chain(&through.related) {
                    let field = app.model(join_column.field.model)?.field(join_column.field);

                    columns.push(Column {
                        name: join_column.column.clone(),
                        ty: field.ty,
                        nullable: false,
                        primary_key: true,
                        auto_increment: false,
                    });
                }

                let table = Table {
                    name: through.name.clone(),
                    columns,
                };

                if let Some(existing) = schema.table(&table.name) {
                    if !same_columns(existing, &table) {
                        return Err(Error::invalid_schema(format!(
                            "join table `{}` is declared with conflicting columns",
                            table.name
                        )));
                    }
                    continue;
                }

                schema.push(table)?;
            }
        }

        Ok(schema)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|table| table.name == name)
    }

    fn push(&mut self, table: Table) -> Result<()> {
        if self.table(&table.name).is_some() {
            return Err(Error::invalid_schema(format!(
                "duplicate table name `{}`",
                table.name
            )));
        }

        self.tables.push(table);
        Ok(())
    }
}

/// Column sets match regardless of the order the two sides listed them in.
fn same_columns(a: &Table, b: &Table) -> bool {
    a.columns.len() == b.columns.len()
        && a.columns.iter().all(|column| b.column(&column.name) == Some(column))
}
