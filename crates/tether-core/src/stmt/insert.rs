use super::{Statement, ValueRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,

    pub columns: Vec<String>,

    /// One record per inserted row, each holding one value per column
    pub rows: Vec<ValueRecord>,

    /// Columns to read back from every inserted row, in row order
    pub returning: Vec<String>,
}

impl Insert {
    /// Splits a multi-row insert into single-row inserts sharing the same
    /// columns and returning clause.
    pub fn split_rows(self) -> impl Iterator<Item = Insert> {
        let Insert {
            table,
            columns,
            rows,
            returning,
        } = self;

        rows.into_iter().map(move |row| Insert {
            table: table.clone(),
            columns: columns.clone(),
            rows: vec![row],
            returning: returning.clone(),
        })
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}
