use super::{Expr, OrderBy, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    /// Table to read from
    pub table: String,

    /// Columns to return, in order
    pub columns: Vec<String>,

    pub filter: Option<Expr>,

    pub order_by: Vec<OrderBy>,

    pub limit: Option<u64>,

    pub offset: Option<u64>,
}

impl Select {
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Select {
        Select {
            table: table.into(),
            columns,
            filter: None,
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Adds a filter, combined with any existing filter by `AND`.
    pub fn and(&mut self, expr: Expr) {
        self.filter = Some(match self.filter.take() {
            Some(existing) => Expr::and(existing, expr),
            None => expr,
        });
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}
