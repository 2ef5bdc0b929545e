use super::Operation;

use crate::stmt;

#[derive(Debug, Clone)]
pub struct QuerySql {
    /// The statement to execute
    pub stmt: stmt::Statement,

    /// Types of the returned columns, when the statement returns rows
    pub ret: Option<Vec<stmt::Type>>,
}

impl From<QuerySql> for Operation {
    fn from(value: QuerySql) -> Self {
        Self::QuerySql(value)
    }
}
