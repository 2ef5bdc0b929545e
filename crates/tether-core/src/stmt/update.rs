use super::{Expr, Statement, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,

    /// Columns written by the update. Columns not listed are left untouched.
    pub assignments: Vec<Assignment>,

    pub filter: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub value: Value,
}

impl Update {
    /// Returns the assignment for `column`, if the update writes it.
    pub fn assignment(&self, column: &str) -> Option<&Assignment> {
        self.assignments
            .iter()
            .find(|assignment| assignment.column == column)
    }

    /// Names of the written columns, in assignment order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.assignments
            .iter()
            .map(|assignment| assignment.column.as_str())
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
