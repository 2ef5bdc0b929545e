use super::{Delete, Insert, Select, Update};

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    Update(Update),
}

impl Statement {
    /// Table the statement operates on.
    pub fn table(&self) -> &str {
        match self {
            Statement::Delete(stmt) => &stmt.table,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Select(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
        }
    }

    /// True if executing the statement produces rows rather than a count.
    pub fn returns_rows(&self) -> bool {
        match self {
            Statement::Select(_) => true,
            Statement::Insert(stmt) => !stmt.returning.is_empty(),
            Statement::Update(_) | Statement::Delete(_) => false,
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Statement::Select(_))
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Statement::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Statement::Update(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Statement::Delete(_))
    }

    pub fn as_select(&self) -> Option<&Select> {
        match self {
            Statement::Select(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn as_insert(&self) -> Option<&Insert> {
        match self {
            Statement::Insert(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn as_update(&self) -> Option<&Update> {
        match self {
            Statement::Update(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn as_delete(&self) -> Option<&Delete> {
        match self {
            Statement::Delete(stmt) => Some(stmt),
            _ => None,
        }
    }
}
