use super::ValueRecord;

/// `(c1, c2, ...) IN ((v1, v2, ...), ...)`
///
/// Every row holds one value per column. An empty row set matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    pub columns: Vec<String>,
    pub rows: Vec<ValueRecord>,
}
