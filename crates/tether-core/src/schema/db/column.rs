use crate::stmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,

    pub ty: stmt::Type,

    pub nullable: bool,

    pub primary_key: bool,

    /// Value assigned by the database when the insert omits the column
    pub auto_increment: bool,
}
