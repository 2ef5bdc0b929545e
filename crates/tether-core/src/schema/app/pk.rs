use super::FieldId;

#[derive(Debug, Clone)]
pub struct PrimaryKey {
    /// Fields composing the primary key, in declaration order
    pub fields: Vec<FieldId>,
}
