use super::ModelId;
use crate::stmt;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Field {
    /// Uniquely identifies the field within the containing model.
    pub id: FieldId,

    /// The field name, also used as the column name.
    pub name: String,

    /// Storage type
    pub ty: stmt::Type,

    /// True if the field can be nullable (`None` in Rust).
    pub nullable: bool,

    /// True if the field is part of the primary key
    pub primary_key: bool,

    /// Specified if and how the field is populated automatically
    pub auto: Option<Auto>,
}

/// Automatic population strategy for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auto {
    /// Assigned by the database on insert
    Increment,

    /// Stamped with the current time on insert
    CreatedAt,

    /// Stamped with the current time on insert and on every update
    UpdatedAt,
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId {
    pub model: ModelId,
    pub index: usize,
}

impl Field {
    pub fn is_auto_increment(&self) -> bool {
        self.auto == Some(Auto::Increment)
    }
}

impl fmt::Debug for FieldId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "FieldId({}/{})", self.model.0, self.index)
    }
}
