use super::{Auto, Field, FieldId, PrimaryKey, Relation};
use crate::{Error, Result};

use indexmap::IndexMap;
use std::fmt;

#[derive(Debug, Clone)]
pub struct Model {
    /// Uniquely identifies the model within the schema
    pub id: ModelId,

    /// Name of the model
    pub name: String,

    /// Table storing the model's rows
    pub table_name: String,

    /// Fields contained by the model
    pub fields: Vec<Field>,

    pub primary_key: PrimaryKey,

    /// Relations declared on the model, keyed by name
    pub relations: IndexMap<String, Relation>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ModelId(pub usize);

impl Model {
    pub fn field(&self, field: FieldId) -> &Field {
        assert_eq!(self.id, field.model);
        &self.fields[field.index]
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn primary_key_fields(&self) -> impl ExactSizeIterator<Item = &Field> + '_ {
        self.primary_key
            .fields
            .iter()
            .map(|field_id| self.field(*field_id))
    }

    /// Field stamped on every update, if any.
    pub fn updated_at(&self) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.auto == Some(Auto::UpdatedAt))
    }

    /// Looks up a relation declared on this model.
    pub fn relation(&self, name: &str) -> Result<&Relation> {
        self.relations
            .get(name)
            .ok_or_else(|| Error::relation_not_declared(&self.name, name))
    }
}

impl fmt::Debug for ModelId {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "ModelId({})", self.0)
    }
}
