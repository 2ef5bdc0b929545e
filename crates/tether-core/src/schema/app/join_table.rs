use super::FieldId;
use crate::stmt::{Value, ValueRecord};

/// Join table backing a many-to-many relation.
///
/// Built once when the relation is resolved. Its columns are exactly the
/// base side key columns followed by the related side key columns.
#[derive(Debug, Clone)]
pub struct JoinTable {
    /// Table name
    pub name: String,

    /// Join columns referencing the declaring model
    pub base: Vec<JoinColumn>,

    /// Join columns referencing the related model
    pub related: Vec<JoinColumn>,
}

#[derive(Debug, Clone)]
pub struct JoinColumn {
    /// Column on the join table
    pub column: String,

    /// Field the column mirrors, on the declaring model for `base` columns
    /// and on the related model for `related` columns
    pub field: FieldId,
}

/// One row of a join table: the base side key values and the related side
/// key values.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinRow {
    pub base: ValueRecord,
    pub related: ValueRecord,
}

impl JoinTable {
    pub fn base_columns(&self) -> Vec<&str> {
        self.base.iter().map(|c| c.column.as_str()).collect()
    }

    pub fn related_columns(&self) -> Vec<&str> {
        self.related.iter().map(|c| c.column.as_str()).collect()
    }

    /// All columns in row order.
    pub fn columns(&self) -> Vec<&str> {
        let mut columns = self.base_columns();
        columns.extend(self.related_columns());
        columns
    }

    /// Builds the row linking `base` key values to `related` key values.
    pub fn row(&self, base: ValueRecord, related: ValueRecord) -> JoinRow {
        debug_assert_eq!(base.len(), self.base.len());
        debug_assert_eq!(related.len(), self.related.len());
        JoinRow { base, related }
    }
}

impl JoinRow {
    /// Flattens the row into column order.
    pub fn into_record(self) -> ValueRecord {
        let mut fields: Vec<Value> = self.base.fields;
        fields.extend(self.related.fields);
        ValueRecord::from_vec(fields)
    }
}
