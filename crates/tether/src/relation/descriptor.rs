use crate::{model::field_values, Model};

use tether_core::{
    schema::app::{self, FieldId, JoinTable, Relation, RelationKind},
    stmt::ValueRecord,
    Error, Result, Schema,
};

use std::sync::Arc;

/// A relation declaration resolved for one accessor call.
#[derive(Debug, Clone)]
pub struct Descriptor {
    schema: Arc<Schema>,
    relation: Relation,
}

impl Descriptor {
    /// Looks up relation `name` on `M` and checks that it is one of `kinds`
    /// and targets `T`.
    pub fn resolve<M: Model, T: Model>(
        schema: &Arc<Schema>,
        name: &str,
        kinds: &[RelationKind],
    ) -> Result<Descriptor> {
        let base = schema.app.model(M::id())?;
        let relation = base.relation(name)?;

        if !kinds.contains(&relation.kind) {
            let expected: Vec<_> = kinds.iter().map(|kind| kind.as_str()).collect();

            return Err(Error::invalid_schema(format!(
                "relation `{name}` on model `{}` is declared as `{}`; expected {}",
                base.name,
                relation.kind.as_str(),
                expected.join(" or ")
            )));
        }

        if relation.target != T::id() {
            let target = schema.app.model(relation.target)?;

            return Err(Error::invalid_schema(format!(
                "relation `{name}` on model `{}` targets `{}`, not `{}`",
                base.name,
                target.name,
                std::any::type_name::<T>()
            )));
        }

        tracing::debug!(
            model = %base.name,
            relation = name,
            kind = relation.kind.as_str(),
            "resolved relation"
        );

        Ok(Descriptor {
            schema: schema.clone(),
            relation: relation.clone(),
        })
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    /// The declaring model.
    pub fn base(&self) -> &app::Model {
        &self.schema.app.models[&self.relation.source]
    }

    /// The model on the other side.
    pub fn related(&self) -> &app::Model {
        &self.schema.app.models[&self.relation.target]
    }

    pub fn base_fields(&self) -> Vec<FieldId> {
        self.relation.base_fields()
    }

    pub fn related_fields(&self) -> Vec<FieldId> {
        self.relation.related_fields()
    }

    pub fn base_field_names(&self) -> Vec<String> {
        names(self.base(), &self.base_fields())
    }

    /// Column names of the related side keys on the related table.
    pub fn related_field_names(&self) -> Vec<String> {
        names(self.related(), &self.related_fields())
    }

    pub fn base_values<M: Model>(&self, base: &M) -> ValueRecord {
        field_values(base, &self.base_fields())
    }

    pub fn related_values<T: Model>(&self, related: &T) -> ValueRecord {
        field_values(related, &self.related_fields())
    }

    pub fn join_table(&self) -> Result<&JoinTable> {
        self.relation.through.as_ref().ok_or_else(|| {
            Error::invalid_schema(format!(
                "relation `{}` on model `{}` has no join table",
                self.relation.name,
                self.base().name
            ))
        })
    }

    /// Describes the relation for error messages.
    pub(crate) fn label(&self) -> String {
        format!("{}.{}", self.base().name, self.relation.name)
    }
}

fn names(model: &app::Model, fields: &[FieldId]) -> Vec<String> {
    fields
        .iter()
        .map(|field| model.field(*field).name.clone())
        .collect()
}
