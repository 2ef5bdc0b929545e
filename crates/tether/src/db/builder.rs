use super::{Connect, Db};
use crate::{schema, Model};

use indexmap::IndexMap;
use tether_core::{
    driver::Driver,
    schema::app::{
        self, Auto, FieldId, JoinColumn, JoinTable, KeyPair, ModelId, PrimaryKey, RelationKind,
    },
    stmt::Type,
    Error, Result, Schema,
};

use std::sync::Arc;

/// Collects model registrations and configuration, then builds a [`Db`].
#[derive(Debug, Default)]
pub struct Builder {
    /// Model definitions from the derive (unresolved)
    models: IndexMap<ModelId, schema::Model>,

    table_name_prefix: Option<String>,
}

impl Builder {
    pub fn register<M: Model>(&mut self) -> &mut Self {
        self.models.insert(M::id(), M::schema());
        self
    }

    /// Set the table name prefix for all tables, join tables included
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    /// Connects using the driver selected by the URL scheme.
    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let schema = Arc::new(self.build_schema()?);

        let mut connection = driver.connect().await?;
        connection.push_schema(&schema).await?;

        tracing::debug!(
            models = schema.app.models.len(),
            tables = schema.db.tables.len(),
            "database ready"
        );

        Ok(Db::new(schema, connection))
    }

    /// Resolves and validates the registered models without connecting.
    pub fn build_schema(&self) -> Result<Schema> {
        let mut app = app::Schema::default();

        for decl in self.models.values() {
            let model = self.build_model(decl)?;
            app.models.insert(model.id, model);
        }

        // Relations need every model's fields, so they resolve in a second pass
        let mut relations = vec![];

        for decl in self.models.values() {
            for relation in &decl.relations {
                let resolved = self.build_relation(&app, decl, relation).map_err(|err| {
                    err.context(format!(
                        "relation `{}` on model `{}`",
                        relation.name, decl.name
                    ))
                })?;

                relations.push(resolved);
            }
        }

        for relation in relations {
            let Some(model) = app.models.get_mut(&relation.source) else {
                continue;
            };

            if model.relations.contains_key(&relation.name) {
                return Err(Error::invalid_schema(format!(
                    "relation `{}` declared twice on model `{}`",
                    relation.name, model.name
                )));
            }

            model.relations.insert(relation.name.clone(), relation);
        }

        Schema::from_app(app)
    }

    fn build_model(&self, decl: &schema::Model) -> Result<app::Model> {
        let fields: Vec<_> = decl
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| app::Field {
                id: FieldId {
                    model: decl.id,
                    index,
                },
                name: field.name.to_string(),
                ty: field.ty,
                nullable: field.nullable,
                primary_key: field.primary_key,
                auto: field.auto,
            })
            .collect();

        let primary_key = PrimaryKey {
            fields: fields
                .iter()
                .filter(|field| field.primary_key)
                .map(|field| field.id)
                .collect(),
        };

        if primary_key.fields.is_empty() {
            return Err(Error::invalid_schema(format!(
                "model `{}` has no primary key",
                decl.name
            )));
        }

        for field in &fields {
            match field.auto {
                Some(Auto::Increment) => {
                    if !field.primary_key || primary_key.fields.len() != 1 || !field.ty.is_integer()
                    {
                        return Err(Error::invalid_schema(format!(
                            "auto increment field `{}::{}` must be the only primary key field and an integer",
                            decl.name, field.name
                        )));
                    }
                }
                Some(Auto::CreatedAt | Auto::UpdatedAt) => {
                    if field.ty != Type::Timestamp {
                        return Err(Error::invalid_schema(format!(
                            "auto timestamp field `{}::{}` must be a timestamp; found {}",
                            decl.name,
                            field.name,
                            field.ty.name()
                        )));
                    }
                }
                None => {}
            }
        }

        Ok(app::Model {
            id: decl.id,
            name: decl.name.to_string(),
            table_name: self.table_name(decl.table_name),
            fields,
            primary_key,
            relations: IndexMap::new(),
        })
    }

    fn build_relation(
        &self,
        app: &app::Schema,
        source: &schema::Model,
        decl: &schema::Relation,
    ) -> Result<app::Relation> {
        let base = app.model(source.id)?;
        let Some(target) = app.models.get(&decl.target) else {
            return Err(Error::invalid_schema(format!(
                "target model `{}` is not registered",
                decl.target_name
            )));
        };

        if decl.key.is_empty() || decl.references.is_empty() {
            return Err(Error::invalid_schema(
                "expected at least one `key` and one `references` field",
            ));
        }

        let base_fields = resolve_fields(base, &decl.key)?;
        let related_fields = resolve_fields(target, &decl.references)?;

        match (decl.kind, &decl.through) {
            (RelationKind::ManyToMany, Some(through)) => {
                if through.join_key.len() != base_fields.len()
                    || through.join_references.len() != related_fields.len()
                {
                    return Err(Error::invalid_schema(format!(
                        "join columns do not pair up with key fields; key={}, join_key={}, join_references={}, references={}",
                        base_fields.len(),
                        through.join_key.len(),
                        through.join_references.len(),
                        related_fields.len()
                    )));
                }

                let join_table = JoinTable {
                    name: self.table_name(through.table),
                    base: join_columns(&through.join_key, &base_fields),
                    related: join_columns(&through.join_references, &related_fields),
                };

                Ok(app::Relation {
                    name: decl.name.to_string(),
                    kind: decl.kind,
                    source: base.id,
                    target: target.id,
                    pairs: vec![],
                    through: Some(join_table),
                })
            }
            (RelationKind::ManyToMany, None) => Err(Error::invalid_schema(
                "`many_to_many` relations require a join table",
            )),
            (kind, Some(_)) => Err(Error::invalid_schema(format!(
                "only `many_to_many` relations use a join table; found `{}`",
                kind.as_str()
            ))),
            (kind, None) => {
                if base_fields.len() != related_fields.len() {
                    return Err(Error::invalid_schema(format!(
                        "number of `key` and `references` fields must match; key={}, references={}",
                        base_fields.len(),
                        related_fields.len()
                    )));
                }

                let pairs = base_fields
                    .iter()
                    .zip(&related_fields)
                    .map(|(base_field, related_field)| {
                        let base_field = base.field(*base_field);
                        let related_field = target.field(*related_field);

                        if base_field.ty != related_field.ty {
                            return Err(Error::invalid_schema(format!(
                                "key type mismatch; `{}::{}` is {} but `{}::{}` is {}",
                                base.name,
                                base_field.name,
                                base_field.ty.name(),
                                target.name,
                                related_field.name,
                                related_field.ty.name()
                            )));
                        }

                        Ok(KeyPair {
                            base: base_field.id,
                            related: related_field.id,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;

                Ok(app::Relation {
                    name: decl.name.to_string(),
                    kind,
                    source: base.id,
                    target: target.id,
                    pairs,
                    through: None,
                })
            }
        }
    }

    fn table_name(&self, name: &str) -> String {
        if let Some(prefix) = &self.table_name_prefix {
            format!("{prefix}{name}")
        } else {
            name.to_string()
        }
    }
}

fn resolve_fields(model: &app::Model, names: &[&str]) -> Result<Vec<FieldId>> {
    names
        .iter()
        .map(|name| {
            model
                .field_by_name(name)
                .map(|field| field.id)
                .ok_or_else(|| {
                    Error::invalid_schema(format!(
                        "unknown field `{name}` on model `{}`",
                        model.name
                    ))
                })
        })
        .collect()
}

fn join_columns(columns: &[&str], fields: &[FieldId]) -> Vec<JoinColumn> {
    columns
        .iter()
        .zip(fields)
        .map(|(column, field)| JoinColumn {
            column: column.to_string(),
            field: *field,
        })
        .collect()
}
