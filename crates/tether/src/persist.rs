//! Insert, update and delete of single models and model batches.
//!
//! These helpers are what the relation accessors use to write rows. They
//! maintain the `created_at` / `updated_at` auto timestamps and write
//! database assigned keys back into the models.

use crate::{
    executor::{exec_count, exec_rows},
    model::field_values,
    Executor, Model, Transaction,
};

use tether_core::{
    schema::app::{self, Auto, FieldId},
    stmt::{self, Expr, Value, ValueRecord},
    Error, Result,
};

/// Inserts `model`, writing database assigned key values back into it.
pub async fn create<M: Model>(db: &mut impl Executor, model: &mut M) -> Result<()> {
    create_many(db, std::slice::from_mut(model)).await
}

/// Inserts every model, writing database assigned key values back into each
/// of them. Either every row is inserted or none is.
pub async fn create_many<M: Model>(db: &mut impl Executor, models: &mut [M]) -> Result<()> {
    if models.is_empty() {
        return Ok(());
    }

    let schema = db.schema().clone();
    let model = schema.app.model(M::id())?;
    let now = jiff::Timestamp::now();

    for instance in models.iter_mut() {
        for field in &model.fields {
            if matches!(field.auto, Some(Auto::CreatedAt | Auto::UpdatedAt)) {
                instance.set_field(field.id.index, Value::Timestamp(now))?;
            }
        }
    }

    // A single row is one insert statement. Several rows may take several
    // statements, which must succeed or fail together.
    if models.len() == 1 {
        insert_groups(db, model, models).await?;
    } else {
        let mut tx = Transaction::begin(db).await?;
        let result = insert_groups(&mut tx, model, models).await;
        tx.finish(result).await?;
    }

    tracing::debug!(model = %model.name, rows = models.len(), "created");
    Ok(())
}

async fn insert_groups<M: Model>(
    db: &mut impl Executor,
    model: &app::Model,
    models: &mut [M],
) -> Result<()> {
    // Rows that leave a different set of columns to the database cannot share
    // an insert statement.
    let mut start = 0;

    while start < models.len() {
        let fields = insert_fields(model, &models[start]);
        let mut end = start + 1;

        while end < models.len() && insert_fields(model, &models[end]) == fields {
            end += 1;
        }

        insert(db, model, &fields, &mut models[start..end]).await?;
        start = end;
    }

    Ok(())
}

/// Fields written by an insert: everything except auto increment keys that
/// still hold their zero value.
fn insert_fields<M: Model>(model: &app::Model, instance: &M) -> Vec<FieldId> {
    model
        .fields
        .iter()
        .filter(|field| !(field.is_auto_increment() && instance.get_field(field.id.index).is_zero()))
        .map(|field| field.id)
        .collect()
}

async fn insert<M: Model>(
    db: &mut impl Executor,
    model: &app::Model,
    fields: &[FieldId],
    models: &mut [M],
) -> Result<()> {
    let pk: Vec<_> = model.primary_key_fields().collect();

    let insert = stmt::Insert {
        table: model.table_name.clone(),
        columns: column_names(model, fields),
        rows: models
            .iter()
            .map(|instance| field_values(instance, fields))
            .collect(),
        returning: pk.iter().map(|field| field.name.clone()).collect(),
    };

    let ret = pk.iter().map(|field| field.ty).collect();
    let rows = exec_rows(db, insert.into(), ret).await?;

    if rows.len() != models.len() {
        return Err(Error::invalid_result(format!(
            "insert into `{}` returned {} rows for {} models",
            model.table_name,
            rows.len(),
            models.len()
        )));
    }

    for (instance, row) in models.iter_mut().zip(rows) {
        for (field, value) in pk.iter().zip(row) {
            instance.set_field(field.id.index, value)?;
        }
    }

    Ok(())
}

/// Starts an update of `model`, matched by its primary key.
///
/// By default every non-key column is written. The update always stamps the
/// model's `updated_at` field, if it has one, even when the written columns
/// are narrowed with [`Update::only`] or [`Update::exclude`].
pub fn update<M: Model>(model: &mut M) -> Update<'_, M> {
    Update {
        model,
        only: None,
        exclude: vec![],
        filter: None,
    }
}

/// Updates every model by primary key inside one transaction and returns the
/// total number of affected rows.
pub async fn update_many<M: Model>(db: &mut impl Executor, models: &mut [M]) -> Result<u64> {
    let mut tx = Transaction::begin(db).await?;

    let result: Result<u64> = async {
        let mut count = 0;

        for model in models.iter_mut() {
            count += update(model).exec(&mut tx).await?;
        }

        Ok(count)
    }
    .await;

    tx.finish(result).await
}

/// Starts a delete of `model`, matched by its primary key.
pub fn delete<M: Model>(model: &M) -> Delete<'_, M> {
    Delete {
        model,
        filter: None,
    }
}

#[derive(Debug)]
pub struct Update<'a, M> {
    model: &'a mut M,

    /// When set, only these fields are written
    only: Option<Vec<String>>,

    /// Fields never written
    exclude: Vec<String>,

    filter: Option<Expr>,
}

impl<M: Model> Update<'_, M> {
    /// Writes only the named fields (plus `updated_at`).
    pub fn only<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.only = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Never writes the named fields.
    pub fn exclude<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.exclude.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Narrows the matched row further. Filters are combined with `AND`.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => Expr::and(existing, expr),
            None => expr,
        });
        self
    }

    /// Runs the update and returns the number of affected rows.
    ///
    /// The in-memory `updated_at` value only changes when a row was updated.
    pub async fn exec(self, db: &mut impl Executor) -> Result<u64> {
        let schema = db.schema().clone();
        let model = schema.app.model(M::id())?;

        for name in self.only.iter().flatten().chain(&self.exclude) {
            if model.field_by_name(name).is_none() {
                return Err(Error::invalid_schema(format!(
                    "unknown field `{name}` on model `{}`",
                    model.name
                )));
            }
        }

        let updated_at = model.updated_at().filter(|field| !field.primary_key);
        let now = Value::Timestamp(jiff::Timestamp::now());

        let mut assignments = vec![];

        for field in &model.fields {
            if field.primary_key {
                continue;
            }

            let value = if Some(field.id) == updated_at.map(|field| field.id) {
                now.clone()
            } else if self.writes(&field.name) {
                self.model.get_field(field.id.index)
            } else {
                continue;
            };

            assignments.push(stmt::Assignment {
                column: field.name.clone(),
                value,
            });
        }

        let mut filter = primary_key_filter(model, &*self.model);

        if let Some(expr) = self.filter {
            filter = Expr::and(filter, expr);
        }

        // Nothing to write: report how many rows the update would match.
        if assignments.is_empty() {
            let count = count_where(db, model, filter).await?;
            tracing::debug!(model = %model.name, rows = count, "update wrote no columns");
            return Ok(count);
        }

        let columns: Vec<_> = assignments.iter().map(|a| a.column.clone()).collect();

        let update = stmt::Update {
            table: model.table_name.clone(),
            assignments,
            filter,
        };

        let count = exec_count(db, update.into()).await?;

        tracing::debug!(model = %model.name, ?columns, rows = count, "updated");

        if count > 0 {
            if let Some(field) = updated_at {
                self.model.set_field(field.id.index, now)?;
            }
        }

        Ok(count)
    }

    fn writes(&self, name: &str) -> bool {
        let included = match &self.only {
            Some(only) => only.iter().any(|field| field == name),
            None => true,
        };

        included && !self.exclude.iter().any(|field| field == name)
    }
}

#[derive(Debug)]
pub struct Delete<'a, M> {
    model: &'a M,
    filter: Option<Expr>,
}

impl<M: Model> Delete<'_, M> {
    /// Narrows the matched row further. Filters are combined with `AND`.
    pub fn filter(mut self, expr: Expr) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => Expr::and(existing, expr),
            None => expr,
        });
        self
    }

    /// Runs the delete and returns the number of affected rows.
    pub async fn exec(self, db: &mut impl Executor) -> Result<u64> {
        let schema = db.schema().clone();
        let model = schema.app.model(M::id())?;

        let mut filter = primary_key_filter(model, self.model);

        if let Some(expr) = self.filter {
            filter = Expr::and(filter, expr);
        }

        delete_where(db, model, filter).await
    }
}

/// Deletes every row of `model` matching `filter`.
pub(crate) async fn delete_where(
    db: &mut impl Executor,
    model: &app::Model,
    filter: Expr,
) -> Result<u64> {
    let delete = stmt::Delete {
        table: model.table_name.clone(),
        filter,
    };

    let count = exec_count(db, delete.into()).await?;

    tracing::debug!(model = %model.name, rows = count, "deleted");
    Ok(count)
}

/// Number of rows of `model` matching `filter`.
async fn count_where(db: &mut impl Executor, model: &app::Model, filter: Expr) -> Result<u64> {
    let pk: Vec<_> = model.primary_key_fields().collect();

    let mut select = stmt::Select::new(
        model.table_name.clone(),
        pk.iter().map(|field| field.name.clone()).collect(),
    );
    select.and(filter);

    let ret = pk.iter().map(|field| field.ty).collect();
    let rows = exec_rows(db, select.into(), ret).await?;

    Ok(rows.len() as u64)
}

/// A select of every column of `model`, in field order.
pub(crate) fn select(model: &app::Model) -> stmt::Select {
    stmt::Select::new(
        model.table_name.clone(),
        model.fields.iter().map(|field| field.name.clone()).collect(),
    )
}

/// Runs a select built by [`select`] and loads the rows.
pub(crate) async fn load_all<M: Model>(
    db: &mut impl Executor,
    model: &app::Model,
    select: stmt::Select,
) -> Result<Vec<M>> {
    let ret = model.fields.iter().map(|field| field.ty).collect();
    let rows = exec_rows(db, select.into(), ret).await?;

    rows.into_iter().map(M::load).collect()
}

/// `pk = values` for one model instance.
pub(crate) fn primary_key_filter<M: Model>(model: &app::Model, instance: &M) -> Expr {
    let fields = &model.primary_key.fields;
    Expr::key_eq(&column_names(model, fields), &field_values(instance, fields))
}

/// Primary key values of an instance.
pub(crate) fn primary_key<M: Model>(model: &app::Model, instance: &M) -> ValueRecord {
    field_values(instance, &model.primary_key.fields)
}

pub(crate) fn column_names(model: &app::Model, fields: &[FieldId]) -> Vec<String> {
    fields
        .iter()
        .map(|field| model.field(*field).name.clone())
        .collect()
}
