use super::Descriptor;
use crate::{
    executor::{exec_count, exec_rows},
    persist, Executor, Model, Query, Transaction,
};

use tether_core::{
    schema::app::RelationKind,
    stmt::{self, Expr, Value, ValueRecord},
    Error, Result, Schema,
};

use std::{marker::PhantomData, sync::Arc};

/// Related rows are linked to the base model through a join table.
///
/// `create` and `delete` write the join rows and the related rows in one
/// transaction. `update` and `delete` first check that every given related
/// row is linked to the base value and fail with a record not found error,
/// changing nothing, when one is not.
pub struct HasManyThrough<'a, M, T> {
    base: &'a M,
    name: &'a str,
    _related: PhantomData<fn() -> T>,
}

impl<'a, M: Model, T: Model> HasManyThrough<'a, M, T> {
    pub fn new(base: &'a M, name: &'a str) -> Self {
        HasManyThrough {
            base,
            name,
            _related: PhantomData,
        }
    }

    fn descriptor(&self, schema: &Arc<Schema>) -> Result<Descriptor> {
        Descriptor::resolve::<M, T>(schema, self.name, &[RelationKind::ManyToMany])
    }

    /// All linked rows, narrowed by `query`. No links is an empty result.
    pub async fn all(&self, db: &mut impl Executor, query: Query) -> Result<Vec<T>> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "HasManyThrough::all");

        all(db, &descriptor, self.base, query).await
    }

    /// The first linked row matching `query`.
    pub async fn first(&self, db: &mut impl Executor, query: Query) -> Result<T> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "HasManyThrough::first");

        all(db, &descriptor, self.base, query.first())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| not_found(&descriptor, "no linked rows"))
    }

    /// Inserts `related` and links every row to the base value.
    pub async fn create(&self, db: &mut impl Executor, related: &mut [T]) -> Result<()> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), rows = related.len(), "HasManyThrough::create");

        create(db, &descriptor, self.base, related).await
    }

    /// Writes every row of `related` by primary key. Each row must be linked
    /// to the base value.
    pub async fn update(&self, db: &mut impl Executor, related: &mut [T]) -> Result<()> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), rows = related.len(), "HasManyThrough::update");

        if related.is_empty() {
            return Ok(());
        }

        let mut tx = Transaction::begin(db).await?;

        let result: Result<()> = async {
            verify_linked(&mut tx, &descriptor, self.base, related).await?;

            let count = persist::update_many(&mut tx, related).await?;

            if count != related.len() as u64 {
                return Err(not_found(
                    &descriptor,
                    &format!("linked rows missing; expected={}; updated={count}", related.len()),
                ));
            }

            Ok(())
        }
        .await;

        tx.finish(result).await
    }

    /// Unlinks and deletes every row of `related`. Each row must be linked to
    /// the base value.
    pub async fn delete(&self, db: &mut impl Executor, related: &[T]) -> Result<()> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), rows = related.len(), "HasManyThrough::delete");

        if related.is_empty() {
            return Ok(());
        }

        let mut tx = Transaction::begin(db).await?;

        let result: Result<()> = async {
            let keys = verify_linked(&mut tx, &descriptor, self.base, related).await?;
            let join = descriptor.join_table()?;

            let unlink = stmt::Delete {
                table: join.name.clone(),
                filter: Expr::and(
                    Expr::key_eq(&join.base_columns(), &descriptor.base_values(self.base)),
                    Expr::in_list(&join.related_columns(), keys),
                ),
            };
            exec_count(&mut tx, unlink.into()).await?;

            let model = descriptor.related();
            let pk = persist::column_names(model, &model.primary_key.fields);
            let pks = related
                .iter()
                .map(|row| persist::primary_key(model, row))
                .collect();

            persist::delete_where(&mut tx, model, Expr::in_list(&pk, pks)).await?;
            Ok(())
        }
        .await;

        tx.finish(result).await
    }
}

/// Reads the related side keys linked to `base`, then the related rows
/// holding those keys.
pub(super) async fn all<M: Model, T: Model>(
    db: &mut impl Executor,
    descriptor: &Descriptor,
    base: &M,
    query: Query,
) -> Result<Vec<T>> {
    let join = descriptor.join_table()?;
    let base_values = descriptor.base_values(base);

    if base_values.iter().any(Value::is_null) {
        return Ok(vec![]);
    }

    let mut links = stmt::Select::new(
        join.name.clone(),
        join.related_columns().into_iter().map(String::from).collect(),
    );
    links.and(Expr::key_eq(&join.base_columns(), &base_values));

    let keys = exec_rows(db, links.into(), related_key_types(descriptor)).await?;

    if keys.is_empty() {
        return Ok(vec![]);
    }

    let related = descriptor.related();
    let mut select = persist::select(related);
    select.and(Expr::in_list(&descriptor.related_field_names(), keys));
    query.apply(&mut select);

    persist::load_all::<T>(db, related, select).await
}

/// Inserts `related`, then one join row per related row, in one transaction.
pub(super) async fn create<M: Model, T: Model>(
    db: &mut impl Executor,
    descriptor: &Descriptor,
    base: &M,
    related: &mut [T],
) -> Result<()> {
    if related.is_empty() {
        return Ok(());
    }

    let join = descriptor.join_table()?;
    let base_values = descriptor.base_values(base);

    if base_values.iter().any(Value::is_null) {
        return Err(not_found(descriptor, "base key is null"));
    }

    let mut tx = Transaction::begin(db).await?;

    let result: Result<()> = async {
        persist::create_many(&mut tx, related).await?;

        let rows = related
            .iter()
            .map(|row| {
                join.row(base_values.clone(), descriptor.related_values(row))
                    .into_record()
            })
            .collect();

        let link = stmt::Insert {
            table: join.name.clone(),
            columns: join.columns().into_iter().map(String::from).collect(),
            rows,
            returning: vec![],
        };

        exec_count(&mut tx, link.into()).await?;
        Ok(())
    }
    .await;

    tx.finish(result).await
}

/// Checks that a join row links `base` to every row of `related`, returning
/// the distinct related side keys.
async fn verify_linked<M: Model, T: Model>(
    db: &mut impl Executor,
    descriptor: &Descriptor,
    base: &M,
    related: &[T],
) -> Result<Vec<ValueRecord>> {
    let join = descriptor.join_table()?;
    let base_values = descriptor.base_values(base);

    let mut keys: Vec<ValueRecord> = vec![];

    for row in related {
        let key = descriptor.related_values(row);
        if !keys.contains(&key) {
            keys.push(key);
        }
    }

    let mut links = stmt::Select::new(
        join.name.clone(),
        join.related_columns().into_iter().map(String::from).collect(),
    );
    links.and(Expr::key_eq(&join.base_columns(), &base_values));
    links.and(Expr::in_list(&join.related_columns(), keys.clone()));

    let linked = exec_rows(db, links.into(), related_key_types(descriptor)).await?;

    let missing: Vec<_> = keys.iter().filter(|key| !linked.contains(key)).collect();

    if !missing.is_empty() {
        return Err(not_found(
            descriptor,
            &format!("rows not linked; keys={missing:?}"),
        ));
    }

    Ok(keys)
}

fn related_key_types(descriptor: &Descriptor) -> Vec<stmt::Type> {
    let related = descriptor.related();

    descriptor
        .related_fields()
        .into_iter()
        .map(|field| related.field(field).ty)
        .collect()
}

fn not_found(descriptor: &Descriptor, detail: &str) -> Error {
    let table = descriptor
        .join_table()
        .map(|join| join.name.as_str())
        .unwrap_or_default();

    Error::record_not_found(format!(
        "table={table}; relation={}; {detail}",
        descriptor.label()
    ))
}
