use super::{sync, Descriptor};
use crate::{persist, Executor, Model};

use tether_core::{
    schema::app::RelationKind,
    stmt::{Expr, Value},
    Error, Result, Schema,
};

use std::{marker::PhantomData, sync::Arc};

/// The related model holds a foreign key back to the base model, and at most
/// one related row points at each base row.
///
/// Mutations of an existing related row (`set`, `update`, `delete`) only
/// succeed when that row exists and, for `update` and `delete`, is already
/// linked to the base value. Otherwise they fail with a record not found
/// error and change nothing.
pub struct HasOne<'a, M, T> {
    base: &'a M,
    name: &'a str,
    _related: PhantomData<fn() -> T>,
}

impl<'a, M: Model, T: Model> HasOne<'a, M, T> {
    pub fn new(base: &'a M, name: &'a str) -> Self {
        HasOne {
            base,
            name,
            _related: PhantomData,
        }
    }

    fn descriptor(&self, schema: &Arc<Schema>) -> Result<Descriptor> {
        Descriptor::resolve::<M, T>(schema, self.name, &[RelationKind::HasOne])
    }

    pub async fn get(&self, db: &mut impl Executor) -> Result<T> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "HasOne::get");

        let Some(filter) = sync::related_filter::<M, T>(&descriptor, self.base)? else {
            return Err(not_found(&descriptor));
        };

        let related = descriptor.related();
        let mut select = persist::select(related);
        select.and(filter);
        select.limit = Some(1);

        persist::load_all::<T>(db, related, select)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| not_found(&descriptor))
    }

    /// Links `related` to the base value, writing only the foreign key
    /// columns of the related row. On failure the in-memory foreign key keeps
    /// its previous value.
    pub async fn set(&self, db: &mut impl Executor, related: &mut T) -> Result<()> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "HasOne::set");

        let saved = descriptor.related_values(&*related);
        sync::project_to_related(&descriptor, self.base, related)?;

        let result = persist::update(&mut *related)
            .only(descriptor.related_field_names())
            .exec(db)
            .await;

        let err = match result {
            Ok(0) => not_found(&descriptor),
            Ok(_) => return Ok(()),
            Err(err) => err,
        };

        sync::restore(related, &descriptor.related_fields(), &saved);
        Err(err)
    }

    /// Links `related` to the base value and inserts it.
    pub async fn create(&self, db: &mut impl Executor, related: &mut T) -> Result<()> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "HasOne::create");

        sync::project_to_related(&descriptor, self.base, related)?;
        persist::create(db, related).await
    }

    /// Writes `related`, leaving its foreign key columns untouched. The row
    /// must be linked to the base value.
    pub async fn update(&self, db: &mut impl Executor, related: &mut T) -> Result<()> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "HasOne::update");

        let filter = linked(&descriptor, self.base)?;

        let count = persist::update(related)
            .exclude(descriptor.related_field_names())
            .filter(filter)
            .exec(db)
            .await?;

        if count == 0 {
            return Err(not_found(&descriptor));
        }

        Ok(())
    }

    /// Deletes `related`. The row must be linked to the base value.
    pub async fn delete(&self, db: &mut impl Executor, related: &T) -> Result<()> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "HasOne::delete");

        let filter = linked(&descriptor, self.base)?;

        let count = persist::delete(related).filter(filter).exec(db).await?;

        if count == 0 {
            return Err(not_found(&descriptor));
        }

        Ok(())
    }
}

/// Filter matching related rows whose foreign key points at `base`.
fn linked<M: Model>(descriptor: &Descriptor, base: &M) -> Result<Expr> {
    let values = descriptor.base_values(base);

    if values.iter().any(Value::is_null) {
        return Err(not_found(descriptor));
    }

    Ok(Expr::key_eq(&descriptor.related_field_names(), &values))
}

fn not_found(descriptor: &Descriptor) -> Error {
    Error::record_not_found(format!(
        "table={}; relation={}",
        descriptor.related().table_name,
        descriptor.label()
    ))
}
