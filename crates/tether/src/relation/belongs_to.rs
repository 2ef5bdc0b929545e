use super::{sync, Descriptor};
use crate::{persist, Executor, Model, Transaction};

use tether_core::{schema::app::RelationKind, Error, Result, Schema};

use std::{marker::PhantomData, sync::Arc};

/// The base model holds the foreign key to the related model.
///
/// ```ignore
/// let author = story.author().get(&mut db).await?;
/// ```
pub struct BelongsTo<'a, M, T> {
    base: &'a mut M,
    name: &'a str,
    _related: PhantomData<fn() -> T>,
}

impl<'a, M: Model, T: Model> BelongsTo<'a, M, T> {
    pub fn new(base: &'a mut M, name: &'a str) -> Self {
        BelongsTo {
            base,
            name,
            _related: PhantomData,
        }
    }

    fn descriptor(&self, schema: &Arc<Schema>) -> Result<Descriptor> {
        Descriptor::resolve::<M, T>(schema, self.name, &[RelationKind::BelongsTo])
    }

    /// Fetches the related row the base value's foreign key points at.
    pub async fn get(&self, db: &mut impl Executor) -> Result<T> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "BelongsTo::get");

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

    /// Points the base value's foreign key at `related` and writes only the
    /// foreign key columns. On failure the in-memory foreign key keeps its
    /// previous value.
    pub async fn set(&mut self, db: &mut impl Executor, related: &T) -> Result<()> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "BelongsTo::set");

        let saved = descriptor.base_values(&*self.base);
        sync::project_to_base(&descriptor, &mut *self.base, related)?;

        let result = persist::update(&mut *self.base)
            .only(descriptor.base_field_names())
            .exec(db)
            .await;

        let err = match result {
            Ok(0) => Error::record_not_found(format!(
                "table={}; relation={}",
                descriptor.base().table_name,
                descriptor.label()
            )),
            Ok(_) => return Ok(()),
            Err(err) => err,
        };

        sync::restore(&mut *self.base, &descriptor.base_fields(), &saved);
        Err(err)
    }

    /// Inserts `related` and points the base value at it, in one transaction.
    pub async fn create(&mut self, db: &mut impl Executor, related: &mut T) -> Result<()> {
        let descriptor = self.descriptor(db.schema())?;
        let saved = descriptor.base_values(&*self.base);

        let mut tx = Transaction::begin(db).await?;

        let result: Result<()> = async {
            persist::create(&mut tx, related).await?;
            self.set(&mut tx, related).await
        }
        .await;

        let result = tx.finish(result).await;

        // The insert was rolled back, so the key it assigned is gone too
        if result.is_err() {
            sync::restore(&mut *self.base, &descriptor.base_fields(), &saved);
        }

        result
    }
}

fn not_found(descriptor: &Descriptor) -> Error {
    Error::record_not_found(format!(
        "table={}; relation={}",
        descriptor.related().table_name,
        descriptor.label()
    ))
}
