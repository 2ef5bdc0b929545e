use super::{has_many_through, sync, Descriptor};
use crate::{persist, Executor, Model, Query};

use tether_core::{schema::app::RelationKind, Error, Result, Schema};

use std::{marker::PhantomData, sync::Arc};

/// A one-to-many relation. Also accepts relations declared with
/// `many_to_many`, in which case reads and inserts go through the join table.
pub struct HasMany<'a, M, T> {
    base: &'a M,
    name: &'a str,
    _related: PhantomData<fn() -> T>,
}

impl<'a, M: Model, T: Model> HasMany<'a, M, T> {
    pub fn new(base: &'a M, name: &'a str) -> Self {
        HasMany {
            base,
            name,
            _related: PhantomData,
        }
    }

    fn descriptor(&self, schema: &Arc<Schema>) -> Result<Descriptor> {
        Descriptor::resolve::<M, T>(
            schema,
            self.name,
            &[RelationKind::HasMany, RelationKind::ManyToMany],
        )
    }

    /// Every related row, narrowed by `query`. No rows is an empty result,
    /// not an error.
    pub async fn all(&self, db: &mut impl Executor, query: Query) -> Result<Vec<T>> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "HasMany::all");

        self.load(db, &descriptor, query).await
    }

    /// The first related row matching `query`.
    pub async fn first(&self, db: &mut impl Executor, query: Query) -> Result<T> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), "HasMany::first");

        self.load(db, &descriptor, query.first())
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                Error::record_not_found(format!(
                    "table={}; relation={}",
                    descriptor.related().table_name,
                    descriptor.label()
                ))
            })
    }

    /// Links every row of `related` to the base value and inserts them.
    pub async fn create(&self, db: &mut impl Executor, related: &mut [T]) -> Result<()> {
        let descriptor = self.descriptor(db.schema())?;
        tracing::debug!(relation = %descriptor.label(), rows = related.len(), "HasMany::create");

        if descriptor.relation().is_many_to_many() {
            return has_many_through::create(db, &descriptor, self.base, related).await;
        }

        for row in related.iter_mut() {
            sync::project_to_related(&descriptor, self.base, row)?;
        }

        persist::create_many(db, related).await
    }

    async fn load(
        &self,
        db: &mut impl Executor,
        descriptor: &Descriptor,
        query: Query,
    ) -> Result<Vec<T>> {
        if descriptor.relation().is_many_to_many() {
            return has_many_through::all(db, descriptor, self.base, query).await;
        }

        let Some(filter) = sync::related_filter::<M, T>(descriptor, self.base)? else {
            return Ok(vec![]);
        };

        let related = descriptor.related();
        let mut select = persist::select(related);
        select.and(filter);
        query.apply(&mut select);

        persist::load_all::<T>(db, related, select).await
    }
}
