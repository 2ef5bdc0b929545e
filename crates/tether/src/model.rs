use crate::schema;

use tether_core::{
    schema::app::{FieldId, ModelId},
    stmt::{Value, ValueRecord},
    Result,
};

/// Generate a unique model ID at runtime.
///
/// IDs come from a global atomic counter, so every call returns a fresh
/// `ModelId`, including calls made concurrently.
pub fn generate_unique_id() -> ModelId {
    use std::sync::atomic::{AtomicUsize, Ordering};

    static NEXT_MODEL_ID: AtomicUsize = AtomicUsize::new(0);

    let id = NEXT_MODEL_ID.fetch_add(1, Ordering::Relaxed);
    ModelId(id)
}

/// A record type persisted by tether.
///
/// Usually implemented with `#[derive(tether::Model)]`. Fields are addressed
/// by their declaration index; the schema built from [`Model::schema`] maps
/// relation keys to those indices once, when the database is built.
pub trait Model: Default + Send + Sync + 'static {
    /// Identifies the model within the process.
    fn id() -> ModelId;

    /// Static description of the model's fields and relations.
    fn schema() -> schema::Model;

    /// Load an instance of the model, populating fields using the given row.
    fn load(record: ValueRecord) -> Result<Self>;

    /// Returns the value of the field at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a field index of the model.
    fn get_field(&self, index: usize) -> Value;

    /// Replaces the value of the field at `index`.
    fn set_field(&mut self, index: usize, value: Value) -> Result<()>;
}

/// Values of the given fields, in order.
pub(crate) fn field_values<M: Model>(model: &M, fields: &[FieldId]) -> ValueRecord {
    fields
        .iter()
        .map(|field| {
            debug_assert_eq!(field.model, M::id());
            model.get_field(field.index)
        })
        .collect()
}
