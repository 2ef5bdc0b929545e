use super::{Model, ModelId, Relation};
use crate::{Error, Result};

use indexmap::IndexMap;

#[derive(Debug, Default)]
pub struct Schema {
    pub models: IndexMap<ModelId, Model>,
}

impl Schema {
    pub fn model(&self, id: ModelId) -> Result<&Model> {
        self.models
            .get(&id)
            .ok_or_else(|| Error::invalid_schema(format!("model {id:?} is not registered")))
    }

    /// Looks up the relation `name` declared on `model`.
    ///
    /// The result only depends on the registered models, so repeated lookups
    /// for the same pair always agree.
    pub fn relation(&self, model: ModelId, name: &str) -> Result<&Relation> {
        self.model(model)?.relation(name)
    }

    pub fn models(&self) -> impl ExactSizeIterator<Item = &Model> {
        self.models.values()
    }
}
