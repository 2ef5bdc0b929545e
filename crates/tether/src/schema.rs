//! Model descriptions produced by `#[derive(Model)]`.
//!
//! These are unresolved: fields and relation keys are referenced by name.
//! [`db::Builder`](crate::db::Builder) validates them and resolves names to
//! field identifiers.

pub use tether_core::schema::app::{Auto, ModelId, RelationKind};
pub use tether_core::stmt::Type;

#[derive(Debug, Clone)]
pub struct Model {
    pub id: ModelId,

    /// Rust type name
    pub name: &'static str,

    /// Table storing the model, before any configured prefix is applied
    pub table_name: &'static str,

    pub fields: Vec<Field>,

    pub relations: Vec<Relation>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: &'static str,
    pub ty: Type,
    pub nullable: bool,
    pub primary_key: bool,
    pub auto: Option<Auto>,
}

#[derive(Debug, Clone)]
pub struct Relation {
    /// Name the relation is looked up by
    pub name: &'static str,

    pub kind: RelationKind,

    pub target: ModelId,

    /// Rust type name of the target, for error messages
    pub target_name: &'static str,

    /// Fields of the declaring model
    pub key: Vec<&'static str>,

    /// Fields of the target model
    pub references: Vec<&'static str>,

    /// Join table, for `many_to_many` relations
    pub through: Option<Through>,
}

#[derive(Debug, Clone)]
pub struct Through {
    pub table: &'static str,

    /// Join table columns paired with `key`
    pub join_key: Vec<&'static str>,

    /// Join table columns paired with `references`
    pub join_references: Vec<&'static str>,
}
