use super::{FieldId, JoinTable, ModelId};

/// A resolved relation declaration.
///
/// For direct relations `pairs` lists the (base field, related field)
/// correspondences. For many-to-many relations `pairs` is empty and the
/// correspondences run through `through`.
#[derive(Debug, Clone)]
pub struct Relation {
    /// Name the relation is declared and looked up under
    pub name: String,

    pub kind: RelationKind,

    /// Model declaring the relation
    pub source: ModelId,

    /// Model on the other side
    pub target: ModelId,

    pub pairs: Vec<KeyPair>,

    /// Join table, for many-to-many relations
    pub through: Option<JoinTable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// The declaring model holds the foreign key
    BelongsTo,

    /// The related model holds a foreign key to the declaring model, at most
    /// one row per declaring row
    HasOne,

    /// The related model holds a foreign key to the declaring model
    HasMany,

    /// Rows are linked through a join table
    ManyToMany,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair {
    /// Field on the declaring model
    pub base: FieldId,

    /// Field on the related model
    pub related: FieldId,
}

impl Relation {
    /// Fields of the declaring model that take part in the relation.
    pub fn base_fields(&self) -> Vec<FieldId> {
        match &self.through {
            Some(through) => through.base.iter().map(|column| column.field).collect(),
            None => self.pairs.iter().map(|pair| pair.base).collect(),
        }
    }

    /// Fields of the related model that take part in the relation.
    pub fn related_fields(&self) -> Vec<FieldId> {
        match &self.through {
            Some(through) => through.related.iter().map(|column| column.field).collect(),
            None => self.pairs.iter().map(|pair| pair.related).collect(),
        }
    }

    pub fn is_many_to_many(&self) -> bool {
        self.kind == RelationKind::ManyToMany
    }
}

impl RelationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongs_to",
            RelationKind::HasOne => "has_one",
            RelationKind::HasMany => "has_many",
            RelationKind::ManyToMany => "many_to_many",
        }
    }
}
