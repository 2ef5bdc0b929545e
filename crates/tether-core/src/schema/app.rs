mod field;
pub use field::{Auto, Field, FieldId};

mod join_table;
pub use join_table::{JoinColumn, JoinRow, JoinTable};

mod model;
pub use model::{Model, ModelId};

mod pk;
pub use pk::PrimaryKey;

mod relation;
pub use relation::{KeyPair, Relation, RelationKind};

mod schema;
pub use schema::Schema;
