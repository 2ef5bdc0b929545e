mod column;
pub use column::Column;

mod schema;
pub use schema::Schema;

mod table;
pub use table::Table;
