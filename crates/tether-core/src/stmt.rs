//! Statement AST handed to drivers.
//!
//! Statements address tables and columns by name. The relation layer builds
//! them from resolved schema metadata; drivers serialize and run them.

mod delete;
pub use delete::Delete;

mod expr;
pub use expr::Expr;

mod expr_binary_op;
pub use expr_binary_op::{BinaryOp, ExprBinaryOp};

mod expr_in_list;
pub use expr_in_list::ExprInList;

mod insert;
pub use insert::Insert;

mod order_by;
pub use order_by::{Direction, OrderBy};

mod select;
pub use select::Select;

mod statement;
pub use statement::Statement;

mod ty;
pub use ty::Type;

mod update;
pub use update::{Assignment, Update};

mod value;
pub use value::Value;

mod value_record;
pub use value_record::ValueRecord;
