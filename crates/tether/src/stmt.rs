mod primitive;
pub use primitive::Primitive;

mod primitive_jiff;

mod query;
pub use query::{col, Column, Query};

pub use tether_core::stmt::{Direction, Expr, Type, Value, ValueRecord};
