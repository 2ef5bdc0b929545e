use crate::stmt::Primitive;
use tether_core::{
    stmt::{Type, Value},
    Result,
};

impl Primitive for jiff::Timestamp {
    fn ty() -> Type {
        Type::Timestamp
    }

    fn load(value: Value) -> Result<Self> {
        value.cast(Type::Timestamp)?.try_into()
    }

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }
}
