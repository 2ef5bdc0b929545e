use super::{Type, ValueRecord};
use crate::{Error, Result};

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Bool(bool),

    /// Signed 32-bit integer
    I32(i32),

    /// Signed 64-bit integer
    I64(i64),

    /// Null value
    #[default]
    Null,

    /// Record value
    Record(ValueRecord),

    /// A list of values of the same type
    List(Vec<Value>),

    /// String value
    String(String),

    /// Instant in time
    Timestamp(jiff::Timestamp),
}

impl Value {
    pub const fn null() -> Self {
        Self::Null
    }

    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn record_from_vec(fields: Vec<Self>) -> Self {
        ValueRecord::from_vec(fields).into()
    }

    /// Takes the value, leaving `Null` in its place.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::I32(_) => "I32",
            Value::I64(_) => "I64",
            Value::Null => "Null",
            Value::Record(_) => "Record",
            Value::List(_) => "List",
            Value::String(_) => "String",
            Value::Timestamp(_) => "Timestamp",
        }
    }

    /// Returns the type of a scalar value, or `None` for null and composite
    /// values.
    pub fn infer_ty(&self) -> Option<Type> {
        Some(match self {
            Value::Bool(_) => Type::Bool,
            Value::I32(_) => Type::I32,
            Value::I64(_) => Type::I64,
            Value::String(_) => Type::String,
            Value::Timestamp(_) => Type::Timestamp,
            Value::Null | Value::Record(_) | Value::List(_) => return None,
        })
    }

    /// True if the value is null or the zero value of its type.
    ///
    /// Database assigned keys are left out of inserts while they still hold
    /// their zero value.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(v) => !v,
            Value::I32(v) => *v == 0,
            Value::I64(v) => *v == 0,
            Value::String(v) => v.is_empty(),
            Value::Timestamp(v) => *v == jiff::Timestamp::UNIX_EPOCH,
            Value::Record(record) => record.iter().all(Value::is_zero),
            Value::List(items) => items.is_empty(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_record(self) -> Result<ValueRecord> {
        match self {
            Self::Record(record) => Ok(record),
            other => Err(Error::type_conversion(other, "ValueRecord")),
        }
    }

    /// Casts an integer value to the requested integer width. Drivers that
    /// only store 64-bit integers use this to hand back the declared type.
    pub fn cast(self, ty: Type) -> Result<Value> {
        Ok(match (self, ty) {
            (Value::Null, _) => Value::Null,
            (Value::I64(v), Type::I32) => match i32::try_from(v) {
                Ok(v) => Value::I32(v),
                Err(_) => return Err(Error::type_conversion(Value::I64(v), "i32")),
            },
            (Value::I64(v), Type::Bool) => Value::Bool(v != 0),
            (Value::I32(v), Type::I64) => Value::I64(v.into()),
            (Value::String(v), Type::Timestamp) => Value::Timestamp(v.parse()?),
            (value, ty) if value.infer_ty() == Some(ty) => value,
            (value, ty) => return Err(Error::type_conversion(value, ty.name())),
        })
    }
}

impl From<bool> for Value {
    fn from(src: bool) -> Self {
        Self::Bool(src)
    }
}

impl From<i32> for Value {
    fn from(src: i32) -> Self {
        Self::I32(src)
    }
}

impl From<i64> for Value {
    fn from(src: i64) -> Self {
        Self::I64(src)
    }
}

impl From<String> for Value {
    fn from(src: String) -> Self {
        Self::String(src)
    }
}

impl From<&String> for Value {
    fn from(src: &String) -> Self {
        Self::String(src.clone())
    }
}

impl From<&str> for Value {
    fn from(src: &str) -> Self {
        Self::String(src.to_string())
    }
}

impl From<jiff::Timestamp> for Value {
    fn from(src: jiff::Timestamp) -> Self {
        Self::Timestamp(src)
    }
}

impl From<ValueRecord> for Value {
    fn from(value: ValueRecord) -> Self {
        Self::Record(value)
    }
}

impl<T> From<Option<T>> for Value
where
    Value: From<T>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Value::from(value),
            None => Value::Null,
        }
    }
}

macro_rules! impl_try_from_value {
    ( $( $variant:ident => $ty:ty ),* ) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = Error;

                fn try_from(value: Value) -> Result<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(Error::type_conversion(other, stringify!($ty))),
                    }
                }
            }
        )*
    };
}

impl_try_from_value!(
    Bool => bool,
    I32 => i32,
    I64 => i64,
    String => String,
    Timestamp => jiff::Timestamp
);
