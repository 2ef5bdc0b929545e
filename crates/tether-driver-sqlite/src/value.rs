use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};
use tether_core::{
    err,
    stmt::{self, Value as CoreValue},
    Error, Result,
};

#[derive(Debug)]
pub struct Value(CoreValue);

impl From<CoreValue> for Value {
    fn from(value: CoreValue) -> Self {
        Self(value)
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.0
    }

    /// Reads column `index` of `row` as a value of type `ty`.
    pub fn from_sql(row: &Row, index: usize, ty: stmt::Type) -> Result<Self> {
        let value: SqlValue = row.get(index).map_err(Error::driver_operation_failed)?;

        let core_value = match value {
            SqlValue::Null => CoreValue::Null,
            SqlValue::Integer(value) => match ty {
                stmt::Type::Bool => CoreValue::Bool(value != 0),
                stmt::Type::I32 => CoreValue::I64(value).cast(stmt::Type::I32)?,
                stmt::Type::I64 => CoreValue::I64(value),
                _ => return Err(Error::type_conversion(CoreValue::I64(value), ty.name())),
            },
            SqlValue::Text(value) => match ty {
                stmt::Type::Timestamp => CoreValue::Timestamp(value.parse()?),
                stmt::Type::String => CoreValue::String(value),
                _ => return Err(Error::type_conversion(CoreValue::String(value), ty.name())),
            },
            SqlValue::Real(value) => {
                return Err(err!("cannot convert REAL {value} to {}", ty.name()));
            }
            SqlValue::Blob(_) => return Err(err!("cannot convert BLOB to {}", ty.name())),
        };

        Ok(Value(core_value))
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        use stmt::Value;

        match &self.0 {
            Value::Bool(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v)))),
            Value::I32(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(i64::from(*v)))),
            Value::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            Value::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            Value::Timestamp(v) => Ok(ToSqlOutput::Owned(SqlValue::Text(v.to_string()))),
            Value::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            value @ (Value::Record(_) | Value::List(_)) => Err(
                rusqlite::Error::ToSqlConversionFailure(Box::new(Error::type_conversion(
                    value.clone(),
                    "SQL parameter",
                ))),
            ),
        }
    }
}
