use super::{BinaryOp, ExprBinaryOp, ExprInList, Value, ValueRecord};

/// A filter expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// All sub-expressions hold
    And(Vec<Expr>),

    /// Binary comparison
    BinaryOp(ExprBinaryOp),

    /// Reference to a column of the statement's table
    Column(String),

    /// Membership of a column tuple in a set of value tuples
    InList(ExprInList),

    /// The sub-expression is null
    IsNull(Box<Expr>),

    /// Negation
    Not(Box<Expr>),

    /// At least one sub-expression holds
    Or(Vec<Expr>),

    /// Literal value
    Value(Value),
}

impl Expr {
    pub fn column(name: impl Into<String>) -> Expr {
        Expr::Column(name.into())
    }

    pub fn value(value: impl Into<Value>) -> Expr {
        Expr::Value(value.into())
    }

    pub fn binary_op(lhs: impl Into<Expr>, op: BinaryOp, rhs: impl Into<Expr>) -> Expr {
        Expr::BinaryOp(ExprBinaryOp {
            lhs: Box::new(lhs.into()),
            op,
            rhs: Box::new(rhs.into()),
        })
    }

    pub fn eq(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Eq, rhs)
    }

    pub fn ne(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Ne, rhs)
    }

    pub fn gt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Gt, rhs)
    }

    pub fn ge(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Ge, rhs)
    }

    pub fn lt(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Lt, rhs)
    }

    pub fn le(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        Expr::binary_op(lhs, BinaryOp::Le, rhs)
    }

    pub fn is_null(expr: impl Into<Expr>) -> Expr {
        Expr::IsNull(Box::new(expr.into()))
    }

    pub fn not(expr: impl Into<Expr>) -> Expr {
        Expr::Not(Box::new(expr.into()))
    }

    /// Conjunction of two expressions, flattening nested `And`s.
    pub fn and(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        let mut operands = vec![];

        for expr in [lhs.into(), rhs.into()] {
            match expr {
                Expr::And(nested) => operands.extend(nested),
                expr => operands.push(expr),
            }
        }

        Expr::And(operands)
    }

    /// Conjunction of every expression. A single operand is returned as is.
    pub fn and_from_vec(mut operands: Vec<Expr>) -> Expr {
        if operands.len() == 1 {
            return operands.remove(0);
        }

        Expr::And(operands)
    }

    pub fn or(lhs: impl Into<Expr>, rhs: impl Into<Expr>) -> Expr {
        let mut operands = vec![];

        for expr in [lhs.into(), rhs.into()] {
            match expr {
                Expr::Or(nested) => operands.extend(nested),
                expr => operands.push(expr),
            }
        }

        Expr::Or(operands)
    }

    /// `columns = values`, column by column.
    pub fn key_eq<S: AsRef<str>>(columns: &[S], values: &ValueRecord) -> Expr {
        debug_assert_eq!(columns.len(), values.len());

        Expr::and_from_vec(
            columns
                .iter()
                .zip(values.iter())
                .map(|(column, value)| Expr::eq(Expr::column(column.as_ref()), value.clone()))
                .collect(),
        )
    }

    /// `(columns) IN (rows)`
    pub fn in_list<S: AsRef<str>>(columns: &[S], rows: Vec<ValueRecord>) -> Expr {
        Expr::InList(ExprInList {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows,
        })
    }
}

impl From<Value> for Expr {
    fn from(value: Value) -> Self {
        Expr::Value(value)
    }
}

impl From<ExprBinaryOp> for Expr {
    fn from(value: ExprBinaryOp) -> Self {
        Expr::BinaryOp(value)
    }
}

impl From<ExprInList> for Expr {
    fn from(value: ExprInList) -> Self {
        Expr::InList(value)
    }
}
