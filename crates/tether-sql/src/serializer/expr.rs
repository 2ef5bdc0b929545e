use super::{Comma, Delimited, Formatter, Ident, Params, ToSql};

use tether_core::stmt::{Expr, ExprInList, ValueRecord};

impl ToSql for &Expr {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Expr::And(operands) if operands.is_empty() => fmt!(f, "1 = 1"),
            Expr::And(operands) => {
                fmt!(f, Delimited(operands.iter().map(Operand), " AND "))
            }
            Expr::Or(operands) if operands.is_empty() => fmt!(f, "0 = 1"),
            Expr::Or(operands) => {
                fmt!(f, Delimited(operands.iter().map(Operand), " OR "))
            }
            Expr::BinaryOp(expr) => {
                fmt!(f, Term(&expr.lhs) " " expr.op.as_sql() " " Term(&expr.rhs))
            }
            Expr::Column(name) => fmt!(f, Ident(name)),
            Expr::InList(expr) => expr.to_sql(f),
            Expr::IsNull(expr) => fmt!(f, Term(expr) " IS NULL"),
            Expr::Not(expr) => fmt!(f, "NOT " Term(expr)),
            Expr::Value(value) => fmt!(f, value),
        }
    }
}

impl ToSql for &ExprInList {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match (&self.columns[..], &self.rows[..]) {
            (_, []) => fmt!(f, "0 = 1"),
            ([column], rows) => {
                let values = rows.iter().flat_map(|row| row.iter());
                fmt!(f, Ident(column) " IN (" Comma(values) ")")
            }
            (columns, [row]) => RowEq(columns, row).to_sql(f),
            (columns, rows) => {
                let alternatives = rows.iter().map(|row| Parens(RowEq(columns, row)));
                fmt!(f, "(" Delimited(alternatives, " OR ") ")")
            }
        }
    }
}

/// Operand of `AND` / `OR`: nested conjunctions and disjunctions are
/// parenthesized.
struct Operand<'a>(&'a Expr);

impl ToSql for Operand<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self.0 {
            Expr::And(operands) | Expr::Or(operands) if operands.len() > 1 => {
                fmt!(f, "(" self.0 ")")
            }
            _ => self.0.to_sql(f),
        }
    }
}

/// Operand of a comparison, `IS NULL` or `NOT`: anything but a column or a
/// value is parenthesized.
struct Term<'a>(&'a Expr);

impl ToSql for Term<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self.0 {
            Expr::Column(_) | Expr::Value(_) => self.0.to_sql(f),
            _ => fmt!(f, "(" self.0 ")"),
        }
    }
}

struct RowEq<'a>(&'a [String], &'a ValueRecord);

impl ToSql for RowEq<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let terms = self
            .0
            .iter()
            .zip(self.1.iter())
            .map(|(column, value)| ColumnEq(column, value));
        fmt!(f, Delimited(terms, " AND "))
    }
}

struct ColumnEq<'a>(&'a str, &'a tether_core::stmt::Value);

impl ToSql for ColumnEq<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, Ident(self.0) " = " self.1)
    }
}

struct Parens<T>(T);

impl<T: ToSql> ToSql for Parens<T> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        fmt!(f, "(" self.0 ")")
    }
}
