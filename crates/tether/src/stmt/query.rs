use tether_core::stmt::{Direction, Expr, OrderBy, Select, Value, ValueRecord};

/// Caller supplied scope for reading related rows: extra filters, ordering
/// and a row window.
///
/// ```ignore
/// let query = Query::new()
///     .filter(col("title").ne("draft"))
///     .desc("id")
///     .limit(10);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    filter: Option<Expr>,
    order_by: Vec<OrderBy>,
    limit: Option<u64>,
    offset: Option<u64>,
}

/// A column reference used to build filter expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
}

pub fn col(name: impl Into<String>) -> Column {
    Column { name: name.into() }
}

impl Query {
    pub fn new() -> Query {
        Query::default()
    }

    /// Adds a filter. Filters are combined with `AND`.
    pub fn filter(mut self, expr: Expr) -> Query {
        self.filter = Some(match self.filter.take() {
            Some(existing) => Expr::and(existing, expr),
            None => expr,
        });
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Query {
        self.order_by.push(OrderBy {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn asc(self, column: impl Into<String>) -> Query {
        self.order_by(column, Direction::Asc)
    }

    pub fn desc(self, column: impl Into<String>) -> Query {
        self.order_by(column, Direction::Desc)
    }

    pub fn limit(mut self, limit: u64) -> Query {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Query {
        self.offset = Some(offset);
        self
    }

    /// Caps the row window at one row.
    pub(crate) fn first(mut self) -> Query {
        self.limit = Some(self.limit.map_or(1, |limit| limit.min(1)));
        self
    }

    pub(crate) fn apply(self, select: &mut Select) {
        if let Some(filter) = self.filter {
            select.and(filter);
        }

        select.order_by.extend(self.order_by);
        select.limit = self.limit;
        select.offset = self.offset;
    }
}

impl Column {
    pub fn eq(&self, value: impl Into<Value>) -> Expr {
        Expr::eq(self.expr(), Expr::value(value))
    }

    pub fn ne(&self, value: impl Into<Value>) -> Expr {
        Expr::ne(self.expr(), Expr::value(value))
    }

    pub fn gt(&self, value: impl Into<Value>) -> Expr {
        Expr::gt(self.expr(), Expr::value(value))
    }

    pub fn ge(&self, value: impl Into<Value>) -> Expr {
        Expr::ge(self.expr(), Expr::value(value))
    }

    pub fn lt(&self, value: impl Into<Value>) -> Expr {
        Expr::lt(self.expr(), Expr::value(value))
    }

    pub fn le(&self, value: impl Into<Value>) -> Expr {
        Expr::le(self.expr(), Expr::value(value))
    }

    pub fn is_null(&self) -> Expr {
        Expr::is_null(self.expr())
    }

    pub fn is_not_null(&self) -> Expr {
        Expr::not(Expr::is_null(self.expr()))
    }

    pub fn in_list<V: Into<Value>>(&self, values: impl IntoIterator<Item = V>) -> Expr {
        let rows = values
            .into_iter()
            .map(|value| ValueRecord::from_vec(vec![value.into()]))
            .collect();

        Expr::in_list(&[self.name.as_str()], rows)
    }

    fn expr(&self) -> Expr {
        Expr::column(&self.name)
    }
}
