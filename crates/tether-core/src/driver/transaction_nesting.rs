use crate::{Error, Result};

use std::borrow::Cow;

/// Tracks transaction nesting depth and produces the SQL for `BEGIN` or
/// `SAVEPOINT`, `COMMIT` or `RELEASE SAVEPOINT`, and `ROLLBACK` or
/// `ROLLBACK TO SAVEPOINT` based on the current depth.
///
/// SQL drivers embed one of these and run the returned statement.
#[derive(Debug)]
pub struct TransactionNesting {
    depth: u32,
    begin_stmt: &'static str,
}

impl TransactionNesting {
    /// Nesting tracker for SQLite (`BEGIN` / `COMMIT` / `ROLLBACK`).
    pub fn sqlite() -> Self {
        Self {
            depth: 0,
            begin_stmt: "BEGIN",
        }
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the SQL to begin a transaction or create a savepoint, and
    /// increments the nesting depth.
    pub fn start(&mut self) -> Cow<'static, str> {
        let sql = if self.depth == 0 {
            Cow::Borrowed(self.begin_stmt)
        } else {
            Cow::Owned(format!("SAVEPOINT sp_{}", self.depth))
        };
        self.depth += 1;
        sql
    }

    /// Returns the SQL to commit the current transaction or release a
    /// savepoint, and decrements the nesting depth.
    pub fn commit(&mut self) -> Result<Cow<'static, str>> {
        self.pop("commit")?;
        Ok(if self.depth == 0 {
            Cow::Borrowed("COMMIT")
        } else {
            Cow::Owned(format!("RELEASE SAVEPOINT sp_{}", self.depth))
        })
    }

    /// Returns the SQL to roll back the current transaction or savepoint, and
    /// decrements the nesting depth.
    ///
    /// A rolled back savepoint stays on the database's savepoint stack until
    /// the outer transaction ends.
    pub fn rollback(&mut self) -> Result<Cow<'static, str>> {
        self.pop("rollback")?;
        Ok(if self.depth == 0 {
            Cow::Borrowed("ROLLBACK")
        } else {
            Cow::Owned(format!("ROLLBACK TO SAVEPOINT sp_{}", self.depth))
        })
    }

    /// Undoes the bookkeeping of a `start` whose statement failed to run.
    pub fn abort_start(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    fn pop(&mut self, action: &str) -> Result<()> {
        if self.depth == 0 {
            return Err(Error::invalid_result(format!(
                "cannot {action}: no transaction in progress"
            )));
        }
        self.depth -= 1;
        Ok(())
    }
}
