//! SELECT builder and the `query()` entry point.

use crate::builder::traits::SqlRender;
use crate::condition::{Condition, LogicalOp};
use crate::error::{DslError, DslResult};

#[cfg(feature = "tracing")]
use crate::trace::SqlTrace;

/// Build a SELECT statement with a scoped initializer.
///
/// The returned builder is not finalized; call [`SelectBuilder::build`] to get
/// the SQL string.
///
/// # Example
/// ```
/// use sqldsl::query;
///
/// let sql = query(|q| {
///     q.select(["id", "name"])?;
///     q.from("users");
///     q.where_clause(|c| {
///         c.or(|c| {
///             c.eq("role", "admin")?;
///             c.eq("role", "owner")?;
///             Ok(())
///         })?;
///         c.eq("deleted_at", None::<i64>)?;
///         Ok(())
///     })?;
///     Ok(())
/// })?
/// .build()?;
///
/// assert_eq!(
///     sql,
///     "SELECT id, name FROM users WHERE ((role = 'admin' or role = 'owner') and deleted_at is null);"
/// );
/// # Ok::<(), sqldsl::DslError>(())
/// ```
pub fn query<F>(initializer: F) -> DslResult<SelectBuilder>
where
    F: FnOnce(&mut SelectBuilder) -> DslResult<()>,
{
    let mut builder = SelectBuilder::new();
    initializer(&mut builder)?;
    Ok(builder)
}

/// Single-table SELECT builder.
///
/// Configuration calls may come in any order. [`build`](Self::build) does not
/// freeze the builder: later calls change what the next build returns.
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    /// Accepted column names, in insertion order. Empty renders as `*`.
    columns: Vec<String>,
    /// Target table; last `from()` wins.
    table: Option<String>,
    /// Root of the WHERE tree.
    condition: Option<Condition>,
    #[cfg(feature = "tracing")]
    trace: Option<SqlTrace>,
}

impl SelectBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Configuration ====================

    /// Set the columns to fetch.
    ///
    /// Empty names are dropped. Fails with [`DslError::EmptyColumnList`] when
    /// no names are given, and with [`DslError::ColumnsAlreadyDefined`] once a
    /// previous call accepted at least one name. `"*"` is kept as a literal
    /// column name.
    pub fn select<I, S>(&mut self, columns: I) -> DslResult<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        if columns.is_empty() {
            return Err(DslError::EmptyColumnList);
        }
        if !self.columns.is_empty() {
            return Err(DslError::columns_already_defined(&self.columns, columns));
        }

        self.columns
            .extend(columns.into_iter().filter(|name| !name.is_empty()));
        Ok(self)
    }

    /// Set the target table, replacing any previous one.
    pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = Some(table.into());
        self
    }

    /// Replace the WHERE condition with a fresh AND group built by `initializer`.
    ///
    /// If the initializer fails, the previous condition (if any) is kept.
    pub fn where_clause<F>(&mut self, initializer: F) -> DslResult<&mut Self>
    where
        F: FnOnce(&mut Condition) -> DslResult<()>,
    {
        let mut root = Condition::composite(LogicalOp::And);
        initializer(&mut root)?;
        self.condition = Some(root);
        Ok(self)
    }

    /// Report the built SQL through `tracing` on every successful [`build`](Self::build).
    #[cfg(feature = "tracing")]
    pub fn trace(&mut self, trace: SqlTrace) -> &mut Self {
        self.trace = Some(trace);
        self
    }

    /// Shorthand for `trace(SqlTrace::at(level))`.
    #[cfg(feature = "tracing")]
    pub fn trace_at(&mut self, level: tracing::Level) -> &mut Self {
        self.trace(SqlTrace::at(level))
    }

    /// Stop reporting built SQL.
    #[cfg(feature = "tracing")]
    pub fn untrace(&mut self) -> &mut Self {
        self.trace = None;
        self
    }

    /// The attached trace settings, if any.
    #[cfg(feature = "tracing")]
    pub fn trace_settings(&self) -> Option<&SqlTrace> {
        self.trace.as_ref()
    }

    // ==================== Accessors ====================

    /// Accepted column names, in insertion order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Last table passed to `from()`.
    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Root of the WHERE tree, if `where_clause` succeeded at least once.
    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    // ==================== Finalization ====================

    /// Validate builder state before rendering.
    pub fn validate(&self) -> DslResult<()> {
        if self.table.is_none() {
            return Err(DslError::MissingTable);
        }
        Ok(())
    }

    /// Render the final statement.
    ///
    /// Fails with [`DslError::MissingTable`] if `from()` was never called.
    pub fn build(&self) -> DslResult<String> {
        self.validate()?;
        let sql = self.to_sql();

        #[cfg(feature = "tracing")]
        if let Some(trace) = &self.trace {
            trace.report(self, &sql);
        }

        Ok(sql)
    }
}

impl SqlRender for SelectBuilder {
    /// Write `SELECT <columns> FROM <table>[ WHERE <condition>];`.
    ///
    /// This does not validate: a missing table renders as an empty name.
    fn write_sql(&self, out: &mut String) {
        out.push_str("SELECT ");
        if self.columns.is_empty() {
            out.push('*');
        } else {
            out.push_str(&self.columns.join(", "));
        }
        out.push_str(" FROM ");
        out.push_str(self.table.as_deref().unwrap_or_default());
        if let Some(condition) = &self.condition {
            out.push_str(" WHERE ");
            condition.write_sql(out);
        }
        out.push(';');
    }
}

impl std::fmt::Display for SelectBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}
