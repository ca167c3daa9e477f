//! Condition tree for WHERE clauses.
//!
//! A [`Condition`] is either an equality leaf or an AND/OR composite that owns
//! its children. The tree is populated through scoped initializers: every DSL
//! call (`eq`, `and`, `or`) appends to the condition it is invoked on, and
//! [`Condition::add_condition`] is the single place where a leaf refuses
//! children.
//!
//! # Example
//! ```
//! use sqldsl::{Condition, LogicalOp, SqlRender};
//!
//! let mut root = Condition::composite(LogicalOp::And);
//! root.or(|c| {
//!     c.eq("role", "admin")?;
//!     c.eq("role", "owner")?;
//!     Ok(())
//! })?;
//! (&mut root).eq("active", 1)?;
//! assert_eq!(root.to_sql(), "((role = 'admin' or role = 'owner') and active = 1)");
//! # Ok::<(), sqldsl::DslError>(())
//! ```

use crate::builder::SqlRender;
use crate::error::{DslError, DslResult};
use crate::value::{IntoValue, Value};

/// Boolean combinator of a composite condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl LogicalOp {
    /// SQL keyword used between children (lower-case).
    pub fn as_sql(self) -> &'static str {
        match self {
            LogicalOp::And => "and",
            LogicalOp::Or => "or",
        }
    }
}

/// Equality test: `column = value`, or `column is null` for [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct EqCondition {
    column: String,
    value: Value,
}

impl EqCondition {
    /// Column name, verbatim.
    pub fn column(&self) -> &str {
        &self.column
    }

    /// Compared value; [`Value::Null`] renders as `is null`.
    pub fn value(&self) -> &Value {
        &self.value
    }

    fn write_sql(&self, out: &mut String) {
        out.push_str(&self.column);
        if self.value.is_null() {
            out.push_str(" is null");
        } else {
            out.push_str(" = ");
            self.value.write_sql(out);
        }
    }
}

/// AND/OR group owning an ordered list of child conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCondition {
    op: LogicalOp,
    children: Vec<Condition>,
}

impl CompositeCondition {
    /// Combinator joining the children.
    pub fn operator(&self) -> LogicalOp {
        self.op
    }

    /// Children in insertion order.
    pub fn children(&self) -> &[Condition] {
        &self.children
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the group has no children yet.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn write_sql(&self, out: &mut String) {
        match self.children.as_slice() {
            [] => {}
            // A single child is transparent: no operator, no parentheses.
            [only] => only.write_sql(out),
            children => {
                out.push('(');
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                        out.push_str(self.op.as_sql());
                        out.push(' ');
                    }
                    child.write_sql(out);
                }
                out.push(')');
            }
        }
    }
}

/// A node of the WHERE condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Leaf equality test; cannot hold children.
    Eq(EqCondition),
    /// AND/OR group.
    Composite(CompositeCondition),
}

impl Condition {
    /// Create an equality leaf.
    ///
    /// Fails with [`DslError::InvalidValueType`] when `value` is not null, a
    /// number or a string.
    pub fn leaf(column: impl Into<String>, value: impl IntoValue) -> DslResult<Self> {
        Ok(Condition::Eq(EqCondition {
            column: column.into(),
            value: value.into_value()?,
        }))
    }

    /// Create an empty composite for `op`.
    pub fn composite(op: LogicalOp) -> Self {
        Condition::Composite(CompositeCondition {
            op,
            children: Vec::new(),
        })
    }

    /// Whether this node is an equality leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Condition::Eq(_))
    }

    /// Combinator of a composite; `None` for a leaf.
    pub fn operator(&self) -> Option<LogicalOp> {
        match self {
            Condition::Eq(_) => None,
            Condition::Composite(c) => Some(c.op),
        }
    }

    /// Children of a composite; always empty for a leaf.
    pub fn children(&self) -> &[Condition] {
        match self {
            Condition::Eq(_) => &[],
            Condition::Composite(c) => &c.children,
        }
    }

    /// Append a child condition.
    ///
    /// Composites accept any number of children. A leaf always fails with
    /// [`DslError::NestedConditionOnLeaf`].
    pub fn add_condition(&mut self, condition: Condition) -> DslResult<&mut Self> {
        match self {
            Condition::Eq(_) => return Err(DslError::NestedConditionOnLeaf),
            Condition::Composite(c) => c.children.push(condition),
        }
        Ok(self)
    }

    // ==================== Scope DSL ====================

    /// Append `column = value` (or `column is null`) to this condition.
    pub fn eq(&mut self, column: impl Into<String>, value: impl IntoValue) -> DslResult<&mut Self> {
        let leaf = Condition::leaf(column, value)?;
        self.add_condition(leaf)
    }

    /// Build an AND group with `initializer` and append it as one child.
    pub fn and<F>(&mut self, initializer: F) -> DslResult<&mut Self>
    where
        F: FnOnce(&mut Condition) -> DslResult<()>,
    {
        self.nested(LogicalOp::And, initializer)
    }

    /// Build an OR group with `initializer` and append it as one child.
    pub fn or<F>(&mut self, initializer: F) -> DslResult<&mut Self>
    where
        F: FnOnce(&mut Condition) -> DslResult<()>,
    {
        self.nested(LogicalOp::Or, initializer)
    }

    fn nested<F>(&mut self, op: LogicalOp, initializer: F) -> DslResult<&mut Self>
    where
        F: FnOnce(&mut Condition) -> DslResult<()>,
    {
        // The group is only attached once its initializer succeeded.
        let mut group = Condition::composite(op);
        initializer(&mut group)?;
        self.add_condition(group)
    }
}

impl SqlRender for Condition {
    fn write_sql(&self, out: &mut String) {
        match self {
            Condition::Eq(eq) => eq.write_sql(out),
            Condition::Composite(c) => c.write_sql(out),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_sql())
    }
}
