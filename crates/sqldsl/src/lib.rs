//! # sqldsl
//!
//! A small nested-builder DSL for single-table SQL `SELECT` statements.
//!
//! ## Features
//!
//! - **Scoped initializers**: `query()` and `where_clause()` take closures that receive the
//!   builder or condition being configured
//! - **Condition tree**: `eq` leaves combined with `and` / `or` groups; precedence is made
//!   explicit with parentheses only where a group has two or more children
//! - **Typed errors**: every misuse comes back as a [`DslError`]
//! - **String output only**: no connection, no parameter binding, no escaping
//!
//! ```
//! use sqldsl::query;
//!
//! let sql = query(|q| {
//!     q.from("orders");
//!     q.where_clause(|c| {
//!         c.eq("status", "open")?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?
//! .build()?;
//!
//! assert_eq!(sql, "SELECT * FROM orders WHERE status = 'open';");
//! # Ok::<(), sqldsl::DslError>(())
//! ```

pub mod builder;
pub mod condition;
pub mod error;
pub mod prelude;
pub mod value;

#[cfg(feature = "tracing")]
pub mod trace;

pub use builder::{SelectBuilder, SqlRender, query};
pub use condition::{CompositeCondition, Condition, EqCondition, LogicalOp};
pub use error::{DslError, DslResult};
pub use value::{IntoValue, Value};

#[cfg(feature = "tracing")]
pub use trace::SqlTrace;
