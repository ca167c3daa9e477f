//! Convenient re-exports for building queries.
//!
//! ```
//! use sqldsl::prelude::*;
//! ```

pub use crate::builder::{SelectBuilder, SqlRender, query};
pub use crate::condition::{Condition, LogicalOp};
pub use crate::error::{DslError, DslResult};
pub use crate::value::{IntoValue, Value};

#[cfg(feature = "tracing")]
pub use crate::trace::SqlTrace;
