//! Error types for sqldsl

use thiserror::Error;

/// Result type alias for sqldsl operations
pub type DslResult<T> = Result<T, DslError>;

/// Errors raised while assembling or finalizing a SELECT statement.
///
/// Every variant is raised at the point of violation and aborts the DSL call
/// in progress. Mutations made before the failing call are kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DslError {
    /// `select()` was called without any column names
    #[error("At least one column should be defined")]
    EmptyColumnList,

    /// `select()` was called again after columns were already accepted
    #[error(
        "Detected an attempt to redefine columns to fetch. Current column list: {current:?}, new column list: {attempted:?}"
    )]
    ColumnsAlreadyDefined {
        current: Vec<String>,
        attempted: Vec<String>,
    },

    /// `build()` was called before `from()`
    #[error("Failed to build sql select - target table not specified")]
    MissingTable,

    /// An `eq` value was not null, a number or a string
    #[error("Only null, numbers and string values can be used in the 'where' clause, got {0}")]
    InvalidValueType(String),

    /// A child condition was appended to an `eq` leaf
    #[error("Can't add a nested condition to the sql 'eq'")]
    NestedConditionOnLeaf,
}

impl DslError {
    /// Create a columns-already-defined error from the current and attempted lists
    pub fn columns_already_defined(current: &[String], attempted: Vec<String>) -> Self {
        Self::ColumnsAlreadyDefined {
            current: current.to_vec(),
            attempted,
        }
    }

    /// Create an invalid value type error
    pub fn invalid_value(description: impl Into<String>) -> Self {
        Self::InvalidValueType(description.into())
    }

    /// Check if this is a missing table error
    pub fn is_missing_table(&self) -> bool {
        matches!(self, Self::MissingTable)
    }

    /// Check if this is an invalid value type error
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, Self::InvalidValueType(_))
    }

    /// Check if this error came from appending to an `eq` leaf
    pub fn is_nested_on_leaf(&self) -> bool {
        matches!(self, Self::NestedConditionOnLeaf)
    }
}
