//! SELECT statement builder.
//!
//! A [`SelectBuilder`] collects the columns, the target table and an optional
//! WHERE condition tree, and renders them as
//! `SELECT <columns> FROM <table>[ WHERE <condition>];`.

pub mod select;
pub mod traits;

pub use select::{SelectBuilder, query};
pub use traits::SqlRender;
