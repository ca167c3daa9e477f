//! Trait definitions for SQL rendering.

/// Anything that can be written out as a SQL fragment.
///
/// Rendering is a pure read of the current state: it never validates and never
/// mutates, so it can be repeated freely.
pub trait SqlRender {
    /// Append the SQL fragment to `out`.
    fn write_sql(&self, out: &mut String);

    /// Render the SQL fragment into a new string.
    fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }
}
