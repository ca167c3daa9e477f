//! `tracing` output for built statements.
//!
//! A builder with a [`SqlTrace`] attached (see [`SelectBuilder::trace`]) emits one
//! event on target `sqldsl.sql` for every successful [`SelectBuilder::build`].
//! Without one, building is silent.
//!
//! Enable via the crate feature: `sqldsl = { features = ["tracing"] }` (on by default).

use crate::builder::SelectBuilder;
use std::borrow::Cow;
use tracing::Level;

/// Bytes of SQL kept in the event unless told otherwise.
pub const DEFAULT_SQL_LIMIT: usize = 200;

/// How [`SelectBuilder::build`] reports the statement it produced.
///
/// ```
/// use sqldsl::{SelectBuilder, SqlTrace};
/// use tracing::Level;
///
/// let mut qb = SelectBuilder::new();
/// qb.from("users").trace(SqlTrace::at(Level::INFO).limit(64));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlTrace {
    level: Level,
    sql_limit: Option<usize>,
}

impl Default for SqlTrace {
    fn default() -> Self {
        Self::at(Level::DEBUG)
    }
}

impl SqlTrace {
    /// Report at `level`, keeping at most [`DEFAULT_SQL_LIMIT`] bytes of SQL.
    pub fn at(level: Level) -> Self {
        Self {
            level,
            sql_limit: Some(DEFAULT_SQL_LIMIT),
        }
    }

    /// Keep at most `bytes` bytes of SQL, cut back to a char boundary and
    /// followed by `...`.
    pub fn limit(mut self, bytes: usize) -> Self {
        self.sql_limit = Some(bytes);
        self
    }

    /// Report the SQL in full.
    pub fn unlimited(mut self) -> Self {
        self.sql_limit = None;
        self
    }

    /// Level of the emitted event.
    pub fn event_level(&self) -> Level {
        self.level
    }

    /// Byte limit on the reported SQL; `None` reports it in full.
    pub fn sql_limit(&self) -> Option<usize> {
        self.sql_limit
    }

    fn shorten<'a>(&self, sql: &'a str) -> Cow<'a, str> {
        match self.sql_limit {
            Some(limit) if sql.len() > limit => {
                let end = (0..=limit)
                    .rev()
                    .find(|&i| sql.is_char_boundary(i))
                    .unwrap_or(0);
                Cow::Owned(format!("{}...", &sql[..end]))
            }
            _ => Cow::Borrowed(sql),
        }
    }

    pub(crate) fn report(&self, builder: &SelectBuilder, sql: &str) {
        let sql = self.shorten(sql);
        let table = builder.table().unwrap_or("-");
        let columns = builder.columns().len();
        let has_where = builder.condition().is_some();

        // `tracing` macros need the level at compile time.
        macro_rules! built {
            ($event:ident) => {
                tracing::$event!(
                    target: "sqldsl.sql",
                    table,
                    columns,
                    has_where,
                    sql = %sql,
                    "built select statement"
                )
            };
        }

        match self.level {
            Level::ERROR => built!(error),
            Level::WARN => built!(warn),
            Level::INFO => built!(info),
            Level::DEBUG => built!(debug),
            Level::TRACE => built!(trace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fmt;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
    use tracing_subscriber::registry::Registry;

    #[derive(Debug)]
    struct Recorded {
        target: String,
        level: Level,
        fields: HashMap<&'static str, String>,
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Recorded>>>);

    struct FieldMap<'a>(&'a mut HashMap<&'static str, String>);

    impl Visit for FieldMap<'_> {
        fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
            self.0.insert(field.name(), format!("{value:?}"));
        }

        fn record_str(&mut self, field: &Field, value: &str) {
            self.0.insert(field.name(), value.to_string());
        }
    }

    impl<S: Subscriber> Layer<S> for Recorder {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let mut fields = HashMap::new();
            event.record(&mut FieldMap(&mut fields));
            self.0.lock().unwrap().push(Recorded {
                target: event.metadata().target().to_string(),
                level: *event.metadata().level(),
                fields,
            });
        }
    }

    fn record_events(f: impl FnOnce()) -> Vec<Recorded> {
        let recorder = Recorder::default();
        let subscriber = Registry::default().with(recorder.clone());
        tracing::subscriber::with_default(subscriber, f);
        std::mem::take(&mut *recorder.0.lock().unwrap())
    }

    #[test]
    fn build_emits_one_event_with_shortened_sql() {
        let events = record_events(|| {
            let mut qb = SelectBuilder::new();
            qb.select(["a", "b"]).unwrap();
            qb.from("t").trace(SqlTrace::at(Level::INFO).limit(10));
            assert_eq!(qb.build().unwrap(), "SELECT a, b FROM t;");
        });

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.target, "sqldsl.sql");
        assert_eq!(event.level, Level::INFO);
        assert_eq!(event.fields["table"], "t");
        assert_eq!(event.fields["columns"], "2");
        assert_eq!(event.fields["has_where"], "false");
        assert_eq!(event.fields["sql"], "SELECT a, ...");
        assert_eq!(event.fields["message"], "built select statement");
    }

    #[test]
    fn unlimited_trace_reports_full_sql() {
        let events = record_events(|| {
            let mut qb = SelectBuilder::new();
            qb.from("t").trace(SqlTrace::at(Level::WARN).limit(1).unlimited());
            qb.where_clause(|c| {
                c.eq("id", 1)?;
                Ok(())
            })
            .unwrap();
            qb.build().unwrap();
        });

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].level, Level::WARN);
        assert_eq!(events[0].fields["has_where"], "true");
        assert_eq!(events[0].fields["sql"], "SELECT * FROM t WHERE id = 1;");
    }

    #[test]
    fn build_without_trace_is_silent() {
        let events = record_events(|| {
            let mut qb = SelectBuilder::new();
            qb.from("t");
            qb.build().unwrap();
        });
        assert!(events.is_empty());
    }

    #[test]
    fn failed_build_is_silent() {
        let events = record_events(|| {
            let mut qb = SelectBuilder::new();
            qb.trace(SqlTrace::default());
            assert!(qb.build().unwrap_err().is_missing_table());
        });
        assert!(events.is_empty());
    }

    #[test]
    fn shorten_respects_char_boundaries() {
        // 'é' is two bytes; a cut at byte 2 would split it.
        let trace = SqlTrace::default().limit(2);
        assert_eq!(trace.shorten("aé"), "a...");
        assert_eq!(trace.shorten("ab"), "ab");
    }

    #[test]
    fn defaults() {
        let trace = SqlTrace::default();
        assert_eq!(trace.event_level(), Level::DEBUG);
        assert_eq!(trace.sql_limit(), Some(DEFAULT_SQL_LIMIT));
        assert_eq!(SqlTrace::at(Level::ERROR).unlimited().sql_limit(), None);
    }
}
