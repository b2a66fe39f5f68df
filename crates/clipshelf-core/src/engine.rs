//! The recomputation pass: snapshot → select → render → sink.

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::RenderRow;
use crate::render::render;
use crate::select::select;
use crate::sink::DisplaySink;
use crate::source::DocumentSource;

/// Row cap used when the host does not configure one.
pub const DEFAULT_MAX_RESULTS: usize = 200;

/// Static engine settings, fixed at construction.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub max_results: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

/// Runs full recomputation passes against an injected source and sink.
///
/// The engine holds no per-query state. Each pass takes a fresh snapshot,
/// which is dropped once the rows have been handed to the sink.
pub struct Engine<S, K> {
    source: S,
    sink: K,
    options: EngineOptions,
}

impl<S: DocumentSource, K: DisplaySink> Engine<S, K> {
    pub fn new(source: S, sink: K, options: EngineOptions) -> Self {
        Self {
            source,
            sink,
            options,
        }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_parts(self) -> (S, K) {
        (self.source, self.sink)
    }

    /// Compute the rows for `query` without touching the sink.
    pub fn rows_for(&self, query: &str) -> Result<Vec<RenderRow>> {
        let snapshot = self
            .source
            .snapshot()
            .with_context(|| format!("Failed to read collection '{}'", self.source.collection()))?;

        let selected = select(&snapshot, query, self.options.max_results);
        debug!(
            collection = self.source.collection(),
            query,
            snapshot = snapshot.len(),
            selected = selected.len(),
            "recomputed"
        );
        Ok(render(&selected))
    }

    /// Run one pass and replace the sink's output.
    ///
    /// On error the sink is not called, so the previous output stays as it
    /// was. Returns the number of rows displayed.
    pub fn recompute(&mut self, query: &str) -> Result<usize> {
        let rows = self.rows_for(query)?;
        self.sink
            .replace(&rows)
            .context("Failed to display rows")?;
        Ok(rows.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentRecord;
    use crate::sink::CollectingSink;
    use crate::source::InMemorySource;
    use chrono::{TimeZone, Utc};

    fn doc(title: &str, mtime: i64) -> DocumentRecord {
        DocumentRecord {
            title: Some(title.to_string()),
            last_modified: Some(Utc.timestamp_opt(mtime, 0).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_recompute_replaces_sink_rows() {
        let source = InMemorySource::new("WebClips", vec![doc("a", 1), doc("b", 2)]);
        let mut engine = Engine::new(&source, CollectingSink::new(), EngineOptions::default());

        assert_eq!(engine.recompute("").unwrap(), 2);
        assert_eq!(engine.sink().rows()[0].title, "b");

        assert_eq!(engine.recompute("a").unwrap(), 1);
        assert_eq!(engine.sink().rows().len(), 1);
        assert_eq!(engine.sink().replacements(), 2);
    }

    #[test]
    fn test_failed_snapshot_keeps_previous_output() {
        let source = InMemorySource::new("WebClips", vec![doc("a", 1)]);
        let mut engine = Engine::new(&source, CollectingSink::new(), EngineOptions::default());
        engine.recompute("").unwrap();

        source.set_unavailable();
        let err = engine.recompute("zzz").unwrap_err();
        assert!(format!("{:#}", err).contains("WebClips"));
        assert_eq!(engine.sink().rows().len(), 1);
        assert_eq!(engine.sink().replacements(), 1);

        source.set_records(vec![doc("c", 3)]);
        engine.recompute("").unwrap();
        assert_eq!(engine.sink().rows()[0].title, "c");
    }

    #[test]
    fn test_snapshot_is_reread_every_pass() {
        let source = InMemorySource::new("WebClips", vec![doc("a", 1)]);
        let mut engine = Engine::new(&source, CollectingSink::new(), EngineOptions::default());
        engine.recompute("").unwrap();
        source.set_records(vec![doc("a", 1), doc("new", 9)]);
        engine.recompute("").unwrap();
        assert_eq!(engine.sink().rows()[0].title, "new");
    }

    #[test]
    fn test_max_results_option() {
        let source = InMemorySource::new("WebClips", (0..10).map(|i| doc("x", i)).collect());
        let mut engine = Engine::new(&source, CollectingSink::new(), EngineOptions { max_results: 3 });
        assert_eq!(engine.recompute("").unwrap(), 3);
    }

    #[test]
    fn test_empty_collection_replaces_with_nothing() {
        let source = InMemorySource::new("WebClips", Vec::new());
        let mut engine = Engine::new(&source, CollectingSink::new(), EngineOptions::default());
        assert_eq!(engine.recompute("").unwrap(), 0);
        assert!(engine.sink().rows().is_empty());
        assert_eq!(engine.sink().replacements(), 1);
    }
}
