//! Query state and event handling for a live browsing session.

use anyhow::Result;
use tracing::warn;

use crate::engine::Engine;
use crate::sink::DisplaySink;
use crate::source::DocumentSource;

/// Events a host UI delivers to the controller, one at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The widget was shown for the first time.
    Mount,
    /// The query input now holds this literal text.
    QueryChanged(String),
}

/// Sole owner of the query. Every event triggers exactly one full pass.
pub struct Controller<S, K> {
    engine: Engine<S, K>,
    query: String,
}

impl<S: DocumentSource, K: DisplaySink> Controller<S, K> {
    pub fn new(engine: Engine<S, K>) -> Self {
        Self {
            engine,
            query: String::new(),
        }
    }

    /// The query the last pass ran with.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn engine(&self) -> &Engine<S, K> {
        &self.engine
    }

    pub fn into_engine(self) -> Engine<S, K> {
        self.engine
    }

    /// Handle one host event.
    ///
    /// A failed pass is returned to the host; the query is still updated so
    /// the next event starts from what the user typed.
    pub fn handle(&mut self, event: HostEvent) -> Result<usize> {
        match event {
            HostEvent::Mount => self.query.clear(),
            HostEvent::QueryChanged(text) => self.query = text,
        }

        self.engine.recompute(&self.query).inspect_err(|e| {
            warn!(query = %self.query, error = %format!("{:#}", e), "pass failed");
        })
    }

    pub fn mount(&mut self) -> Result<usize> {
        self.handle(HostEvent::Mount)
    }

    pub fn set_query(&mut self, text: impl Into<String>) -> Result<usize> {
        self.handle(HostEvent::QueryChanged(text.into()))
    }
}
