//! # clipshelf core
//!
//! Shared, I/O-free logic for clipshelf: clip records, the
//! filter → sort → limit selection, row rendering, and the engine that wires
//! a [`DocumentSource`](source::DocumentSource) to a
//! [`DisplaySink`](sink::DisplaySink).
//!
//! This crate performs no filesystem or network access. Hosts supply the
//! collection snapshot and decide how rendered rows are displayed.
//!
//! ```text
//! QueryChanged(text) ─▶ Controller ─▶ Engine::recompute(query)
//!                                         │
//!             DocumentSource::snapshot() ◀┘
//!                      │
//!                      ▼
//!        select (eligible → match → sort → limit)
//!                      │
//!                      ▼
//!              render ─▶ DisplaySink::replace(rows)
//! ```

pub mod controller;
pub mod engine;
pub mod models;
pub mod render;
pub mod select;
pub mod sink;
pub mod source;

pub use controller::{Controller, HostEvent};
pub use engine::{Engine, EngineOptions, DEFAULT_MAX_RESULTS};
pub use models::{DocumentRecord, RenderRow};
pub use render::{render, DESCRIPTION_PLACEHOLDER, IMAGE_PLACEHOLDER};
pub use select::{is_eligible, searchable_text, select};
pub use sink::{CollectingSink, DisplaySink};
pub use source::{DocumentSource, InMemorySource};
