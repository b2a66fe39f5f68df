//! Core data models for clipshelf.
//!
//! [`DocumentRecord`] is what a source adapter hands to the engine;
//! [`RenderRow`] is the display-ready projection produced for one pass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for one saved clip, as seen by the engine.
///
/// Records are owned by the source adapter. The engine only reads them for
/// the duration of a single recomputation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Clip title. Records with no title, or an empty one, are never shown.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub description: String,
    /// Link to the original page.
    #[serde(default)]
    pub source_url: String,
    /// Thumbnail; empty when the clip has none.
    #[serde(default)]
    pub image_url: String,
    /// Link target for the locally stored copy (e.g. `WebClips/2024…-Title`).
    #[serde(default)]
    pub local_ref: String,
    /// Ordering key. `None` sorts after every timestamped record.
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl DocumentRecord {
    /// The title, or `""` when absent.
    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }
}

/// One display-ready row.
///
/// The image region links to `source_url`; the text region links to
/// `local_ref` and shows `display_text` over `description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderRow {
    pub source_url: String,
    pub image_url: String,
    pub local_ref: String,
    pub title: String,
    pub description: String,
    pub display_text: String,
}
