//! Projection of selected records into display-ready rows.
//!
//! Rendering never filters or reorders: row `i` is always built from record
//! `i` of the selection.

use crate::models::{DocumentRecord, RenderRow};

/// Shown in the text region when a clip has no description.
pub const DESCRIPTION_PLACEHOLDER: &str = "...";

/// Image reference used when a clip has no thumbnail.
///
/// An inline SVG so that the placeholder never resolves to a broken link.
pub const IMAGE_PLACEHOLDER: &str = "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' width='96' height='64'><rect width='96' height='64' fill='%23ddd'/></svg>";

/// Map each selected record to a [`RenderRow`], preserving order.
pub fn render(rows: &[&DocumentRecord]) -> Vec<RenderRow> {
    rows.iter().map(|r| render_row(r)).collect()
}

fn render_row(record: &DocumentRecord) -> RenderRow {
    let title = record.title_str().to_string();

    let display_text = if record.author.is_empty() {
        title.clone()
    } else {
        format!("{} by {}", title, record.author)
    };

    RenderRow {
        source_url: record.source_url.clone(),
        image_url: non_empty_or(&record.image_url, IMAGE_PLACEHOLDER),
        local_ref: record.local_ref.clone(),
        title,
        description: non_empty_or(&record.description, DESCRIPTION_PLACEHOLDER),
        display_text,
    }
}

fn non_empty_or(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}
