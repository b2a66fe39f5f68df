//! YAML frontmatter of clipped notes.
//!
//! Clippers write a block like:
//!
//! ```yaml
//! ---
//! title: "How the borrow checker works"
//! source: "https://example.com/borrowck"
//! author:
//!   - "[[Jane Doe]]"
//! description: "A walkthrough of NLL"
//! image: "https://example.com/cover.png"
//! ---
//! ```
//!
//! Values are read leniently: scalars of any YAML type become text, lists
//! are joined with `", "`, and `[[wiki links]]` are reduced to their label.
//!
//! Clips saved by the chat bot carry no frontmatter. Their header sits at
//! the top of the body instead:
//!
//! ```markdown
//! # Page title
//!
//! - **Source:** <https://example.com/page>
//! - **Saved at:** 2024-01-01 12:00:00
//! ```
//!
//! Fields missing from the frontmatter are filled from that header: the
//! first `# ` heading gives the title, a `Source` or `URL` item the link to
//! the original page, and a `Channel` or `Author` item the author.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_yaml::Value;

/// Fields of interest from a clip's frontmatter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipMeta {
    pub title: Option<String>,
    pub author: String,
    pub description: String,
    pub source_url: String,
    pub image_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct RawFrontmatter {
    #[serde(default)]
    title: Option<Value>,
    #[serde(default, alias = "authors")]
    author: Option<Value>,
    #[serde(default)]
    description: Option<Value>,
    #[serde(default, alias = "url")]
    source: Option<Value>,
    #[serde(default, alias = "thumbnail", alias = "cover")]
    image: Option<Value>,
}

/// Split a note into its raw frontmatter block and body.
///
/// Returns `None` when the note does not open with a `---` delimiter or
/// the block is never closed.
pub fn split_frontmatter(content: &str) -> Option<(String, String)> {
    let normalized = content.trim_start_matches('\u{feff}').replace("\r\n", "\n");
    let mut lines = normalized.lines();

    if lines.next()?.trim() != "---" {
        return None;
    }

    let mut block = Vec::new();
    for line in lines.by_ref() {
        if line.trim() == "---" {
            let body = lines.collect::<Vec<_>>().join("\n");
            return Some((block.join("\n"), body));
        }
        block.push(line);
    }
    None
}

/// Parse clip metadata from a note: frontmatter first, then the body
/// header for whatever the frontmatter left empty. Malformed YAML is an
/// error.
pub fn parse_clip_meta(content: &str) -> Result<ClipMeta> {
    let (mut meta, body) = match split_frontmatter(content) {
        Some((block, body)) => (parse_block(&block)?, body),
        None => (
            ClipMeta::default(),
            content.trim_start_matches('\u{feff}').replace("\r\n", "\n"),
        ),
    };
    fill_from_body(&mut meta, &body);
    Ok(meta)
}

fn parse_block(block: &str) -> Result<ClipMeta> {
    if block.trim().is_empty() {
        return Ok(ClipMeta::default());
    }

    let raw: RawFrontmatter =
        serde_yaml::from_str(block).context("Invalid YAML in frontmatter")?;

    Ok(ClipMeta {
        title: raw.title.as_ref().map(value_to_text).filter(|t| !t.is_empty()),
        author: raw.author.as_ref().map(value_to_text).unwrap_or_default(),
        description: raw.description.as_ref().map(value_to_text).unwrap_or_default(),
        source_url: raw.source.as_ref().map(value_to_text).unwrap_or_default(),
        image_url: raw.image.as_ref().map(value_to_text).unwrap_or_default(),
    })
}

/// Read the header at the top of the body: blank lines, one `# ` heading and
/// `- **Key:** value` items. Stops at the first line of anything else.
fn fill_from_body(meta: &mut ClipMeta, body: &str) {
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(heading) = line.strip_prefix("# ") {
            let heading = heading.trim();
            if meta.title.is_none() && !heading.is_empty() {
                meta.title = Some(heading.to_string());
            }
            continue;
        }
        let Some((key, value)) = header_item(line) else {
            break;
        };
        if value.is_empty() {
            continue;
        }
        let slot = match key.to_ascii_lowercase().as_str() {
            "source" | "url" => &mut meta.source_url,
            "channel" | "author" => &mut meta.author,
            _ => continue,
        };
        if slot.is_empty() {
            *slot = strip_wiki_link(value).to_string();
        }
    }
}

/// `- **Source:** <url>` and `- **URL**: url` → `("Source", "url")`.
fn header_item(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix("- **")?;
    let (key, value) = rest.split_once("**")?;
    let key = key.trim().trim_end_matches(':').trim();
    let value = value.trim_start().trim_start_matches(':').trim();
    let value = value
        .strip_prefix('<')
        .and_then(|v| v.strip_suffix('>'))
        .unwrap_or(value);
    Some((key, value.trim()))
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => strip_wiki_link(s.trim()).to_string(),
        Value::Sequence(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Mapping(_) => String::new(),
        Value::Tagged(tagged) => value_to_text(&tagged.value),
    }
}

/// `[[Page]]` → `Page`, `[[Page|Label]]` → `Label`; other text unchanged.
fn strip_wiki_link(s: &str) -> &str {
    match s.strip_prefix("[[").and_then(|s| s.strip_suffix("]]")) {
        Some(inner) => inner.rsplit('|').next().unwrap_or(inner).trim(),
        None => s,
    }
}
