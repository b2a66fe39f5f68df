//! Display sinks that write rendered rows to a stream.
//!
//! Each pass writes the complete row list. When the sink owns a terminal it
//! clears the screen first, so the new list replaces the old one.

use anyhow::Result;
use std::io::Write;

use clipshelf_core::{DisplaySink, RenderRow};

use crate::config::OutputFormat;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Writes every pass to `out` in the configured [`OutputFormat`].
pub struct WriterSink<W: Write> {
    out: W,
    format: OutputFormat,
    clear_screen: bool,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            clear_screen: false,
        }
    }

    /// Clear the terminal before each pass.
    pub fn clearing(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplaySink for WriterSink<W> {
    fn replace(&mut self, rows: &[RenderRow]) -> Result<()> {
        // Format fully before writing so a formatting error never leaves a
        // half-drawn list.
        let text = format_rows(rows, self.format)?;
        if self.clear_screen {
            self.out.write_all(CLEAR_SCREEN.as_bytes())?;
        }
        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

pub fn format_rows(rows: &[RenderRow], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Plain => format_plain(rows),
        OutputFormat::Markdown => format_markdown(rows),
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(rows)?),
        OutputFormat::Html => format_html(rows),
    })
}

fn format_plain(rows: &[RenderRow]) -> String {
    let width = rows.len().to_string().len();
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        out.push_str(&format!("{:>width$}. {}\n", i + 1, row.display_text, width = width));
        let indent = " ".repeat(width + 2);
        out.push_str(&format!("{}{}\n", indent, row.description));
        if !row.source_url.is_empty() {
            out.push_str(&format!("{}source: {}\n", indent, row.source_url));
        }
        out.push_str(&format!("{}local:  {}\n", indent, row.local_ref));
    }
    out
}

fn format_markdown(rows: &[RenderRow]) -> String {
    let mut out = String::new();
    for row in rows {
        let label = row.title.replace(['|', '[', ']'], " ");
        out.push_str(&format!("- [[{}|{}]]", row.local_ref, label.trim()));
        if !row.source_url.is_empty() {
            out.push_str(&format!(" ([source]({}))", row.source_url));
        }
        out.push('\n');
        out.push_str(&format!("  {}\n", row.description));
    }
    out
}

fn format_html(rows: &[RenderRow]) -> String {
    let mut out = String::from("<ul class=\"clipshelf\">\n");
    for row in rows {
        out.push_str("  <li class=\"clip\">\n");
        let img = format!(
            "<img src=\"{}\" alt=\"\" loading=\"lazy\">",
            escape_html(&row.image_url)
        );
        if row.source_url.is_empty() {
            out.push_str(&format!("    <span class=\"clip-image\">{}</span>\n", img));
        } else {
            out.push_str(&format!(
                "    <a class=\"clip-image external-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>\n",
                escape_html(&row.source_url),
                img,
            ));
        }
        out.push_str(&format!(
            "    <div class=\"clip-text\"><a class=\"internal-link\" href=\"{}\">{}</a><p>{}</p></div>\n",
            escape_html(&row.local_ref),
            escape_html(&row.display_text),
            escape_html(&row.description),
        ));
        out.push_str("  </li>\n");
    }
    out.push_str("</ul>\n");
    out
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str) -> RenderRow {
        RenderRow {
            source_url: format!("https://example.com/{}", title),
            image_url: "https://example.com/t.png".to_string(),
            local_ref: format!("WebClips/{}", title),
            title: title.to_string(),
            description: "...".to_string(),
            display_text: title.to_string(),
        }
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(format_rows(&[], OutputFormat::Plain).unwrap(), "");
        assert_eq!(format_rows(&[], OutputFormat::Markdown).unwrap(), "");
        assert_eq!(format_rows(&[], OutputFormat::Json).unwrap(), "[]\n");
        assert_eq!(
            format_rows(&[], OutputFormat::Html).unwrap(),
            "<ul class=\"clipshelf\">\n</ul>\n"
        );
    }

    #[test]
    fn test_plain_lists_in_order() {
        let text = format_rows(&[row("Beta"), row("Alpha")], OutputFormat::Plain).unwrap();
        let beta = text.find("1. Beta").unwrap();
        let alpha = text.find("2. Alpha").unwrap();
        assert!(beta < alpha);
        assert!(text.contains("source: https://example.com/Beta"));
        assert!(text.contains("local:  WebClips/Alpha"));
    }

    #[test]
    fn test_markdown_wiki_links() {
        let mut r = row("A|B");
        r.source_url.clear();
        let text = format_rows(&[r], OutputFormat::Markdown).unwrap();
        assert_eq!(text, "- [[WebClips/A|B|A B]]\n  ...\n");
    }

    #[test]
    fn test_json_shape() {
        let text = format_rows(&[row("Alpha")], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["local_ref"], "WebClips/Alpha");
        assert_eq!(value[0]["display_text"], "Alpha");
        assert_eq!(value[0]["description"], "...");
    }

    #[test]
    fn test_html_escapes_and_links() {
        let mut r = row("Tom & <Jerry>");
        r.display_text = "Tom & <Jerry>".to_string();
        let html = format_rows(&[r], OutputFormat::Html).unwrap();
        assert!(html.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(html.contains("href=\"https://example.com/Tom &amp; &lt;Jerry&gt;\""));
        assert!(html.contains("<img src=\"https://example.com/t.png\""));
        assert!(!html.contains("<Jerry>"));
    }

    #[test]
    fn test_html_image_without_source_has_no_link() {
        let mut r = row("Local");
        r.source_url.clear();
        let html = format_rows(&[r], OutputFormat::Html).unwrap();
        assert!(html.contains("<span class=\"clip-image\"><img src=\"https://example.com/t.png\""));
        assert!(!html.contains("href=\"\""));
        assert!(!html.contains("external-link"));
        assert!(html.contains("href=\"WebClips/Local\""));
    }

    #[test]
    fn test_writer_sink_replaces_whole_output() {
        let mut sink = WriterSink::new(Vec::new(), OutputFormat::Plain).clearing(true);
        sink.replace(&[row("Alpha")]).unwrap();
        sink.replace(&[]).unwrap();
        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written.matches(CLEAR_SCREEN).count(), 2);
        assert!(written.ends_with(CLEAR_SCREEN));
    }
}
