//! CLI frontends for the engine: a one-shot search and a live browse
//! session driven by stdin.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

use clipshelf_core::{Controller, DisplaySink, DocumentSource, Engine, EngineOptions, HostEvent};

use crate::config::{Config, OutputFormat};
use crate::connector_fs::FilesystemSource;
use crate::output::WriterSink;

/// Run a single pass for `query` and print the rows.
pub fn run_search(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    format: Option<OutputFormat>,
) -> Result<()> {
    let source = FilesystemSource::from_config(config)?;
    let sink = WriterSink::new(io::stdout().lock(), format.unwrap_or(config.display.format));
    let options = engine_options(config, limit)?;

    let mut controller = Controller::new(Engine::new(source, sink, options));
    let shown = controller.set_query(query)?;
    info!(query, shown, "search complete");
    Ok(())
}

/// Run an interactive session: one pass on mount, then one pass per line
/// read from stdin, until EOF.
pub fn run_browse(config: &Config, limit: Option<usize>, format: Option<OutputFormat>) -> Result<()> {
    let source = FilesystemSource::from_config(config)?;
    let interactive = atty::is(atty::Stream::Stdin) && atty::is(atty::Stream::Stdout);
    let sink = WriterSink::new(io::stdout().lock(), format.unwrap_or(config.display.format))
        .clearing(interactive);
    let options = engine_options(config, limit)?;

    let prompt = if interactive {
        Some(format!("{}> ", config.vault.collection))
    } else {
        None
    };

    let stdin = io::stdin();
    let summary = browse(
        Controller::new(Engine::new(source, sink, options)),
        stdin.lock(),
        prompt.as_deref(),
        &mut io::stderr(),
    )?;
    debug!(passes = summary.passes, failed = summary.failed, "browse session ended");
    Ok(())
}

/// Counters for a finished browse session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowseSummary {
    pub passes: usize,
    pub failed: usize,
}

/// Drive `controller` from line-oriented input.
///
/// Each line is one query-changed event carrying the line's literal text;
/// only the line terminator is removed. A failed pass is counted and the
/// session continues with the previous output left on screen. When `prompt`
/// is set it is written to `prompt_out` before every read.
pub fn browse<S, K, R, P>(
    mut controller: Controller<S, K>,
    mut input: R,
    prompt: Option<&str>,
    prompt_out: &mut P,
) -> Result<BrowseSummary>
where
    S: DocumentSource,
    K: DisplaySink,
    R: BufRead,
    P: Write,
{
    let mut summary = BrowseSummary::default();
    let mut event = HostEvent::Mount;

    loop {
        summary.passes += 1;
        if controller.handle(event).is_err() {
            summary.failed += 1;
        }

        // The typed line replaces the whole query, so the old one is not echoed.
        if let Some(prompt) = prompt {
            write!(prompt_out, "\n{}", prompt).ok();
            prompt_out.flush().ok();
        }

        let mut line = String::new();
        let read = input
            .read_line(&mut line)
            .context("Failed to read query input")?;
        if read == 0 {
            break;
        }
        event = HostEvent::QueryChanged(strip_line_ending(line));
    }

    Ok(summary)
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

fn engine_options(config: &Config, limit: Option<usize>) -> Result<EngineOptions> {
    let max_results = limit.unwrap_or(config.display.max_results);
    if max_results < 1 {
        anyhow::bail!("--limit must be >= 1");
    }
    Ok(EngineOptions { max_results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use clipshelf_core::{CollectingSink, DocumentRecord, InMemorySource};
    use std::io::Cursor;

    fn doc(title: &str, description: &str, mtime: i64) -> DocumentRecord {
        DocumentRecord {
            title: Some(title.to_string()),
            description: description.to_string(),
            local_ref: format!("WebClips/{}", title),
            last_modified: Some(Utc.timestamp_opt(mtime, 0).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("fox\n".into()), "fox");
        assert_eq!(strip_line_ending("fox\r\n".into()), "fox");
        assert_eq!(strip_line_ending(" fox \n".into()), " fox ");
        assert_eq!(strip_line_ending("fox".into()), "fox");
    }

    #[test]
    fn test_browse_runs_mount_then_one_pass_per_line() {
        let source = InMemorySource::new(
            "WebClips",
            vec![doc("Alpha", "fox", 10), doc("Beta", "dog", 20)],
        );
        let mut sink = CollectingSink::new();
        let controller = Controller::new(Engine::new(&source, &mut sink, EngineOptions::default()));

        let summary = browse(controller, Cursor::new("o\nfox\n"), None, &mut io::sink()).unwrap();
        assert_eq!(summary, BrowseSummary { passes: 3, failed: 0 });
        assert_eq!(sink.replacements(), 3);
        assert_eq!(sink.rows().len(), 1);
        assert_eq!(sink.rows()[0].title, "Alpha");
    }

    #[test]
    fn test_browse_empty_input_only_mounts() {
        let source = InMemorySource::new("WebClips", vec![doc("Alpha", "fox", 10)]);
        let mut sink = CollectingSink::new();
        let controller = Controller::new(Engine::new(&source, &mut sink, EngineOptions::default()));

        let summary = browse(controller, Cursor::new(""), None, &mut io::sink()).unwrap();
        assert_eq!(summary.passes, 1);
        assert_eq!(sink.rows().len(), 1);
    }

    #[test]
    fn test_browse_survives_failed_pass() {
        let source = InMemorySource::new("WebClips", Vec::new());
        source.set_unavailable();
        let mut sink = CollectingSink::new();
        let controller = Controller::new(Engine::new(&source, &mut sink, EngineOptions::default()));

        let summary = browse(controller, Cursor::new("a\nb\n"), None, &mut io::sink()).unwrap();
        assert_eq!(summary, BrowseSummary { passes: 3, failed: 3 });
        assert_eq!(sink.replacements(), 0);
    }

    #[test]
    fn test_prompt_does_not_echo_previous_query() {
        let source = InMemorySource::new("WebClips", vec![doc("Alpha", "fox", 10)]);
        let mut sink = CollectingSink::new();
        let controller = Controller::new(Engine::new(&source, &mut sink, EngineOptions::default()));

        let mut prompts = Vec::new();
        let summary = browse(
            controller,
            Cursor::new("fox\nAl\n"),
            Some("WebClips> "),
            &mut prompts,
        )
        .unwrap();
        assert_eq!(summary.passes, 3);
        assert_eq!(
            String::from_utf8(prompts).unwrap(),
            "\nWebClips> \nWebClips> \nWebClips> "
        );
    }

    #[test]
    fn test_engine_options_limit_override() {
        let cfg = crate::config::parse_config("[vault]\nroot = \".\"\n").unwrap();
        assert_eq!(engine_options(&cfg, None).unwrap().max_results, 200);
        assert_eq!(engine_options(&cfg, Some(5)).unwrap().max_results, 5);
        assert!(engine_options(&cfg, Some(0)).is_err());
    }
}
