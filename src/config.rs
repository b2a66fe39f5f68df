//! TOML configuration for the `clip` CLI.
//!
//! ```toml
//! [vault]
//! root = "/home/me/Notes"
//! collection = "WebClips"
//!
//! [display]
//! max_results = 200
//! format = "plain"
//! ```

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

use clipshelf_core::DEFAULT_MAX_RESULTS;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub vault: VaultConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VaultConfig {
    pub root: PathBuf,
    #[serde(default = "default_collection")]
    pub collection: String,
    #[serde(default = "default_include_globs")]
    pub include_globs: Vec<String>,
    #[serde(default)]
    pub exclude_globs: Vec<String>,
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Use the file name as the title when frontmatter has none.
    #[serde(default)]
    pub title_from_filename: bool,
}

fn default_collection() -> String {
    "WebClips".to_string()
}

fn default_include_globs() -> Vec<String> {
    vec!["**/*.md".to_string()]
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            format: OutputFormat::default(),
        }
    }
}

fn default_max_results() -> usize {
    DEFAULT_MAX_RESULTS
}

/// How rendered rows are written to stdout.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Numbered terminal list.
    #[default]
    Plain,
    /// `- [[local_ref|title]]` bullets, ready to paste into a note.
    Markdown,
    /// JSON array of rows.
    Json,
    /// An HTML `<ul>` fragment.
    Html,
}

impl Config {
    /// Directory holding the configured collection.
    pub fn collection_dir(&self) -> PathBuf {
        self.vault.root.join(&self.vault.collection)
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config = parse_config(&content)?;
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    if config.vault.collection.trim().is_empty() {
        anyhow::bail!("vault.collection must not be empty");
    }

    let escapes_root = Path::new(&config.vault.collection)
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)));
    if escapes_root {
        anyhow::bail!(
            "vault.collection must be a folder inside the vault: '{}'",
            config.vault.collection
        );
    }

    if config.vault.include_globs.is_empty() {
        anyhow::bail!("vault.include_globs must contain at least one pattern");
    }

    if config.display.max_results < 1 {
        anyhow::bail!("display.max_results must be >= 1");
    }

    Ok(config)
}
