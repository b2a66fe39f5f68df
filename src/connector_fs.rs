//! Filesystem document source: one folder of a Markdown vault.
//!
//! Every matching note under `<vault.root>/<vault.collection>` becomes a
//! [`DocumentRecord`]. Metadata comes from the note's frontmatter or the
//! header at the top of its body, the ordering key from the file's
//! modification time, and the local link from its vault-relative path
//! without the `.md` extension, so that
//! `WebClips/20240101120000-Title.md` links as `WebClips/20240101120000-Title`.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use clipshelf_core::{DocumentRecord, DocumentSource};

use crate::config::Config;
use crate::frontmatter::{parse_clip_meta, ClipMeta};

/// Reads a fresh snapshot of the collection folder on every call.
pub struct FilesystemSource {
    root: PathBuf,
    collection: String,
    include_set: GlobSet,
    exclude_set: GlobSet,
    follow_symlinks: bool,
    title_from_filename: bool,
}

impl FilesystemSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        let vault = &config.vault;

        let include_set = build_globset(&vault.include_globs)?;

        let mut default_excludes = vec![
            "**/.git/**".to_string(),
            "**/.obsidian/**".to_string(),
            "**/.trash/**".to_string(),
        ];
        default_excludes.extend(vault.exclude_globs.clone());
        let exclude_set = build_globset(&default_excludes)?;

        Ok(Self {
            root: vault.root.clone(),
            collection: vault.collection.clone(),
            include_set,
            exclude_set,
            follow_symlinks: vault.follow_symlinks,
            title_from_filename: vault.title_from_filename,
        })
    }

    /// Directory the collection lives in.
    pub fn collection_dir(&self) -> PathBuf {
        self.root.join(&self.collection)
    }

    fn read_record(&self, path: &Path) -> DocumentRecord {
        let last_modified = std::fs::metadata(path)
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from)
            .ok();

        let meta = match std::fs::read_to_string(path) {
            Ok(content) => parse_clip_meta(&content).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %format!("{:#}", e), "ignoring frontmatter");
                ClipMeta::default()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable note");
                ClipMeta::default()
            }
        };

        let title = meta.title.or_else(|| {
            if self.title_from_filename {
                path.file_stem()
                    .map(|s| title_from_stem(&s.to_string_lossy()))
                    .filter(|t| !t.is_empty())
            } else {
                None
            }
        });

        DocumentRecord {
            title,
            author: meta.author,
            description: meta.description,
            source_url: meta.source_url,
            image_url: meta.image_url,
            local_ref: local_ref(&self.root, path),
            last_modified,
        }
    }
}

impl DocumentSource for FilesystemSource {
    fn collection(&self) -> &str {
        &self.collection
    }

    fn snapshot(&self) -> Result<Vec<DocumentRecord>> {
        let dir = self.collection_dir();
        if !dir.is_dir() {
            bail!("Collection folder does not exist: {}", dir.display());
        }

        let mut records = Vec::new();

        let walker = WalkDir::new(&dir).follow_links(self.follow_symlinks);
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(e).with_context(|| format!("Failed to read {}", dir.display()));
                }
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = path.strip_prefix(&dir).unwrap_or(path);
            let rel_str = relative.to_string_lossy().to_string();

            if self.exclude_set.is_match(&rel_str) {
                continue;
            }

            if !self.include_set.is_match(&rel_str) {
                continue;
            }

            records.push(self.read_record(path));
        }

        // Deterministic order for records sharing a modification time.
        records.sort_by(|a, b| a.local_ref.cmp(&b.local_ref));

        debug!(collection = %self.collection, records = records.len(), "snapshot");
        Ok(records)
    }
}

/// Vault-relative, `/`-separated path without the `.md` extension.
fn local_ref(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let relative = if relative.extension().is_some_and(|e| e == "md") {
        relative.with_extension("")
    } else {
        relative.to_path_buf()
    };
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `20240101120000-Some Title` → `Some Title`; other stems unchanged.
fn title_from_stem(stem: &str) -> String {
    match stem.split_once('-') {
        Some((stamp, rest)) if stamp.len() == 14 && stamp.bytes().all(|b| b.is_ascii_digit()) => {
            rest.trim().to_string()
        }
        _ => stem.trim().to_string(),
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern).with_context(|| format!("Invalid glob: {}", pattern))?);
    }
    Ok(builder.build()?)
}
