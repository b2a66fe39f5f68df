use anyhow::Result;

use clipshelf_core::{is_eligible, DocumentSource};

use crate::config::Config;
use crate::connector_fs::FilesystemSource;

/// Health of the configured collection, as shown by `clip sources`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceStatus {
    pub collection: String,
    pub path: String,
    pub status: String,
    pub healthy: bool,
    pub notes: usize,
    pub eligible: usize,
}

pub fn get_sources(config: &Config) -> Result<SourceStatus> {
    let source = FilesystemSource::from_config(config)?;
    let path = source.collection_dir().display().to_string();

    let status = match source.snapshot() {
        Ok(records) => SourceStatus {
            collection: config.vault.collection.clone(),
            path,
            status: "OK".to_string(),
            healthy: true,
            notes: records.len(),
            eligible: records.iter().filter(|r| is_eligible(r)).count(),
        },
        Err(e) => SourceStatus {
            collection: config.vault.collection.clone(),
            path,
            status: format!("UNAVAILABLE ({})", e),
            healthy: false,
            notes: 0,
            eligible: 0,
        },
    };
    Ok(status)
}

pub fn list_sources(config: &Config) -> Result<()> {
    let s = get_sources(config)?;

    println!(
        "{:<16} {:<8} {:>6} {:>8}  PATH",
        "COLLECTION", "HEALTHY", "NOTES", "TITLED"
    );
    println!(
        "{:<16} {:<8} {:>6} {:>8}  {}",
        s.collection, s.healthy, s.notes, s.eligible, s.path
    );
    if !s.healthy {
        println!("status: {}", s.status);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use std::fs;
    use tempfile::TempDir;

    fn config(root: &std::path::Path) -> Config {
        parse_config(&format!("[vault]\nroot = \"{}\"\n", root.display())).unwrap()
    }

    #[test]
    fn test_healthy_collection_counts_titled_notes() {
        let tmp = TempDir::new().unwrap();
        let clips = tmp.path().join("WebClips");
        fs::create_dir_all(&clips).unwrap();
        fs::write(clips.join("a.md"), "---\ntitle: A\n---\n").unwrap();
        fs::write(clips.join("b.md"), "no frontmatter").unwrap();

        let s = get_sources(&config(tmp.path())).unwrap();
        assert!(s.healthy);
        assert_eq!(s.status, "OK");
        assert_eq!(s.notes, 2);
        assert_eq!(s.eligible, 1);
    }

    #[test]
    fn test_missing_collection_is_unhealthy() {
        let tmp = TempDir::new().unwrap();
        let s = get_sources(&config(tmp.path())).unwrap();
        assert!(!s.healthy);
        assert!(s.status.starts_with("UNAVAILABLE"));
    }
}
