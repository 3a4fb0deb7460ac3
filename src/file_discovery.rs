use crate::config::Config;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Finds every file under `root` whose extension is in `extensions`
/// (compared case-insensitively, without the leading dot).
///
/// Traversal errors are returned, not skipped: an unreadable directory is an
/// environment problem rather than a bad document.
pub fn locate(root: &Path, extensions: &[String]) -> crate::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in walk(root) {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !is_file_like(&entry) {
            continue;
        }

        if let Some(ext) = lowercase_extension(entry.path()) {
            if extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(&ext)) {
                files.push(entry.into_path());
            }
        }
    }

    debug!("Located {} matching files under {}", files.len(), root.display());
    Ok(files)
}

/// Tallies YAML and JSON documents under `root`. An extension in both sets
/// counts as YAML.
pub fn count_by_extension(
    root: &Path,
    yaml_extensions: &[String],
    json_extension: &str,
) -> crate::Result<ExtensionCounts> {
    let mut counts = ExtensionCounts::default();

    for entry in walk(root) {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !is_file_like(&entry) {
            continue;
        }

        let Some(ext) = lowercase_extension(entry.path()) else {
            continue;
        };
        if yaml_extensions.iter().any(|y| y.eq_ignore_ascii_case(&ext)) {
            counts.yaml += 1;
        } else if json_extension.eq_ignore_ascii_case(&ext) {
            counts.json += 1;
        }
    }

    Ok(counts)
}

fn walk(root: &Path) -> walkdir::IntoIter {
    WalkDir::new(root).sort_by_file_name().into_iter()
}

// Symlinks to files count as files; symlinks to directories are not followed.
fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && !entry.path().is_dir())
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

pub struct FileDiscovery {
    config: Config,
}

impl FileDiscovery {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn discover_files(&self) -> crate::Result<Vec<PathBuf>> {
        locate(&self.config.root_directory, &self.config.yaml_extensions)
    }

    pub fn count_files(&self) -> crate::Result<ExtensionCounts> {
        count_by_extension(
            &self.config.root_directory,
            &self.config.yaml_extensions,
            &self.config.json_extension,
        )
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionCounts {
    pub yaml: usize,
    pub json: usize,
}

impl ExtensionCounts {
    pub fn print_summary(&self) {
        println!("YAML files: {}", self.yaml);
        println!("JSON files: {}", self.json);
    }
}
