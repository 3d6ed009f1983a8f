/*!
 * Folder scanning: the file-access layer that feeds the registry
 */

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use glob_match::glob_match;
use ignore::WalkBuilder;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::source::{DiskSource, RawFile};
use crate::utils::DEFAULT_IGNORE;

/// Walks a folder and yields raw file handles
pub struct Scanner {
    /// Scanner configuration
    config: Config,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Walk the target folder
    ///
    /// Relative paths start with the folder's own name and use `/`, and the
    /// result is sorted by relative path. Zero-size files are kept.
    pub fn scan(&self) -> io::Result<Vec<RawFile>> {
        let root = fs::canonicalize(&self.config.target_dir)?;
        let root_name = root
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let paths: Vec<PathBuf> = if self.config.respect_gitignore {
            let mut walker = WalkBuilder::new(&root);
            walker.hidden(false).require_git(false);
            if let Some(gitignore_path) = &self.config.gitignore_path {
                if let Some(e) = walker.add_ignore(gitignore_path) {
                    warn!(
                        path = %gitignore_path.display(),
                        error = %e,
                        "Failed to parse custom ignore file"
                    );
                }
            }
            walker
                .filter_entry(|e| e.depth() == 0 || !is_default_ignored(e.path()))
                .build()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!(error = %e, "Skipping unreadable entry");
                        None
                    }
                })
                .filter(|e| e.file_type().map_or(false, |ft| ft.is_file()))
                .map(|e| e.into_path())
                .collect()
        } else {
            WalkDir::new(&root)
                .min_depth(1)
                .into_iter()
                .filter_entry(|e| e.depth() == 0 || !is_default_ignored(e.path()))
                .filter_map(Result::ok)
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .collect()
        };

        // Don't pick up an earlier export
        let output = fs::canonicalize(&self.config.output_file).ok();

        let mut files: Vec<RawFile> = paths
            .into_iter()
            .filter(|path| output.as_deref() != Some(path.as_path()))
            .filter(|path| !self.should_ignore(path) && self.should_include(path))
            .filter_map(|path| self.raw_file(&root, &root_name, &path))
            .collect();
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        debug!(root = %root.display(), files = files.len(), "Scan finished");
        Ok(files)
    }

    fn raw_file(&self, root: &Path, root_name: &str, path: &Path) -> Option<RawFile> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read metadata");
                return None;
            }
        };

        let rel = path.strip_prefix(root).unwrap_or(path);
        let mut relative_path = root_name.to_string();
        for component in rel.components() {
            relative_path.push('/');
            relative_path.push_str(&component.as_os_str().to_string_lossy());
        }

        Some(RawFile {
            name: path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string(),
            relative_path: Some(relative_path),
            size: metadata.len(),
            source: Arc::new(DiskSource::new(path)),
        })
    }

    /// Check if a file should be ignored based on patterns
    pub fn should_ignore(&self, path: &Path) -> bool {
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        self.config
            .ignore_patterns
            .iter()
            .any(|pattern| glob_match(pattern, &file_name))
    }

    /// Check if a file should be included based on patterns
    pub fn should_include(&self, path: &Path) -> bool {
        if self.config.include_patterns.is_empty() {
            return true;
        }

        let file_name = path.file_name().unwrap_or_default().to_string_lossy();
        self.config
            .include_patterns
            .iter()
            .any(|pattern| glob_match(pattern, &file_name))
    }
}

fn is_default_ignored(path: &Path) -> bool {
    let name = path.file_name().unwrap_or_default().to_string_lossy();
    DEFAULT_IGNORE.iter().any(|&p| p == name)
}
