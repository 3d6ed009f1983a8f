/*!
 * File registry: the loaded files and the current selection
 */

use std::collections::BTreeSet;

use glob_match::glob_match;
use tracing::debug;

use crate::classify::{extension_of, is_code_file};
use crate::source::RawFile;
use crate::types::{FileEntry, SelectionStats};

/// Loaded files plus the set of selected indices
///
/// Every selected index is valid for `files`; loading or clearing replaces
/// both together.
#[derive(Debug, Default, Clone)]
pub struct Registry {
    files: Vec<FileEntry>,
    selected: BTreeSet<usize>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from raw file handles, dropping zero-size entries
    pub fn load(raw_files: impl IntoIterator<Item = RawFile>) -> Self {
        let files: Vec<FileEntry> = raw_files
            .into_iter()
            .filter(|raw| raw.size > 0)
            .map(|raw| FileEntry {
                relative_path: raw.relative_path.unwrap_or_else(|| raw.name.clone()),
                name: raw.name,
                size: raw.size,
                source: raw.source,
            })
            .collect();

        debug!(files = files.len(), "Registry loaded");

        Self {
            files,
            selected: BTreeSet::new(),
        }
    }

    /// Drop all files and the selection
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Loaded files in load order
    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    /// Number of loaded files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether no files are loaded
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// File at an index
    pub fn get(&self, index: usize) -> Option<&FileEntry> {
        self.files.get(index)
    }

    /// Selected indices in ascending order
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    /// Whether an index is selected
    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    /// Add or remove one index; out-of-range indices are ignored
    pub fn select_index(&mut self, index: usize, on: bool) {
        if index >= self.files.len() {
            return;
        }
        if on {
            self.selected.insert(index);
        } else {
            self.selected.remove(&index);
        }
    }

    /// Select every loaded file
    pub fn select_all(&mut self) {
        self.selected = (0..self.files.len()).collect();
    }

    /// Clear the selection
    pub fn select_none(&mut self) {
        self.selected.clear();
    }

    /// Replace the selection with every file matching the predicate
    pub fn select_by_predicate<P>(&mut self, pred: P)
    where
        P: Fn(&FileEntry) -> bool,
    {
        self.select_none();
        self.selected = self
            .files
            .iter()
            .enumerate()
            .filter(|(_, entry)| pred(entry))
            .map(|(index, _)| index)
            .collect();
    }

    /// Replace the selection with every code-like file
    pub fn select_code_files(&mut self) {
        self.select_by_predicate(|entry| is_code_file(&extension_of(&entry.name)));
    }

    /// Replace the selection with every file whose relative path matches a glob
    pub fn select_matching(&mut self, patterns: &[String]) {
        self.select_by_predicate(|entry| {
            patterns
                .iter()
                .any(|pattern| glob_match(pattern, &entry.relative_path))
        });
    }

    /// Totals over the registry and selection
    pub fn stats(&self) -> SelectionStats {
        SelectionStats {
            total: self.files.len(),
            selected_count: self.selected.len(),
            selected_bytes: self.selected.iter().map(|&i| self.files[i].size).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Registry {
        Registry::load(vec![
            RawFile::in_memory("app/src/main.rs", "fn main() {}"),
            RawFile::in_memory("app/empty", ""),
            RawFile::in_memory("app/README.txt", "hello"),
            RawFile::in_memory("app/style.css", "a{}"),
        ])
    }

    #[test]
    fn test_load_drops_zero_size() {
        let registry = sample();
        assert_eq!(registry.len(), 3);
        assert!(registry.files().iter().all(|f| f.size > 0));
        assert_eq!(registry.files()[1].relative_path, "app/README.txt");
    }

    #[test]
    fn test_load_falls_back_to_name() {
        let mut raw = RawFile::in_memory("notes.md", "# hi");
        raw.relative_path = None;
        let registry = Registry::load(vec![raw]);
        assert_eq!(registry.files()[0].relative_path, "notes.md");
    }

    #[test]
    fn test_select_index_bounds() {
        let mut registry = sample();
        registry.select_index(1, true);
        registry.select_index(99, true);
        assert_eq!(registry.selected().collect::<Vec<_>>(), vec![1]);
        registry.select_index(1, false);
        assert_eq!(registry.stats().selected_count, 0);
    }

    #[test]
    fn test_select_all_and_none() {
        let mut registry = sample();
        registry.select_all();
        assert_eq!(registry.selected().collect::<Vec<_>>(), vec![0, 1, 2]);
        registry.select_none();
        assert_eq!(registry.selected().count(), 0);
    }

    #[test]
    fn test_select_by_predicate_replaces() {
        let mut registry = sample();
        registry.select_by_predicate(|f| f.name.ends_with(".rs"));
        registry.select_by_predicate(|f| f.name.ends_with(".txt"));
        assert_eq!(registry.selected().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_select_code_files() {
        let mut registry = sample();
        registry.select_index(1, true);
        registry.select_code_files();
        assert_eq!(registry.selected().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_select_matching() {
        let mut registry = sample();
        registry.select_all();
        registry.select_matching(&["**/*.rs".to_string(), "app/*.css".to_string()]);
        assert_eq!(registry.selected().collect::<Vec<_>>(), vec![0, 2]);
    }

    #[test]
    fn test_stats() {
        let mut registry = sample();
        registry.select_index(0, true);
        registry.select_index(2, true);
        assert_eq!(
            registry.stats(),
            SelectionStats {
                total: 3,
                selected_count: 2,
                selected_bytes: 15,
            }
        );
    }

    #[test]
    fn test_clear() {
        let mut registry = sample();
        registry.select_all();
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.stats(), SelectionStats::default());
    }
}
