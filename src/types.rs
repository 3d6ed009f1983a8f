/*!
 * Core types and data structures for the MergeFS application
 */

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::source::ContentSource;
use crate::utils::strip_angle_brackets;

/// One loaded file: metadata plus a handle to its content
#[derive(Clone)]
pub struct FileEntry {
    /// Original file name
    pub name: String,
    /// Path within the loaded folder, or the name when unknown
    pub relative_path: String,
    /// Size in bytes
    pub size: u64,
    /// Handle able to yield the full text
    pub source: Arc<dyn ContentSource>,
}

impl FileEntry {
    /// Relative path with angle brackets stripped, safe for rendered output
    pub fn display_path(&self) -> String {
        strip_angle_brackets(&self.relative_path)
    }
}

impl fmt::Debug for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEntry")
            .field("name", &self.name)
            .field("relative_path", &self.relative_path)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Counters describing the registry and its selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SelectionStats {
    /// Number of loaded files
    pub total: usize,
    /// Number of selected files
    pub selected_count: usize,
    /// Sum of the sizes of the selected files
    pub selected_bytes: u64,
}

/// Options controlling how selected files are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombineOptions {
    /// Wrap every file in a fenced block tagged with its language
    pub use_code_blocks: bool,
    /// Run the minifier over code-like files
    pub minify: bool,
}

impl Default for CombineOptions {
    fn default() -> Self {
        Self {
            use_code_blocks: true,
            minify: false,
        }
    }
}

/// Result of one combine run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedDocument {
    /// Accumulated output text
    pub text: String,
    /// Number of files appended, failures included
    pub files_combined: usize,
    /// Sanitized paths of the files whose read failed
    pub failures: Vec<String>,
}

impl CombinedDocument {
    /// Whether the document holds no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
