/*!
 * Content combiner: concatenates the selected files into one document
 */

use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info, warn};

use crate::classify::classify;
use crate::error::{MergeFsError, Result};
use crate::minify::minify;
use crate::registry::Registry;
use crate::types::{CombineOptions, CombinedDocument, FileEntry};
use crate::utils::FENCE;

/// Builds a combined document from the registry's selection
pub struct Combiner {
    /// Combine options
    options: CombineOptions,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Combiner {
    /// Create a new combiner
    pub fn new(options: CombineOptions, progress: Arc<ProgressBar>) -> Self {
        Self { options, progress }
    }

    /// Combine every selected file, in ascending index order
    ///
    /// Files are read one after another. A failed read puts an inline error
    /// marker in place of that file's content and the run carries on.
    pub async fn combine(&self, registry: &Registry) -> Result<CombinedDocument> {
        let indices: Vec<usize> = registry.selected().collect();
        if indices.is_empty() {
            return Err(MergeFsError::EmptySelection);
        }

        self.progress.set_length(indices.len() as u64);
        info!(
            files = indices.len(),
            code_blocks = self.options.use_code_blocks,
            minify = self.options.minify,
            "Combining selected files"
        );

        let mut document = CombinedDocument::default();
        for index in indices {
            let Some(entry) = registry.get(index) else {
                continue;
            };
            let path = entry.display_path();
            self.progress.set_message(format!("Current file: {}", path));

            match self.read_entry(entry, &path).await {
                Ok(content) => self.push_file(&mut document.text, entry, &path, &content),
                Err(e) => {
                    warn!(path = %path, error = %e, "Failed to read file");
                    let message = match e {
                        MergeFsError::FileRead { message, .. } => message,
                        other => other.to_string(),
                    };
                    self.push_error(&mut document.text, &path, &message);
                    document.failures.push(path);
                }
            }

            document.files_combined += 1;
            self.progress.inc(1);
        }

        debug!(
            chars = document.text.len(),
            failures = document.failures.len(),
            "Combine finished"
        );
        Ok(document)
    }

    /// Read one file and minify it when requested and code-like
    async fn read_entry(&self, entry: &FileEntry, path: &str) -> Result<String> {
        let content = entry
            .source
            .read_text()
            .await
            .map_err(|e| MergeFsError::FileRead {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        if self.options.minify && classify(&entry.name).is_code {
            return Ok(minify(&content));
        }
        Ok(content)
    }

    fn push_file(&self, out: &mut String, entry: &FileEntry, path: &str, content: &str) {
        if self.options.use_code_blocks {
            let language = classify(&entry.name).language;
            out.push_str(&format!(
                "{path} - \n{FENCE}{language}\n// {path}\n\n{content}\n{FENCE}\n\n"
            ));
        } else {
            out.push_str(&format!("{path} - \n// {path}\n\n{content}\n\n"));
        }
    }

    fn push_error(&self, out: &mut String, path: &str, message: &str) {
        if self.options.use_code_blocks {
            out.push_str(&format!(
                "{path} - \n{FENCE}\n// Error reading file: {message}\n{FENCE}\n\n"
            ));
        } else {
            out.push_str(&format!("{path} - \n// Error reading file: {message}\n\n"));
        }
    }
}

/// Combine without progress reporting
pub async fn combine(registry: &Registry, options: CombineOptions) -> Result<CombinedDocument> {
    Combiner::new(options, Arc::new(ProgressBar::hidden()))
        .combine(registry)
        .await
}
