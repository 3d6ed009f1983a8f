/*!
 * Session: the single owner of registry, options and output
 *
 * Front ends drive every operation through one `Session` value instead of
 * shared globals. Operations never overlap: each takes `&mut self`.
 */

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::info;

use crate::clipboard;
use crate::combiner::Combiner;
use crate::error::{MergeFsError, Result};
use crate::filter::{filter, FilterKind};
use crate::prompt::{custom_prompt, prepend, project_context, PromptTemplate};
use crate::registry::Registry;
use crate::source::RawFile;
use crate::types::{CombineOptions, CombinedDocument, FileEntry, SelectionStats};
use crate::utils::estimate_tokens;
use crate::writer::MarkdownWriter;

/// State of one interactive run
#[derive(Debug, Default)]
pub struct Session {
    registry: Registry,
    options: CombineOptions,
    document: Option<CombinedDocument>,
}

impl Session {
    /// Create an empty session with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty session with the given options
    pub fn with_options(options: CombineOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replace all loaded files; the selection starts empty
    pub fn load(&mut self, raw_files: impl IntoIterator<Item = RawFile>) {
        self.registry = Registry::load(raw_files);
        info!(files = self.registry.len(), "Loaded files");
    }

    /// The registry
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Mutable access to the registry for selection changes
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Current options
    pub fn options(&self) -> CombineOptions {
        self.options
    }

    /// Flip minification and return the new state
    pub fn toggle_minify(&mut self) -> bool {
        self.options.minify = !self.options.minify;
        self.options.minify
    }

    /// Turn fenced blocks on or off
    pub fn set_code_blocks(&mut self, on: bool) {
        self.options.use_code_blocks = on;
    }

    /// Indices visible under a filter
    pub fn visible(&self, kind: FilterKind) -> BTreeSet<usize> {
        filter(kind, self.registry.files())
    }

    /// Entries visible under a filter, with their indices
    pub fn visible_entries(&self, kind: FilterKind) -> Vec<(usize, &FileEntry)> {
        self.visible(kind)
            .into_iter()
            .filter_map(|i| self.registry.get(i).map(|entry| (i, entry)))
            .collect()
    }

    /// Registry totals
    pub fn stats(&self) -> SelectionStats {
        self.registry.stats()
    }

    /// Combine the selection without progress output
    pub async fn combine(&mut self) -> Result<&CombinedDocument> {
        self.combine_with_progress(Arc::new(ProgressBar::hidden()))
            .await
    }

    /// Combine the selection, replacing any earlier output
    pub async fn combine_with_progress(
        &mut self,
        progress: Arc<ProgressBar>,
    ) -> Result<&CombinedDocument> {
        let combiner = Combiner::new(self.options, progress);
        let document = combiner.combine(&self.registry).await?;
        Ok(&*self.document.insert(document))
    }

    /// Latest combined document
    pub fn document(&self) -> Option<&CombinedDocument> {
        self.document.as_ref()
    }

    /// Latest output text
    pub fn output(&self) -> Result<&str> {
        self.document
            .as_ref()
            .map(|doc| doc.text.as_str())
            .ok_or(MergeFsError::MissingOutput)
    }

    fn prefix_output(&mut self, prefix: &str) -> Result<()> {
        let document = self.document.as_mut().ok_or(MergeFsError::MissingOutput)?;
        document.text = prepend(prefix, &document.text);
        Ok(())
    }

    /// Prefix the output with a prompt template
    pub fn apply_prompt(&mut self, template: PromptTemplate) -> Result<()> {
        self.prefix_output(template.text())
    }

    /// Prefix the output with the project context block
    pub fn apply_project_context(&mut self) -> Result<()> {
        self.prefix_output(project_context())
    }

    /// Prefix the output with a custom request; empty requests change nothing
    pub fn apply_custom_prompt(&mut self, request: &str) -> Result<()> {
        match custom_prompt(request) {
            Some(prefix) => self.prefix_output(&prefix),
            None => self.output().map(|_| ()),
        }
    }

    /// Token estimate of the current output
    pub fn token_estimate(&self) -> Result<usize> {
        self.output().map(estimate_tokens)
    }

    /// Write the output as a Markdown file
    pub fn export(&self, path: &Path) -> Result<()> {
        let text = self.output()?;
        MarkdownWriter::new(path).write(text)?;
        Ok(())
    }

    /// Copy the output to the system clipboard
    pub fn copy_to_clipboard(&self) -> Result<()> {
        let text = self.output()?;
        clipboard::copy_to_clipboard(text)?;
        Ok(())
    }

    /// Drop files, selection and output, and turn minification off
    pub fn reset(&mut self) {
        self.registry.clear();
        self.document = None;
        self.options.minify = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> Session {
        let mut session = Session::new();
        session.load(vec![
            RawFile::in_memory("p/a.rs", "fn a() {}"),
            RawFile::in_memory("p/b.css", "b{}"),
        ]);
        session
    }

    #[test]
    fn test_missing_output() {
        let mut session = loaded();
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(session.output(), Err(MergeFsError::MissingOutput)));
        assert!(matches!(
            session.export(&dir.path().join("out.md")),
            Err(MergeFsError::MissingOutput)
        ));
        assert!(matches!(
            session.copy_to_clipboard(),
            Err(MergeFsError::MissingOutput)
        ));
        assert!(matches!(
            session.apply_prompt(PromptTemplate::Debug),
            Err(MergeFsError::MissingOutput)
        ));
    }

    #[tokio::test]
    async fn test_empty_selection_keeps_previous_output() {
        let mut session = loaded();
        session.registry_mut().select_all();
        session.combine().await.unwrap();

        session.registry_mut().select_none();
        let err = session.combine().await.unwrap_err();
        assert!(matches!(err, MergeFsError::EmptySelection));
        assert!(session.output().is_ok());
    }

    #[tokio::test]
    async fn test_prompt_prefixes() {
        let mut session = loaded();
        session.registry_mut().select_index(0, true);
        session.combine().await.unwrap();

        session.apply_custom_prompt("").unwrap();
        session.apply_prompt(PromptTemplate::Explain).unwrap();
        session.apply_custom_prompt("why?").unwrap();

        let out = session.output().unwrap();
        assert!(out.starts_with("**CUSTOM REQUEST**: why?\n\n💡 **EXPLAIN REQUEST**"));
        assert!(out.ends_with("fn a() {}\n```\n\n"));
    }

    #[tokio::test]
    async fn test_reset() {
        let mut session = loaded();
        assert!(session.toggle_minify());
        session.registry_mut().select_all();
        session.combine().await.unwrap();

        session.reset();
        assert!(session.registry().is_empty());
        assert!(session.document().is_none());
        assert!(!session.options().minify);
    }

    #[test]
    fn test_visible_entries() {
        let session = loaded();
        let styles = session.visible_entries(FilterKind::Styles);
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].0, 1);
        assert_eq!(styles[0].1.relative_path, "p/b.css");
    }

    #[tokio::test]
    async fn test_export_and_tokens() {
        let mut session = loaded();
        session.set_code_blocks(false);
        session.registry_mut().select_all();
        session.combine().await.unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combined-files.md");
        session.export(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, session.output().unwrap());
        assert_eq!(
            session.token_estimate().unwrap(),
            crate::utils::estimate_tokens(&written)
        );
    }
}
