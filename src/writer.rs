/*!
 * Markdown export of the combined document
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

/// File name used for the exported document
pub const DEFAULT_OUTPUT_NAME: &str = "combined-files.md";

/// Media type of the exported document
pub const OUTPUT_MIME: &str = "text/markdown";

/// Writes combined documents to disk
pub struct MarkdownWriter {
    /// Destination file
    output_file: PathBuf,
}

impl MarkdownWriter {
    /// Create a writer targeting a file
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }

    /// Destination file
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Write the text, replacing any previous file
    pub fn write(&self, text: &str) -> io::Result<()> {
        let file = File::create(&self.output_file)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;

        info!(
            path = %self.output_file.display(),
            bytes = text.len(),
            mime = OUTPUT_MIME,
            "Exported combined document"
        );
        Ok(())
    }
}
