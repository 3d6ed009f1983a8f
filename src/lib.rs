/*!
 * MergeFS - Combine selected files of a folder into one Markdown document
 *
 * This library loads a folder, keeps a selection over its files and
 * concatenates the selected ones into a single document for use as context
 * for Large Language Models.
 */

pub mod app;
pub mod classify;
pub mod clipboard;
pub mod combiner;
pub mod config;
pub mod error;
pub mod filter;
pub mod minify;
pub mod prompt;
pub mod registry;
pub mod report;
pub mod scanner;
pub mod session;
pub mod source;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use classify::{extension_of, is_code_file, language_tag};
pub use combiner::Combiner;
pub use config::Config;
pub use error::{MergeFsError, Result};
pub use filter::{filter, FilterKind};
pub use minify::minify;
pub use prompt::PromptTemplate;
pub use registry::Registry;
pub use report::{ReportFormat, Reporter};
pub use scanner::Scanner;
pub use session::Session;
pub use source::{ContentSource, DiskSource, MemorySource, RawFile};
pub use types::{CombineOptions, CombinedDocument, FileEntry, SelectionStats};
pub use utils::{estimate_tokens, format_file_size};
pub use writer::MarkdownWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
