/*!
 * Content sources: handles that yield a file's full text on demand
 */

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

/// Asynchronous full-text read of one file
#[async_trait]
pub trait ContentSource: Send + Sync + fmt::Debug {
    /// Read the whole content as text
    async fn read_text(&self) -> io::Result<String>;
}

/// Content backed by a file on disk
#[derive(Debug, Clone)]
pub struct DiskSource {
    path: PathBuf,
}

impl DiskSource {
    /// Create a source for the given absolute path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this source reads from
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl ContentSource for DiskSource {
    async fn read_text(&self) -> io::Result<String> {
        // Binary content is decoded as text, invalid sequences replaced
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

/// Content held in memory, or a read that always fails
#[derive(Debug, Clone)]
pub enum MemorySource {
    /// Successful read yielding this text
    Text(String),
    /// Failing read with this message
    Failing(String),
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn read_text(&self) -> io::Result<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Failing(message) => Err(io::Error::new(io::ErrorKind::Other, message.clone())),
        }
    }
}

/// A raw file handle as produced by the file-access layer
#[derive(Debug, Clone)]
pub struct RawFile {
    /// File name
    pub name: String,
    /// Path within the loaded folder, if known
    pub relative_path: Option<String>,
    /// Size in bytes
    pub size: u64,
    /// Content handle
    pub source: Arc<dyn ContentSource>,
}

impl RawFile {
    /// Build an in-memory raw file, sized by its text
    pub fn in_memory(relative_path: &str, text: &str) -> Self {
        let name = relative_path
            .rsplit('/')
            .next()
            .unwrap_or(relative_path)
            .to_string();
        Self {
            name,
            relative_path: Some(relative_path.to_string()),
            size: text.len() as u64,
            source: Arc::new(MemorySource::Text(text.to_string())),
        }
    }

    /// Build an in-memory raw file whose read always fails
    pub fn failing(relative_path: &str, size: u64, message: &str) -> Self {
        let mut raw = Self::in_memory(relative_path, "");
        raw.size = size;
        raw.source = Arc::new(MemorySource::Failing(message.to_string()));
        raw
    }
}
