//! Artifact sink: where finished documents go
//!
//! The pipeline never touches the filesystem (or any other storage)
//! directly; it hands named byte buffers to an [`ArtifactSink`]. The
//! production implementation writes files under a configured directory,
//! opening and releasing the handle within each call so a long run never
//! accumulates open handles.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during sink operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("artifact '{name}' not found")]
    NotFound { name: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Named-artifact storage interface
pub trait ArtifactSink {
    /// Writes an artifact, replacing any previous content under the name.
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), SinkError>;

    /// Reads an artifact back in full.
    fn read(&self, name: &str) -> Result<Vec<u8>, SinkError>;
}

/// Filesystem-backed sink rooted at a single directory
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// Creates the sink, creating the root directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, SinkError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Returns the directory artifacts are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for FsSink {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), SinkError> {
        fs::write(self.root.join(name), bytes)?;
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, SinkError> {
        match fs::read(self.root.join(name)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(SinkError::NotFound {
                name: name.to_string(),
            }),
            Err(e) => Err(SinkError::Io(e)),
        }
    }
}
