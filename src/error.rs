use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Empty content should not be published.")]
    EmptyContent,
    #[error("Title is not set.")]
    MissingTitle,
}

#[derive(Debug, Error)]
pub enum BlogError {
    /// Draft rejected before anything touched the disk
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Filesystem failure. Whatever was written before it stays on disk.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
    #[error("Error parsing index file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Post {0} not found in index")]
    NotFound(usize),
}

pub type Result<T> = std::result::Result<T, BlogError>;

impl BlogError {
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        BlogError::Io {
            context: context.into(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, BlogError::Validation(_))
    }
}

pub(crate) trait IoContext<T> {
    fn io_context<F: FnOnce() -> String>(self, context: F) -> Result<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context<F: FnOnce() -> String>(self, context: F) -> Result<T> {
        self.map_err(|e| BlogError::io(context(), e))
    }
}
