//! Error types for taglib interface generation.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for generator operations.
pub type GenResult<T> = Result<T, GenError>;

/// Errors that abort a generation run.
///
/// Every variant is fatal: the run either completes for all resource roots
/// or stops at the first error without writing any output.
#[derive(Debug, Error)]
pub enum GenError {
    /// Reading a directory or file, creating a directory, or writing output failed.
    #[error("{context} {}: {source}", .path.display())]
    Io {
        context: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tag file is not well-formed markup.
    #[error("Failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: MarkupError,
    },

    /// Two taglib directories resolve to the same interface.
    #[error("Duplicate class: {existing}")]
    DuplicateInterface { existing: String },

    /// Rendering an interface to Java source failed.
    #[error("Failed to render {name}: {source}")]
    Render {
        name: String,
        #[source]
        source: askama::Error,
    },

    /// Configuration file could not be decoded.
    #[error("Invalid configuration in {}: {source}", .path.display())]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration is structurally invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GenError {
    /// Wrap an I/O error with a description of what was being done and where.
    pub fn io(context: impl Into<String>, path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a parse error for the given tag file.
    pub fn parse(path: impl Into<PathBuf>, source: MarkupError) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Reasons a tag file is rejected as markup.
#[derive(Debug, Error)]
pub enum MarkupError {
    /// Rejected by the XML reader itself.
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("document has no root element")]
    MissingRoot,

    #[error("second root element <{0}>")]
    MultipleRoots(String),

    #[error("text outside the root element")]
    TextOutsideRoot,

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("namespace prefix '{0}' is not bound")]
    UnboundPrefix(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mentions_path() {
        let err = GenError::io(
            "Failed to list directory",
            "/res/lib",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let message = err.to_string();
        assert!(message.contains("Failed to list directory"));
        assert!(message.contains("/res/lib"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_duplicate_reports_existing_name() {
        let err = GenError::DuplicateInterface {
            existing: "lib.FormTagLib".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate class: lib.FormTagLib");
    }
}
