//! Error types for the result formatting crate.

use std::path::PathBuf;

/// Errors that can occur while formatting tool results.
#[derive(thiserror::Error, Debug)]
pub enum FormatError {
    /// No template is registered for the given name.
    #[error("template not found: {0}")]
    TemplateNotFound(String),

    /// Error occurred while rendering a template.
    #[error("template render error: {0}")]
    TemplateRenderError(String),

    /// Template override directory does not exist or is not a directory.
    #[error("template directory not found: {0}")]
    TemplateDirectoryNotFound(PathBuf),

    /// Template directory listing failed.
    #[error("failed to list templates in {path}")]
    TemplateListError {
        /// Path to the template directory.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for formatting operations.
pub type Result<T> = std::result::Result<T, FormatError>;
