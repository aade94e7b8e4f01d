//! Error types for extraction and summarization.

use thiserror::Error;

/// Errors that can occur while extracting or summarizing a book.
///
/// [`Error::Archive`] and [`Error::NavigationNotFound`] are fatal for a run;
/// [`Error::Render`] applies to a single navigation entry and is normally
/// logged and skipped by the orchestrator.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid EPUB archive: {0}")]
    Archive(String),

    #[error("No navigation document (toc.ncx) found in archive")]
    NavigationNotFound,

    #[error("Failed to render {path}: {reason}")]
    Render { path: String, reason: String },

    #[error("Chat request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("UTF-8 decoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    pub(crate) fn render(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Render {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
