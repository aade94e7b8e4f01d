/// A single navigation point from the NCX document: a display title plus the
/// content-file reference it links to, exactly as written in the source.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct NavEntry {
    pub title: String,
    /// Content href from the `<content src="...">` attribute. May carry a
    /// `#fragment` and percent-encoding; resolved by the orchestrator.
    pub src: String,
}

/// Parsed navigation document: the book's display title and its navigation
/// points flattened in document order (reading order).
#[derive(Debug, Clone, Default)]
pub struct NavDocument {
    pub title: String,
    pub entries: Vec<NavEntry>,
}

/// A rendered chapter: normalized plain text (no markup, no blank lines,
/// every line trimmed) plus its navigation title.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Chapter {
    pub title: String,
    pub text: String,
}

/// The extraction artifact: ordered chapters that survived classification.
///
/// Chapter order is always a subsequence of navigation order; filtering
/// never reorders or duplicates.
#[derive(Debug, Clone, Default)]
pub struct Book {
    pub title: String,
    pub chapters: Vec<Chapter>,
}

impl NavEntry {
    pub fn new(title: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            src: src.into(),
        }
    }
}

impl Chapter {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            chapters: Vec::new(),
        }
    }
}
