//! Extraction orchestrator: archive to ordered, classified chapter list.

mod classify;
mod render;

pub use classify::{Thresholds, is_chapter};
pub use render::{normalize, paragraph_text, render_file};

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::book::{Book, Chapter};
use crate::epub::{Workdir, find_nav_document, parse_nav_document, unpack};
use crate::error::{Error, Result};
use crate::util::{decode_text, strip_bom, xml_encoding_hint};

/// Run the full extraction pipeline on an EPUB file.
///
/// Unpacks the archive, locates and parses the NCX, then renders and
/// classifies every navigation entry in reading order. Accepted chapters are
/// also persisted as plain-text files under `<workdir>/extracted/` for
/// inspection.
///
/// A missing navigation document is fatal ([`Error::NavigationNotFound`]);
/// an entry that fails to render is logged and dropped, and processing
/// continues with the rest.
///
/// The returned [`Workdir`] keeps the unpacked tree alive; drop it to clean
/// up.
pub fn extract<P: AsRef<Path>>(path: P, thresholds: &Thresholds) -> Result<(Workdir, Book)> {
    let workdir = unpack(path)?;

    // 1. Locate the navigation document
    let nav_path = find_nav_document(workdir.path()).ok_or(Error::NavigationNotFound)?;
    let nav_dir = nav_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| workdir.path().to_path_buf());

    // 2. Parse it into the book title and the ordered entry list
    let bytes = fs::read(&nav_path)?;
    let hint = xml_encoding_hint(&bytes);
    let content = decode_text(strip_bom(&bytes), hint.as_deref());
    let nav = parse_nav_document(&content)?;

    let extracted = workdir.extracted_dir()?;
    let mut book = Book::new(nav.title);

    // 3. Render and classify each entry in reading order
    for (index, entry) in nav.entries.iter().enumerate() {
        let file = entry.src.split('#').next().unwrap_or(&entry.src);
        if !is_renderable(file) {
            debug!(src = %entry.src, "ignoring non-text navigation entry");
            continue;
        }

        let content_path = resolve_content_path(&nav_dir, file);
        let text = match render_file(&content_path) {
            Ok(text) => text,
            Err(e) => {
                warn!(title = %entry.title, error = %e, "dropping entry");
                continue;
            }
        };

        if !is_chapter(&text, &entry.title, thresholds) {
            debug!(title = %entry.title, "not a chapter");
            continue;
        }
        debug!(title = %entry.title, "accepted chapter");

        persist_chapter(&extracted, index, &entry.title, &text)?;
        book.chapters.push(Chapter::new(entry.title.clone(), text));
    }

    Ok((workdir, book))
}

/// Whether a content reference (fragment already stripped) points to a
/// renderable text document. Navigation documents routinely reference audio
/// and other media-overlay targets; those are not chapters.
fn is_renderable(src: &str) -> bool {
    let lower = src.to_ascii_lowercase();
    lower.ends_with(".xhtml") || lower.ends_with(".html") || lower.ends_with(".htm")
}

/// Resolve a content href against the navigation document's directory.
/// Hrefs are often percent-encoded; fall back to the decoded form when the
/// literal path does not exist (handles malformed EPUBs).
fn resolve_content_path(base: &Path, href: &str) -> PathBuf {
    let direct = base.join(href);
    if direct.exists() {
        return direct;
    }

    match percent_encoding::percent_decode_str(href).decode_utf8() {
        Ok(decoded) => base.join(decoded.as_ref()),
        Err(_) => direct,
    }
}

/// Write an accepted chapter under `extracted/`, named from the sanitized
/// title. The index prefix keeps files in reading order and distinct when
/// titles repeat.
fn persist_chapter(dir: &Path, index: usize, title: &str, text: &str) -> Result<()> {
    let mut slug = sanitize_title(title);
    if slug.is_empty() {
        slug = "chapter".to_string();
    }
    let path = dir.join(format!("{:03}-{}.txt", index + 1, slug));
    fs::write(path, text)?;
    Ok(())
}

/// Reduce a chapter title to a filesystem-safe slug.
fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else if c.is_whitespace() || c == '-' || c == '_' {
                '-'
            } else {
                '\0'
            }
        })
        .filter(|&c| c != '\0')
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_renderable() {
        assert!(is_renderable("ch1.xhtml"));
        assert!(is_renderable("CH1.XHTML"));
        assert!(is_renderable("notes.html"));
        assert!(is_renderable("old.htm"));

        assert!(!is_renderable("audio/track01.mp3"));
        assert!(!is_renderable("cover.jpg"));
        assert!(!is_renderable("page.smil"));
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("Chapter One"), "chapter-one");
        assert_eq!(sanitize_title("Chapter 1: The Start!"), "chapter-1-the-start");
        assert_eq!(sanitize_title("  spaced  out  "), "spaced-out");
        assert_eq!(sanitize_title("..."), "");
    }

    #[test]
    fn test_resolve_content_path_percent_decoding() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("my chapter.xhtml");
        std::fs::write(&target, "<html/>").unwrap();

        let resolved = resolve_content_path(dir.path(), "my%20chapter.xhtml");
        assert_eq!(resolved, target);
    }
}
