//! NCX navigation document location and parsing.

use std::path::{Path, PathBuf};

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::book::{NavDocument, NavEntry};
use crate::error::Result;
use crate::util::{local_name, resolve_entity};

/// Search the unpacked tree recursively for the `toc.ncx` navigation
/// document. EPUBs place it at varying depths, so the whole tree is walked.
pub fn find_nav_document(root: &Path) -> Option<PathBuf> {
    let mut stack = vec![root.to_path_buf()];

    while let Some(dir) = stack.pop() {
        let Ok(entries) = std::fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                stack.push(path);
            } else if path.file_name().is_some_and(|name| name == "toc.ncx") {
                return Some(path);
            }
        }
    }

    None
}

/// Partially parsed navPoint, one per nesting level.
struct NavPointState {
    title: String,
    src: Option<String>,
    emitted: bool,
}

/// Parse an NCX document into a [`NavDocument`].
///
/// The book title comes from `docTitle > text`. Navigation points are
/// flattened in document order, so nested points follow their parent, which
/// matches the reading order the NCX encodes. Points missing a label or a
/// content reference are dropped.
pub fn parse_nav_document(content: &str) -> Result<NavDocument> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut nav = NavDocument::default();
    let mut stack: Vec<NavPointState> = Vec::new();
    let mut in_doc_title = false;
    let mut in_text = false;
    let mut doc_title = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match local_name(e.name().as_ref()) {
                b"docTitle" => in_doc_title = true,
                b"navPoint" => stack.push(NavPointState {
                    title: String::new(),
                    src: None,
                    emitted: false,
                }),
                b"text" => in_text = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if local_name(e.name().as_ref()) == b"content" {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"src"
                            && let Some(state) = stack.last_mut()
                        {
                            state.src = Some(String::from_utf8(attr.value.to_vec())?);
                        }
                    }
                    emit_complete(&mut stack, &mut nav.entries);
                }
            }
            Ok(Event::Text(e)) => {
                if in_text {
                    let raw = String::from_utf8_lossy(e.as_ref());
                    if in_doc_title {
                        doc_title.push_str(&raw);
                    } else if let Some(state) = stack.last_mut() {
                        state.title.push_str(&raw);
                    }
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_text
                    && let Some(resolved) = resolve_entity(&String::from_utf8_lossy(e.as_ref()))
                {
                    if in_doc_title {
                        doc_title.push_str(&resolved);
                    } else if let Some(state) = stack.last_mut() {
                        state.title.push_str(&resolved);
                    }
                }
            }
            Ok(Event::End(e)) => match local_name(e.name().as_ref()) {
                b"docTitle" => in_doc_title = false,
                b"text" => {
                    in_text = false;
                    emit_complete(&mut stack, &mut nav.entries);
                }
                b"navPoint" => {
                    emit_complete(&mut stack, &mut nav.entries);
                    stack.pop();
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.into()),
            _ => {}
        }
    }

    nav.title = doc_title.trim().to_string();
    Ok(nav)
}

/// Push the innermost navPoint to the output once both its label and content
/// reference are known. Emitting as soon as the pair is complete keeps
/// parents ahead of their children in the flattened list.
fn emit_complete(stack: &mut [NavPointState], entries: &mut Vec<NavEntry>) {
    if let Some(state) = stack.last_mut()
        && !state.emitted
        && !state.title.is_empty()
        && let Some(src) = &state.src
    {
        entries.push(NavEntry::new(state.title.clone(), src.clone()));
        state.emitted = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_ncx() {
        let ncx = r#"<?xml version="1.0"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <docTitle><text>Agnes Grey</text></docTitle>
  <navMap>
    <navPoint id="np1" playOrder="1">
      <navLabel><text>Chapter 1</text></navLabel>
      <content src="ch1.xhtml"/>
    </navPoint>
    <navPoint id="np2" playOrder="2">
      <navLabel><text>Chapter 2</text></navLabel>
      <content src="ch2.xhtml"/>
    </navPoint>
  </navMap>
</ncx>"#;

        let nav = parse_nav_document(ncx).unwrap();

        assert_eq!(nav.title, "Agnes Grey");
        assert_eq!(nav.entries.len(), 2);
        assert_eq!(nav.entries[0].title, "Chapter 1");
        assert_eq!(nav.entries[0].src, "ch1.xhtml");
        assert_eq!(nav.entries[1].title, "Chapter 2");
        assert_eq!(nav.entries[1].src, "ch2.xhtml");
    }

    #[test]
    fn test_parse_nested_ncx_keeps_document_order() {
        let ncx = r#"<?xml version="1.0"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <docTitle><text>Nested</text></docTitle>
  <navMap>
    <navPoint id="part1">
      <navLabel><text>Part I</text></navLabel>
      <content src="part1.xhtml"/>
      <navPoint id="ch1">
        <navLabel><text>Chapter 1</text></navLabel>
        <content src="ch1.xhtml"/>
      </navPoint>
      <navPoint id="ch2">
        <navLabel><text>Chapter 2</text></navLabel>
        <content src="ch2.xhtml"/>
      </navPoint>
    </navPoint>
    <navPoint id="ch3">
      <navLabel><text>Chapter 3</text></navLabel>
      <content src="ch3.xhtml"/>
    </navPoint>
  </navMap>
</ncx>"#;

        let nav = parse_nav_document(ncx).unwrap();

        let titles: Vec<&str> = nav.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Part I", "Chapter 1", "Chapter 2", "Chapter 3"]);
    }

    #[test]
    fn test_parse_ncx_with_entities() {
        let ncx = r#"<?xml version="1.0"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/">
  <docTitle><text>Don&apos;t Stop</text></docTitle>
  <navMap>
    <navPoint id="np1">
      <navLabel><text>Cats &amp; Dogs</text></navLabel>
      <content src="ch1.xhtml"/>
    </navPoint>
  </navMap>
</ncx>"#;

        let nav = parse_nav_document(ncx).unwrap();
        assert_eq!(nav.title, "Don't Stop");
        assert_eq!(nav.entries[0].title, "Cats & Dogs");
    }

    #[test]
    fn test_parse_ncx_drops_incomplete_points() {
        let ncx = r#"<?xml version="1.0"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/">
  <docTitle><text>Sparse</text></docTitle>
  <navMap>
    <navPoint id="np1">
      <navLabel><text>No Content Ref</text></navLabel>
    </navPoint>
    <navPoint id="np2">
      <content src="orphan.xhtml"/>
    </navPoint>
    <navPoint id="np3">
      <navLabel><text>Complete</text></navLabel>
      <content src="ok.xhtml"/>
    </navPoint>
  </navMap>
</ncx>"#;

        let nav = parse_nav_document(ncx).unwrap();
        assert_eq!(nav.entries.len(), 1);
        assert_eq!(nav.entries[0].title, "Complete");
    }

    #[test]
    fn test_find_nav_document() {
        let dir = tempfile::TempDir::new().unwrap();
        let oebps = dir.path().join("OEBPS");
        std::fs::create_dir_all(&oebps).unwrap();
        std::fs::write(oebps.join("toc.ncx"), "<ncx/>").unwrap();
        std::fs::write(oebps.join("ch1.xhtml"), "<html/>").unwrap();

        let found = find_nav_document(dir.path()).unwrap();
        assert_eq!(found, oebps.join("toc.ncx"));
    }

    #[test]
    fn test_find_nav_document_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("content.opf"), "<package/>").unwrap();

        assert!(find_nav_document(dir.path()).is_none());
    }
}
