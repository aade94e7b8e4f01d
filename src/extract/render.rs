//! Renders XHTML content documents to normalized plain text.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{Error, Result};
use crate::util::{decode_text, local_name, resolve_entity, strip_bom, xml_encoding_hint};

/// Load a content document and render it to normalized paragraph text.
///
/// Any failure (missing file, undecodable bytes, malformed markup) is an
/// [`Error::Render`] carrying the offending path, so the orchestrator can
/// drop the single entry and continue.
pub fn render_file(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).map_err(|e| Error::render(path.display().to_string(), e))?;

    let hint = xml_encoding_hint(&bytes);
    let content = decode_text(strip_bom(&bytes), hint.as_deref());

    let text =
        paragraph_text(&content).map_err(|e| Error::render(path.display().to_string(), e))?;

    Ok(normalize(&text))
}

/// Extract the text content of every `<p>` element in document order, one
/// newline per paragraph. Inline markup inside a paragraph contributes its
/// text; the tags themselves are discarded.
pub fn paragraph_text(content: &str) -> std::result::Result<String, quick_xml::Error> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().check_end_names = true;

    let mut text = String::new();
    let mut p_depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if local_name(e.name().as_ref()) == b"p" {
                    p_depth += 1;
                }
            }
            Ok(Event::End(e)) => {
                if local_name(e.name().as_ref()) == b"p" && p_depth > 0 {
                    p_depth -= 1;
                    if p_depth == 0 && !text.ends_with('\n') {
                        text.push('\n');
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if p_depth > 0 {
                    text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if p_depth > 0
                    && let Some(resolved) = resolve_entity(&String::from_utf8_lossy(e.as_ref()))
                {
                    text.push_str(&resolved);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e),
            _ => {}
        }
    }

    Ok(text)
}

/// Normalize rendered text: trim every line, drop empty lines, rejoin with
/// single newlines. The result has no blank lines and no trailing newline.
pub fn normalize(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
