//! Heuristic chapter classification.
//!
//! Navigation documents list plenty of units that are not summarizable
//! prose: tables of contents, copyright pages, "also by" listings, section
//! dividers. There is no reliable schema that marks them, so classification
//! works purely on the navigation title and the rendered text. False
//! positives and negatives on atypical books are expected and acceptable.

/// Titles that never denote a summarizable chapter (compared lower-cased,
/// trimmed, exact).
const REJECT_TITLES: &[&str] = &[
    "contents",
    "table of contents",
    "toc",
    "index",
    "acknowledgements",
    "copyright",
    "about the author",
];

/// Tuning knobs for [`is_chapter`].
///
/// The defaults are empirically tuned against real books; they are carried
/// as configuration rather than literals, but there is no principled rule
/// behind the exact values.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Minimum number of newline-separated lines.
    pub min_lines: usize,
    /// Minimum number of space characters in the whole text.
    pub min_spaces: usize,
    /// Minimum mean line length (total characters / number of lines).
    pub min_mean_line_len: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_lines: 5,
            min_spaces: 20,
            min_mean_line_len: 25.0,
        }
    }
}

/// Decide whether a rendered unit is a genuine chapter.
///
/// Rules are evaluated in order; the first match decides, and the default is
/// accept. Pure and deterministic, never errors.
pub fn is_chapter(text: &str, title: &str, thresholds: &Thresholds) -> bool {
    let title = title.trim().to_lowercase();

    if REJECT_TITLES.contains(&title.as_str()) {
        return false;
    }
    if title.starts_with("also by") {
        return false;
    }

    // Empty text is never a chapter, whatever the thresholds
    let line_count = text.lines().count();
    if line_count == 0 || line_count < thresholds.min_lines {
        return false;
    }

    // Near-empty pages have markup but almost no running prose
    if text.chars().filter(|&c| c == ' ').count() < thresholds.min_spaces {
        return false;
    }

    // Sparse structural pages (title pages, dividers) pass the line-count
    // check but carry little text per line
    let total_chars: usize = text.lines().map(|line| line.chars().count()).sum();
    if (total_chars as f64) / (line_count as f64) < thresholds.min_mean_line_len {
        return false;
    }

    true
}
