//! # booksum
//!
//! Extracts readable chapter text from EPUB books and produces a running,
//! context-aware summary of each chapter via an Ollama model.
//!
//! ## Pipeline
//!
//! - Unpack the EPUB archive into a per-run temporary directory
//! - Locate and parse the NCX navigation document (reading order + titles)
//! - Render each referenced content file to normalized plain text
//! - Classify each unit as a genuine chapter vs. front/back matter
//! - Feed accepted chapters, in order, to a chat model that summarizes them
//!   one at a time, conditioned on the summaries so far
//!
//! ## Quick Start
//!
//! ```no_run
//! use booksum::{Thresholds, extract};
//!
//! let (workdir, book) = extract("input.epub", &Thresholds::default())?;
//! println!("{}: {} chapters", book.title, book.chapters.len());
//! for chapter in &book.chapters {
//!     println!("  {}", chapter.title);
//! }
//! drop(workdir); // temp directory removed here
//! # Ok::<(), booksum::Error>(())
//! ```
//!
//! Summarization is a separate stage driven by the caller (see
//! [`Summarizer`]), since it talks to an external model service.

pub mod book;
pub mod epub;
mod error;
pub mod extract;
pub mod report;
pub mod summarize;
pub(crate) mod util;

pub use book::{Book, Chapter, NavDocument, NavEntry};
pub use epub::Workdir;
pub use error::{Error, Result};
pub use extract::{Thresholds, extract, is_chapter};
pub use report::{ReportFormat, ReportWriter, report_filename};
pub use summarize::{ChatMessage, OllamaClient, Summarizer};
