//! Summary report rendering (plain text or Markdown).
//!
//! Pure formatting; the only behavior worth noting is that output is flushed
//! after every chapter so partial progress survives an interrupted run.

use std::io::{self, Write};

/// Output rendering for the final summary document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportFormat {
    Text,
    Markdown,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Markdown => "md",
        }
    }
}

/// Default report file name: `{book title}_summary.{ext}`.
pub fn report_filename(book_title: &str, format: ReportFormat) -> String {
    format!("{}_summary.{}", book_title, format.extension())
}

/// Writes chapter summaries in the selected format.
pub struct ReportWriter<W: Write> {
    format: ReportFormat,
    writer: W,
}

impl<W: Write> ReportWriter<W> {
    /// Wrap a writer and emit the document header, if the format has one.
    pub fn new(format: ReportFormat, mut writer: W) -> io::Result<Self> {
        if format == ReportFormat::Markdown {
            writeln!(writer, "# Book Summary")?;
        }
        Ok(Self { format, writer })
    }

    /// Append one chapter summary and flush.
    pub fn chapter(&mut self, title: &str, summary: &str) -> io::Result<()> {
        match self.format {
            ReportFormat::Text => {
                writeln!(self.writer, "{title}")?;
                writeln!(self.writer, "{summary}")?;
                writeln!(self.writer, "{}", "-".repeat(20))?;
            }
            ReportFormat::Markdown => {
                writeln!(self.writer, "## {title}")?;
                writeln!(self.writer, "{summary}")?;
                writeln!(self.writer)?;
                writeln!(self.writer, "-----")?;
            }
        }
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_report() {
        let mut buf = Vec::new();
        {
            let mut report = ReportWriter::new(ReportFormat::Text, &mut buf).unwrap();
            report.chapter("Chapter 1", "It begins.").unwrap();
            report.chapter("Chapter 2", "It continues.").unwrap();
        }

        let out = String::from_utf8(buf).unwrap();
        assert_eq!(
            out,
            "Chapter 1\nIt begins.\n--------------------\n\
             Chapter 2\nIt continues.\n--------------------\n"
        );
    }

    #[test]
    fn test_markdown_report() {
        let mut buf = Vec::new();
        {
            let mut report = ReportWriter::new(ReportFormat::Markdown, &mut buf).unwrap();
            report.chapter("Chapter 1", "It begins.").unwrap();
        }

        let out = String::from_utf8(buf).unwrap();
        assert!(out.starts_with("# Book Summary\n"));
        assert!(out.contains("## Chapter 1\nIt begins.\n\n-----\n"));
    }

    #[test]
    fn test_report_filename() {
        assert_eq!(
            report_filename("Agnes Grey", ReportFormat::Text),
            "Agnes Grey_summary.txt"
        );
        assert_eq!(
            report_filename("Agnes Grey", ReportFormat::Markdown),
            "Agnes Grey_summary.md"
        );
    }
}
