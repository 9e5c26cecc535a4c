//! Print hand-off: write the report and open it in the system browser
//!
//! The rendered document asks the browser to print once it loads, so opening
//! the file is the print request.

use anyhow::{Context, Result};
use balance_core::{Document, PrintSink};
use std::path::PathBuf;
use tracing::info;

use crate::constants;

/// Writes the report to `output_dir` and optionally opens it
pub struct BrowserSink {
    output_dir: PathBuf,
    open_browser: bool,
    last_written: Option<PathBuf>,
}

impl BrowserSink {
    pub fn new(output_dir: PathBuf, open_browser: bool) -> Self {
        Self {
            output_dir,
            open_browser,
            last_written: None,
        }
    }

    /// Path of the most recently written report
    pub fn last_written(&self) -> Option<&PathBuf> {
        self.last_written.as_ref()
    }
}

impl PrintSink for BrowserSink {
    fn print(&mut self, document: &Document) -> Result<()> {
        std::fs::create_dir_all(&self.output_dir)
            .with_context(|| format!("Failed to create {}", self.output_dir.display()))?;

        let path = self.output_dir.join(constants::REPORT_FILENAME);
        std::fs::write(&path, &document.html)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        info!(path = %path.display(), rows = document.rows, "wrote report");

        if self.open_browser {
            opener::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        }

        self.last_written = Some(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_document_without_opening() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("reports");
        let mut sink = BrowserSink::new(output_dir.clone(), false);

        let document = Document {
            title: "Clients".to_string(),
            html: "<!DOCTYPE html><html></html>".to_string(),
            rows: 0,
        };
        sink.print(&document).unwrap();

        let path = output_dir.join(constants::REPORT_FILENAME);
        assert_eq!(sink.last_written(), Some(&path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), document.html);
    }

    #[test]
    fn test_second_print_overwrites_report() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = BrowserSink::new(dir.path().to_path_buf(), false);

        for html in ["first", "second"] {
            let document = Document {
                title: String::new(),
                html: html.to_string(),
                rows: 1,
            };
            sink.print(&document).unwrap();
        }

        let path = dir.path().join(constants::REPORT_FILENAME);
        assert_eq!(std::fs::read_to_string(path).unwrap(), "second");
    }
}
