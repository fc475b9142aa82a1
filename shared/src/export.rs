//! Export seam
//!
//! In the browser a file export becomes a Blob download and a printable
//! report goes through `window.print()`. Headless callers and tests use
//! [`MemoryExporter`].

use std::cell::RefCell;

use crate::error::ClientResult;
use crate::types::ExportFormat;

/// A generated file ready to be handed to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub format: ExportFormat,
    pub contents: String,
}

impl ExportFile {
    pub fn new(stem: &str, format: ExportFormat, contents: String) -> Self {
        let stem = stem.trim();
        let stem = if stem.is_empty() { "export" } else { stem };
        let suffix = format!(".{}", format.extension());
        let filename = if stem.ends_with(&suffix) {
            stem.to_string()
        } else {
            format!("{}{}", stem, suffix)
        };
        Self {
            filename,
            format,
            contents,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

pub trait Exporter {
    /// Offer a file for download
    fn export_file(&self, file: &ExportFile) -> ClientResult<()>;

    /// Open the print dialog for the current report (print-to-PDF)
    fn print(&self) -> ClientResult<()>;
}

/// Collects exports in memory
#[derive(Debug, Default)]
pub struct MemoryExporter {
    files: RefCell<Vec<ExportFile>>,
    prints: RefCell<usize>,
}

impl MemoryExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> Vec<ExportFile> {
        self.files.borrow().clone()
    }

    pub fn print_count(&self) -> usize {
        *self.prints.borrow()
    }
}

impl Exporter for MemoryExporter {
    fn export_file(&self, file: &ExportFile) -> ClientResult<()> {
        self.files.borrow_mut().push(file.clone());
        Ok(())
    }

    fn print(&self) -> ClientResult<()> {
        *self.prints.borrow_mut() += 1;
        Ok(())
    }
}
