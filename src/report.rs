//! Per-file outcomes for batch operations

use std::fmt;
use std::path::PathBuf;
use crate::error::Error;

/// Why a file was left out of a batch without an error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The requested page does not exist in this file
    PageOutOfRange { page_index: usize, page_count: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::PageOutOfRange { page_index, page_count } => write!(
                f,
                "page {} out of range (document has {} pages)",
                page_index, page_count
            ),
        }
    }
}

/// What happened to one input file
#[derive(Debug)]
pub enum FileOutcome {
    /// Pages were copied; `written` is set when the file produced its own output
    Copied { pages: usize, written: Option<PathBuf> },
    Skipped { reason: SkipReason },
    Failed { error: Error },
}

/// Outcome for a single source file
#[derive(Debug)]
pub struct FileReport {
    pub source: PathBuf,
    pub outcome: FileOutcome,
}

/// Summary of a batch operation over many files
#[derive(Debug)]
pub struct BatchReport {
    /// Output file, or output directory for the page extractor
    pub output: PathBuf,
    pub files: Vec<FileReport>,
    /// Total pages written across all outputs
    pub pages_written: usize,
}

impl BatchReport {
    pub fn new(output: PathBuf) -> Self {
        Self {
            output,
            files: Vec::new(),
            pages_written: 0,
        }
    }

    pub fn record(&mut self, source: PathBuf, outcome: FileOutcome) {
        if let FileOutcome::Copied { pages, .. } = &outcome {
            self.pages_written += pages;
        }
        self.files.push(FileReport { source, outcome });
    }

    pub fn copied(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Copied { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }

    /// Paths of the files each copied source produced, in input order
    pub fn written_files(&self) -> Vec<&PathBuf> {
        self.files
            .iter()
            .filter_map(|r| match &r.outcome {
                FileOutcome::Copied { written: Some(path), .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|r| pred(&r.outcome)).count()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} copied, {} skipped, {} failed ({} pages) -> {}",
            self.copied(),
            self.skipped(),
            self.failed(),
            self.pages_written,
            self.output.display()
        )
    }
}
