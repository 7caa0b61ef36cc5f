//! Slice a contiguous page range out of a PDF

use std::ops::Range;
use std::path::PathBuf;
use lopdf::Document;
use crate::error::{Error, Result};
use crate::files::{ensure_dir, sibling_dir};
use crate::pdf::assemble::PageAssembler;

/// Exclusive end of a slice
///
/// `-1` is the one sentinel for "through the last page", everywhere a page
/// end is given as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEnd {
    Last,
    Index(i64),
}

impl From<i64> for PageEnd {
    fn from(end: i64) -> Self {
        if end == -1 {
            PageEnd::Last
        } else {
            PageEnd::Index(end)
        }
    }
}

/// Clamp `start..end` to a document of `page_count` pages.
///
/// Start is clamped to zero, end to the page count; a start past the end
/// gives an empty range.
pub fn resolve_range(start: i64, end: PageEnd, page_count: usize) -> Range<usize> {
    let end = match end {
        PageEnd::Last => page_count,
        PageEnd::Index(end) => usize::try_from(end.max(0)).unwrap_or(usize::MAX).min(page_count),
    };
    let start = usize::try_from(start.max(0)).unwrap_or(usize::MAX).min(end);
    start..end
}

/// Options for slicing a PDF
#[derive(Debug, Clone)]
pub struct SliceOptions {
    /// PDF to slice
    pub input_path: PathBuf,
    /// Zero-based first page
    pub start: i64,
    /// Exclusive end page
    pub end: PageEnd,
    /// Output directory name next to `input_path`; `None` writes beside it
    pub output_dir_name: Option<String>,
    /// Sliced file name
    pub output_name: String,
}

impl SliceOptions {
    pub fn new(input_path: impl Into<PathBuf>, start: i64, end: PageEnd) -> Self {
        Self {
            input_path: input_path.into(),
            start,
            end,
            output_dir_name: None,
            output_name: "Sliced.pdf".to_string(),
        }
    }

    /// Full path of the sliced file
    pub fn output_path(&self) -> PathBuf {
        sibling_dir(&self.input_path, self.output_dir_name.as_deref()).join(&self.output_name)
    }
}

/// Write pages `[start, end)` of a PDF to a new file and return its path.
///
/// Errors are not caught: a missing or unreadable source aborts the slice.
///
/// # Example
///
/// ```no_run
/// use pdf_sigpages::pdf::{slice_pdf, PageEnd, SliceOptions};
///
/// let mut options = SliceOptions::new("Clean OA.pdf", 29, PageEnd::Last);
/// options.output_name = "OA Ending.pdf".to_string();
/// let path = slice_pdf(&options)?;
/// # Ok::<(), pdf_sigpages::Error>(())
/// ```
pub fn slice_pdf(options: &SliceOptions) -> Result<PathBuf> {
    let output_path = options.output_path();

    log::info!("Input file path: {}", options.input_path.display());
    log::info!("Output file: {}", output_path.display());

    if !options.input_path.exists() {
        return Err(Error::FileNotFound(options.input_path.clone()));
    }
    if let Some(dir) = output_path.parent() {
        ensure_dir(dir)?;
    }

    let doc = Document::load(&options.input_path)?;
    let range = resolve_range(options.start, options.end, doc.get_pages().len());
    log::debug!("Slicing pages {}..{}", range.start, range.end);

    let mut assembler = PageAssembler::new();
    assembler.append(doc, range)?;
    assembler.write(&output_path)?;

    log::info!("Created: {}", output_path.display());
    Ok(output_path)
}
