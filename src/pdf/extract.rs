//! Extract the same page from every PDF in a directory

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use lopdf::Document;
use crate::error::Result;
use crate::files::{ensure_dir, list_pdfs, sibling_dir};
use crate::pdf::assemble::PageAssembler;
use crate::report::{BatchReport, FileOutcome, SkipReason};

/// Options for extracting one page from each PDF in a directory
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Directory containing the PDFs to extract from
    pub input_dir: PathBuf,
    /// Zero-based page index to extract
    pub page_index: usize,
    /// Output directory name, created next to `input_dir`
    pub output_dir_name: String,
    /// Prefix added to each source file name
    pub output_prefix: String,
}

impl ExtractOptions {
    pub fn new(input_dir: impl Into<PathBuf>, page_index: usize) -> Self {
        Self {
            input_dir: input_dir.into(),
            page_index,
            output_dir_name: "Sig Pages".to_string(),
            output_prefix: "Sig Page - ".to_string(),
        }
    }

    /// Directory the extracted pages are written to
    pub fn output_dir(&self) -> PathBuf {
        sibling_dir(&self.input_dir, Some(&self.output_dir_name))
    }
}

/// Extract `page_index` from every `*.pdf` in `input_dir` into its own file.
///
/// Files without that page are skipped and files that fail to load or write
/// are logged; neither stops the batch. The report's output is the output
/// directory.
///
/// # Example
///
/// ```no_run
/// use pdf_sigpages::pdf::{extract_same_page, ExtractOptions};
///
/// let report = extract_same_page(&ExtractOptions::new("Signed", 28))?;
/// println!("{}", report);
/// # Ok::<(), pdf_sigpages::Error>(())
/// ```
pub fn extract_same_page(options: &ExtractOptions) -> Result<BatchReport> {
    let output_dir = options.output_dir();

    log::info!("Input file directory: {}", options.input_dir.display());
    log::info!("Output file directory: {}", output_dir.display());
    log::debug!("Output file name prefix: {:?}", options.output_prefix);
    log::info!(
        "Page number to extract: {} (PDF page {})",
        options.page_index,
        options.page_index.saturating_add(1)
    );

    let inputs = list_pdfs(&options.input_dir)?;
    ensure_dir(&output_dir)?;

    let mut report = BatchReport::new(output_dir.clone());
    for source in inputs {
        let Some(file_name) = source.file_name() else {
            continue;
        };
        let mut output_name = OsString::from(&options.output_prefix);
        output_name.push(file_name);
        let output_path = output_dir.join(output_name);

        let outcome = match extract_page(&source, options.page_index, &output_path) {
            Ok(outcome) => outcome,
            Err(error) => {
                log::warn!("Error processing {}: {}", source.display(), error);
                FileOutcome::Failed { error }
            }
        };
        match &outcome {
            FileOutcome::Copied { .. } => log::info!("Created: {}", output_path.display()),
            FileOutcome::Skipped { reason } => {
                log::warn!("Skipped ({}): {}", reason, source.display())
            }
            FileOutcome::Failed { .. } => {}
        }
        report.record(source, outcome);
    }

    log::info!("PDF extraction complete: {}", report);
    Ok(report)
}

fn extract_page(source: &Path, page_index: usize, output_path: &Path) -> Result<FileOutcome> {
    let doc = Document::load(source)?;
    let page_count = doc.get_pages().len();
    if page_index >= page_count {
        return Ok(FileOutcome::Skipped {
            reason: SkipReason::PageOutOfRange { page_index, page_count },
        });
    }

    let mut assembler = PageAssembler::new();
    let pages = assembler.append(doc, page_index..page_index + 1)?;
    assembler.write(output_path)?;

    Ok(FileOutcome::Copied {
        pages,
        written: Some(output_path.to_path_buf()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_defaults() {
        let options = ExtractOptions::new("deals/Signed", 3);
        assert_eq!(options.page_index, 3);
        assert_eq!(options.output_prefix, "Sig Page - ");
        assert_eq!(options.output_dir(), PathBuf::from("deals/Sig Pages"));
    }

    #[test]
    fn test_extract_missing_directory_fails() {
        let options = ExtractOptions::new("no-such-directory", 0);
        assert!(extract_same_page(&options).is_err());
    }
}
