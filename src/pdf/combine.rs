//! Concatenate PDFs from a directory or an explicit list

use std::path::{Path, PathBuf};
use lopdf::Document;
use crate::error::{Error, Result};
use crate::files::{ensure_dir, list_pdfs, sibling_dir};
use crate::pdf::assemble::PageAssembler;
use crate::report::{BatchReport, FileOutcome};

/// Options for combining every PDF in a directory
#[derive(Debug, Clone)]
pub struct CombineDirOptions {
    /// Directory containing the PDFs to combine
    pub input_dir: PathBuf,
    /// Output directory name next to `input_dir`; `None` writes beside it
    pub output_dir_name: Option<String>,
    /// Combined file name
    pub output_name: String,
}

impl CombineDirOptions {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir_name: None,
            output_name: "Sig Pages Combined.pdf".to_string(),
        }
    }

    /// Full path of the combined file
    pub fn output_path(&self) -> PathBuf {
        sibling_dir(&self.input_dir, self.output_dir_name.as_deref()).join(&self.output_name)
    }
}

/// Options for combining an explicit, ordered list of PDFs
#[derive(Debug, Clone)]
pub struct CombineListOptions {
    /// Input PDF file paths in the order they should be combined
    pub input_paths: Vec<PathBuf>,
    /// Output directory, used as given
    pub output_dir: PathBuf,
    /// Combined file name
    pub output_name: String,
}

impl CombineListOptions {
    pub fn new(input_paths: Vec<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_paths,
            output_dir: output_dir.into(),
            output_name: "Combined.pdf".to_string(),
        }
    }

    /// Full path of the combined file
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }
}

/// Combine every `*.pdf` in a directory, in file name order, into one PDF
///
/// # Example
///
/// ```no_run
/// use pdf_sigpages::pdf::{combine_dir, CombineDirOptions};
///
/// let report = combine_dir(&CombineDirOptions::new("Sig Pages"))?;
/// println!("{}", report.output.display());
/// # Ok::<(), pdf_sigpages::Error>(())
/// ```
pub fn combine_dir(options: &CombineDirOptions) -> Result<BatchReport> {
    log::info!("Input file directory: {}", options.input_dir.display());
    let inputs = list_pdfs(&options.input_dir)?;
    combine_files(&inputs, &options.output_path())
}

/// Combine PDFs in exactly the order given into one PDF
pub fn combine_list(options: &CombineListOptions) -> Result<BatchReport> {
    log::info!("Input file list: {:?}", options.input_paths);
    combine_files(&options.input_paths, &options.output_path())
}

/// Append all pages of each input to one document and write it once.
///
/// Inputs that fail to load are logged and contribute nothing.
fn combine_files(inputs: &[PathBuf], output_path: &Path) -> Result<BatchReport> {
    log::info!("Output file: {}", output_path.display());
    if let Some(dir) = output_path.parent() {
        if !dir.as_os_str().is_empty() {
            ensure_dir(dir)?;
        }
    }

    let mut report = BatchReport::new(output_path.to_path_buf());
    let mut assembler = PageAssembler::new();

    for source in inputs {
        let outcome = match Document::load(source)
            .map_err(Error::from)
            .and_then(|doc| assembler.append_all(doc))
        {
            Ok(pages) => {
                log::info!("Added: {} ({} pages)", source.display(), pages);
                FileOutcome::Copied { pages, written: None }
            }
            Err(error) => {
                log::warn!("Error processing {}: {}", source.display(), error);
                FileOutcome::Failed { error }
            }
        };
        report.record(source.clone(), outcome);
    }

    assembler.write(output_path)?;
    log::info!("Created: {}", output_path.display());

    Ok(report)
}
