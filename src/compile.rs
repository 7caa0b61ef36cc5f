//! Compile a final signed agreement
//!
//! Rebuilds the agreement from its clean (unsigned) copy and a directory of
//! individually signed copies. The investor signature page is pulled from
//! every signed copy and spliced in where the clean copy had it, next to the
//! manager's signature page.

use std::path::PathBuf;
use crate::error::Result;
use crate::files::parent_dir;
use crate::pdf::{
    combine_dir, combine_list, extract_same_page, slice_pdf, CombineDirOptions,
    CombineListOptions, ExtractOptions, PageEnd, SliceOptions,
};
use crate::report::BatchReport;

const INVESTOR_PAGES_DIR: &str = "Investor Sig Pages";
const INVESTOR_PAGES_COMBINED: &str = "Investor Sig Pages Combined.pdf";
const BEGINNING_NAME: &str = "OA Beginning.pdf";
const ENDING_NAME: &str = "OA Ending.pdf";
const MANAGER_PAGE_NAME: &str = "Manager Signature Page.pdf";

/// Options for compiling the final agreement
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Clean (unsigned) agreement
    pub clean_path: PathBuf,
    /// Directory of individually signed agreements
    pub signed_dir: PathBuf,
    /// Zero-based index of the investor signature page
    pub investor_page: usize,
    /// Zero-based index of the manager signature page
    pub manager_page: usize,
    /// Final file name; defaults to `<clean stem> FINAL COMBINED.pdf`
    pub output_name: Option<String>,
}

impl CompileOptions {
    pub fn new(
        clean_path: impl Into<PathBuf>,
        signed_dir: impl Into<PathBuf>,
        investor_page: usize,
        manager_page: usize,
    ) -> Self {
        Self {
            clean_path: clean_path.into(),
            signed_dir: signed_dir.into(),
            investor_page,
            manager_page,
            output_name: None,
        }
    }

    /// File name of the compiled agreement
    pub fn output_name(&self) -> String {
        match &self.output_name {
            Some(name) => name.clone(),
            None => {
                let stem = self
                    .clean_path
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                format!("{} FINAL COMBINED.pdf", stem)
            }
        }
    }
}

/// Paths and reports produced while compiling
#[derive(Debug)]
pub struct CompileSummary {
    /// The compiled agreement
    pub output_path: PathBuf,
    pub investor_pages: BatchReport,
    pub investor_pages_combined: PathBuf,
    pub beginning: PathBuf,
    pub ending: PathBuf,
    pub manager_page: PathBuf,
    /// Components of the final document, in order
    pub components: BatchReport,
}

/// Order the agreement's segments so the result follows the clean copy's page order
pub fn order_components(
    investor_page: usize,
    manager_page: usize,
    beginning: PathBuf,
    manager: PathBuf,
    investors: PathBuf,
    ending: PathBuf,
) -> Vec<PathBuf> {
    if manager_page < investor_page {
        vec![beginning, manager, investors, ending]
    } else {
        vec![beginning, investors, manager, ending]
    }
}

/// Compile the final signed agreement and return what was written.
///
/// Steps run strictly in order, each reading the previous step's output from
/// disk. Any error aborts the run and leaves the intermediate files in place.
pub fn compile_final_agreement(options: &CompileOptions) -> Result<CompileSummary> {
    let investor = options.investor_page;
    let manager = options.manager_page;

    log::info!("Clean operating agreement path: {}", options.clean_path.display());
    log::info!("Signed operating agreements directory: {}", options.signed_dir.display());
    log::info!("Investor signature page number: {} (PDF page {})", investor, investor.saturating_add(1));
    log::info!("Manager signature page number: {} (PDF page {})", manager, manager.saturating_add(1));

    if investor.abs_diff(manager) > 1 {
        log::warn!(
            "Signature pages {} and {} are not adjacent; pages between them are left out",
            investor.min(manager),
            investor.max(manager)
        );
    }

    // Step 1: investor signature page from every signed copy
    let mut extract = ExtractOptions::new(&options.signed_dir, investor);
    extract.output_dir_name = INVESTOR_PAGES_DIR.to_string();
    let investor_pages = extract_same_page(&extract)?;
    if investor_pages.copied() == 0 {
        log::warn!("No investor signature pages were extracted from {}", options.signed_dir.display());
    }

    // Step 2: combine them
    let mut combine = CombineDirOptions::new(&investor_pages.output);
    combine.output_name = INVESTOR_PAGES_COMBINED.to_string();
    let investor_pages_combined = combine_dir(&combine)?.output;

    // Steps 3-5: clean copy segments. Indices past the end give empty segments.
    let slice = |start: usize, end: PageEnd, name: &str| {
        let mut segment = SliceOptions::new(&options.clean_path, page_offset(start), end);
        segment.output_name = name.to_string();
        slice_pdf(&segment)
    };
    let beginning = slice(0, PageEnd::Index(page_offset(investor.min(manager))), BEGINNING_NAME)?;
    let ending = slice(investor.max(manager).saturating_add(1), PageEnd::Last, ENDING_NAME)?;
    let manager_end = PageEnd::Index(page_offset(manager.saturating_add(1)));
    let manager_page = slice(manager, manager_end, MANAGER_PAGE_NAME)?;

    // Step 6: order the components
    let ordered = order_components(
        investor,
        manager,
        beginning.clone(),
        manager_page.clone(),
        investor_pages_combined.clone(),
        ending.clone(),
    );

    // Step 7: final document
    let mut final_options = CombineListOptions::new(ordered, parent_dir(&options.clean_path));
    final_options.output_name = options.output_name();
    let components = combine_list(&final_options)?;

    log::info!("Final Combined PDF: {}", components.output.display());

    Ok(CompileSummary {
        output_path: components.output.clone(),
        investor_pages,
        investor_pages_combined,
        beginning,
        ending,
        manager_page,
        components,
    })
}

/// Page index as a slice bound, saturating at `i64::MAX`
fn page_offset(index: usize) -> i64 {
    i64::try_from(index).unwrap_or(i64::MAX)
}
