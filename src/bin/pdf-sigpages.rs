//! PDF Signature Pages CLI tool
//!
//! A command-line tool for extracting, slicing and combining PDF pages to
//! compile a fully signed operating agreement.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;

use pdf_sigpages::compile::{compile_final_agreement, CompileOptions};
use pdf_sigpages::pdf::{
    combine_dir, combine_list, extract_metadata, extract_same_page, slice_pdf,
    CombineDirOptions, CombineListOptions, ExtractOptions, PageEnd, SliceOptions,
};

/// PDF Signature Pages - Extract and combine signature pages
#[derive(Parser)]
#[command(name = "pdf-sigpages")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Pull page 29 (index 28) out of every signed copy
    pdf-sigpages extract Indiv --page-number 28

    # Keep pages 3-5 of a PDF
    pdf-sigpages slice agreement.pdf --start-page 2 --end-page 5

    # Build the final agreement from a clean copy and the signed copies
    pdf-sigpages compile-final \"Clean OA.pdf\" Indiv 28 27")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a single page from each PDF in a directory
    Extract {
        /// Directory containing PDFs to extract from
        input_dir: PathBuf,

        /// Zero-indexed page number to extract
        #[arg(long, default_value_t = 0)]
        page_number: usize,

        /// Directory (next to the input directory) to save extracted pages
        #[arg(long, default_value = "Sig Pages")]
        sig_pages_output_dir: String,

        /// Prefix for output file names
        #[arg(long, default_value = "Sig Page - ")]
        output_prefix: String,
    },

    /// Combine all PDFs in a directory into a single PDF
    Combine {
        /// Directory containing PDFs to combine
        input_dir: PathBuf,

        /// Directory (next to the input directory) to save the combined PDF
        #[arg(long)]
        sig_pages_output_dir: Option<String>,

        /// Name of the combined PDF
        #[arg(long, default_value = "Sig Pages Combined.pdf")]
        output_name: String,
    },

    /// Slice a PDF into a new PDF containing a range of pages
    Slice {
        /// PDF file to slice
        input_file: PathBuf,

        /// Zero-indexed start page
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        start_page: i64,

        /// Zero-indexed end page (non-inclusive, -1 for the last page)
        #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
        end_page: i64,

        /// Directory (next to the input file) to save the sliced PDF
        #[arg(long)]
        sig_pages_output_dir: Option<String>,

        /// Name of the sliced PDF
        #[arg(long, default_value = "Sliced.pdf")]
        output_name: String,
    },

    /// Combine a list of PDFs, in the order given, into a single PDF
    CombineList {
        /// Input PDF files followed by the output directory
        #[arg(required = true, num_args = 2.., value_name = "PATHS")]
        paths: Vec<PathBuf>,

        /// Name of the combined PDF
        #[arg(long, default_value = "Combined.pdf")]
        output_name: String,
    },

    /// Compile a final signed operating agreement from a clean OA and signed OAs
    CompileFinal {
        /// Path to the clean operating agreement PDF
        clean_oa: PathBuf,

        /// Directory containing signed operating agreements
        signed_dir: PathBuf,

        /// Zero-indexed page number of the investor signature
        investor_sig_page: usize,

        /// Zero-indexed page number of the manager signature
        manager_sig_page: usize,

        /// Name of the final PDF (default: "<clean OA name> FINAL COMBINED.pdf")
        #[arg(long)]
        output_name: Option<String>,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Extract { input_dir, page_number, sig_pages_output_dir, output_prefix } => {
            let options = ExtractOptions {
                input_dir,
                page_index: page_number,
                output_dir_name: sig_pages_output_dir,
                output_prefix,
            };
            let report = extract_same_page(&options).with_context(|| {
                format!("Failed to extract pages from {}", options.input_dir.display())
            })?;
            println!("{}", report);
        }
        Commands::Combine { input_dir, sig_pages_output_dir, output_name } => {
            let options = CombineDirOptions {
                input_dir,
                output_dir_name: sig_pages_output_dir,
                output_name,
            };
            let report = combine_dir(&options).with_context(|| {
                format!("Failed to combine PDFs in {}", options.input_dir.display())
            })?;
            println!("{}", report);
        }
        Commands::Slice { input_file, start_page, end_page, sig_pages_output_dir, output_name } => {
            let options = SliceOptions {
                input_path: input_file,
                start: start_page,
                end: PageEnd::from(end_page),
                output_dir_name: sig_pages_output_dir,
                output_name,
            };
            let output = slice_pdf(&options)
                .with_context(|| format!("Failed to slice {}", options.input_path.display()))?;
            println!("{}", output.display());
        }
        Commands::CombineList { mut paths, output_name } => {
            let output_dir = paths.pop().context("Missing output directory")?;
            let options = CombineListOptions {
                input_paths: paths,
                output_dir,
                output_name,
            };
            let report = combine_list(&options).context("Failed to combine PDFs")?;
            println!("{}", report);
        }
        Commands::CompileFinal {
            clean_oa, signed_dir, investor_sig_page, manager_sig_page, output_name,
        } => {
            let options = CompileOptions {
                output_name,
                ..CompileOptions::new(clean_oa, signed_dir, investor_sig_page, manager_sig_page)
            };
            let summary = compile_final_agreement(&options).with_context(|| {
                format!("Failed to compile {}", options.clean_path.display())
            })?;
            println!("{}", summary.output_path.display());
        }
        Commands::Info { input } => {
            let metadata = extract_metadata(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;

            println!("File: {}", input.display());
            println!("Pages: {}", metadata.page_count);

            if let Some(title) = metadata.title {
                println!("Title: {}", title);
            }
            if let Some(author) = metadata.author {
                println!("Author: {}", author);
            }
        }
    }

    Ok(())
}
