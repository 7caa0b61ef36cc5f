//! PDF Signature Pages Library
//!
//! Extracts, slices and recombines PDF pages to assemble a finished signed
//! agreement from individually signed copies.
//! This library provides functionality to:
//! - Extract the same page from every PDF in a directory
//! - Combine a directory (or an explicit list) of PDFs into one
//! - Slice a page range out of a PDF
//! - Compile the final agreement from a clean copy and the signed copies
//!
//! # Example
//!
//! ```no_run
//! use pdf_sigpages::compile::{compile_final_agreement, CompileOptions};
//!
//! let options = CompileOptions::new("Clean OA.pdf", "Signed", 28, 27);
//! let summary = compile_final_agreement(&options).expect("Failed to compile");
//! println!("{}", summary.output_path.display());
//! ```

pub mod error;
pub mod files;
pub mod report;
pub mod pdf;
pub mod compile;

// Re-export commonly used items
pub use error::{Error, Result};
pub use report::{BatchReport, FileOutcome, FileReport, SkipReason};
