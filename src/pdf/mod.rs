//! PDF page operations

pub mod assemble;
pub mod extract;
pub mod combine;
pub mod slice;
pub mod metadata;

// Re-export commonly used items
pub use assemble::PageAssembler;
pub use extract::{extract_same_page, ExtractOptions};
pub use combine::{combine_dir, combine_list, CombineDirOptions, CombineListOptions};
pub use slice::{resolve_range, slice_pdf, PageEnd, SliceOptions};
pub use metadata::{count_pages, extract_metadata, PdfMetadata};
