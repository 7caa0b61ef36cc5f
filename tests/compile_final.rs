//! End-to-end tests for compiling the final signed agreement

mod common;

use common::{labels, page_label, page_labels, write_pdf};
use pdf_sigpages::compile::{compile_final_agreement, CompileOptions};
use pdf_sigpages::pdf::count_pages;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const CLEAN_PAGES: usize = 6;
const INVESTORS: [&str; 3] = ["Investor A", "Investor B", "Investor C"];

/// A clean agreement plus one signed copy per investor
fn agreement_fixture(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let clean = write_pdf(&temp_dir.path().join("Fund OA.pdf"), "clean", CLEAN_PAGES);
    let signed = temp_dir.path().join("Indiv");
    fs::create_dir(&signed).unwrap();
    for name in INVESTORS {
        write_pdf(&signed.join(format!("{}.pdf", name)), name, CLEAN_PAGES);
    }
    (clean, signed)
}

fn investor_pages(index: usize) -> Vec<String> {
    INVESTORS.iter().map(|name| page_label(name, index)).collect()
}

#[test]
fn test_compile_manager_page_before_investor_page() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (clean, signed) = agreement_fixture(&temp_dir);

    let summary = compile_final_agreement(&CompileOptions::new(&clean, &signed, 4, 3))
        .expect("Failed to compile");

    assert_eq!(summary.output_path, temp_dir.path().join("Fund OA FINAL COMBINED.pdf"));
    assert_eq!(count_pages(&summary.output_path).unwrap(), CLEAN_PAGES - 1 + INVESTORS.len());

    let mut expected = labels("clean", 0..3);
    expected.push(page_label("clean", 3));
    expected.extend(investor_pages(4));
    expected.extend(labels("clean", 5..6));
    assert_eq!(page_labels(&summary.output_path), expected);
}

#[test]
fn test_compile_manager_page_after_investor_page() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (clean, signed) = agreement_fixture(&temp_dir);

    let summary = compile_final_agreement(&CompileOptions::new(&clean, &signed, 3, 4))
        .expect("Failed to compile");

    let mut expected = labels("clean", 0..3);
    expected.extend(investor_pages(3));
    expected.push(page_label("clean", 4));
    expected.extend(labels("clean", 5..6));
    assert_eq!(page_labels(&summary.output_path), expected);
}

#[test]
fn test_compile_leaves_intermediate_files() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (clean, signed) = agreement_fixture(&temp_dir);

    let summary = compile_final_agreement(&CompileOptions::new(&clean, &signed, 4, 3))
        .expect("Failed to compile");

    let root = temp_dir.path();
    assert_eq!(summary.investor_pages.output, root.join("Investor Sig Pages"));
    assert_eq!(summary.investor_pages.copied(), INVESTORS.len());
    assert_eq!(summary.investor_pages_combined, root.join("Investor Sig Pages Combined.pdf"));
    assert_eq!(summary.beginning, root.join("OA Beginning.pdf"));
    assert_eq!(summary.ending, root.join("OA Ending.pdf"));
    assert_eq!(summary.manager_page, root.join("Manager Signature Page.pdf"));
    assert_eq!(summary.components.failed(), 0);

    assert_eq!(page_labels(&summary.investor_pages_combined), investor_pages(4));
    assert_eq!(page_labels(&summary.beginning), labels("clean", 0..3));
    assert_eq!(page_labels(&summary.ending), labels("clean", 5..6));
    assert_eq!(page_labels(&summary.manager_page), labels("clean", 3..4));
}

#[test]
fn test_compile_with_explicit_name_and_short_copy() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (clean, signed) = agreement_fixture(&temp_dir);
    write_pdf(&signed.join("Investor D.pdf"), "Investor D", 2);

    let options = CompileOptions {
        output_name: Some("Signed.pdf".to_string()),
        ..CompileOptions::new(&clean, &signed, 4, 3)
    };
    let summary = compile_final_agreement(&options).expect("Failed to compile");

    assert_eq!(summary.output_path, temp_dir.path().join("Signed.pdf"));
    assert_eq!(summary.investor_pages.skipped(), 1);
    assert_eq!(count_pages(&summary.output_path).unwrap(), CLEAN_PAGES - 1 + INVESTORS.len());
}

#[test]
fn test_compile_signature_pages_at_document_edges() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (clean, signed) = agreement_fixture(&temp_dir);

    let summary = compile_final_agreement(&CompileOptions::new(&clean, &signed, 0, 1))
        .expect("Failed to compile");

    let mut expected = investor_pages(0);
    expected.push(page_label("clean", 1));
    expected.extend(labels("clean", 2..CLEAN_PAGES));
    assert_eq!(page_labels(&summary.output_path), expected);
}

#[test]
fn test_compile_non_adjacent_signature_pages() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (clean, signed) = agreement_fixture(&temp_dir);

    // Pages 2 and 3 sit between the signature pages and are left out
    let summary = compile_final_agreement(&CompileOptions::new(&clean, &signed, 1, 4))
        .expect("Failed to compile");

    let mut expected = labels("clean", 0..1);
    expected.extend(investor_pages(1));
    expected.push(page_label("clean", 4));
    expected.extend(labels("clean", 5..6));
    assert_eq!(page_labels(&summary.output_path), expected);

    let summary = compile_final_agreement(&CompileOptions::new(&clean, &signed, 4, 1))
        .expect("Failed to compile");

    let mut expected = labels("clean", 0..2);
    expected.extend(investor_pages(4));
    expected.extend(labels("clean", 5..6));
    assert_eq!(page_labels(&summary.output_path), expected);
}

#[test]
fn test_compile_page_index_past_usize_range() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (clean, signed) = agreement_fixture(&temp_dir);

    let summary = compile_final_agreement(&CompileOptions::new(&clean, &signed, usize::MAX, 1))
        .expect("Failed to compile");

    assert_eq!(summary.investor_pages.copied(), 0);
    assert_eq!(summary.investor_pages.skipped(), INVESTORS.len());
    assert!(page_labels(&summary.ending).is_empty());
    assert_eq!(page_labels(&summary.output_path), labels("clean", 0..2));

    let summary = compile_final_agreement(&CompileOptions::new(&clean, &signed, 1, usize::MAX))
        .expect("Failed to compile");

    assert!(page_labels(&summary.manager_page).is_empty());
    let mut expected = labels("clean", 0..1);
    expected.extend(investor_pages(1));
    assert_eq!(page_labels(&summary.output_path), expected);
}

#[test]
fn test_compile_missing_clean_agreement_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let (_, signed) = agreement_fixture(&temp_dir);

    let options = CompileOptions::new(temp_dir.path().join("missing.pdf"), &signed, 4, 3);
    assert!(compile_final_agreement(&options).is_err());
}

#[test]
fn test_compile_real_agreement() {
    // Uses a real agreement when one is provided:
    // tests/test_data/$CLEAN_OA_FILENAME plus signed copies in tests/test_data/Indiv
    let Ok(clean_name) = std::env::var("CLEAN_OA_FILENAME") else {
        eprintln!("Skipping real agreement test: CLEAN_OA_FILENAME not set");
        return;
    };

    let test_data = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("test_data");
    let clean = test_data.join(&clean_name);
    let signed = test_data.join("Indiv");
    if !clean.exists() || !signed.is_dir() {
        eprintln!("Skipping real agreement test: test data not found");
        return;
    }

    let investor_page = 28;
    let manager_page = 27;
    let summary = compile_final_agreement(&CompileOptions::new(
        &clean,
        &signed,
        investor_page,
        manager_page,
    ))
    .expect("Failed to compile real agreement");

    let expected = count_pages(&clean).unwrap() - 1 + summary.investor_pages.copied();
    assert_eq!(count_pages(&summary.output_path).unwrap(), expected);
}
