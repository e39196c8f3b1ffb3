//! End-to-end tests for the certkit binary.

use std::path::Path;

use assert_cmd::Command;
use lopdf::content::Content;
use lopdf::{Document, Object, Stream, dictionary};
use predicates::prelude::*;

/// Write a minimal one-page PDF with no text content.
fn write_blank_pdf(path: &Path) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let content = Content {
        operations: Vec::new(),
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {},
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
fn test_process_missing_input_fails() {
    Command::cargo_bin("certkit")
        .unwrap()
        .args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_process_textless_pdf_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("blank.pdf");
    write_blank_pdf(&path);

    // Per-page extraction finds nothing, and the whole-document pass
    // comes back empty too.
    Command::cargo_bin("certkit")
        .unwrap()
        .args(["process", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no extractable text"));
}

#[test]
fn test_batch_no_matches_fails() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("certkit")
        .unwrap()
        .args(["batch", &format!("{}/*.pdf", dir.path().display())])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching PDF files"));
}

#[test]
fn test_config_path_prints_location() {
    Command::cargo_bin("certkit")
        .unwrap()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"));
}
