//! Parse command handler
//!
//! Runs one scriptfile through the per-document pipeline and prints every
//! record, skipped ones included. Handy for checking how a mod's items will be
//! classified before a full scan.

use anyhow::{Context, Result};
use std::path::Path;
use zomb::ParsedDocument;

use crate::config::Config;
use crate::decode;
use crate::discovery::Scriptfile;

/// Handle the parse command
pub fn handle(file: &Path) -> Result<()> {
    let config = Config::load()?;
    let encodings = decode::resolve_encodings(&config.encodings)?;

    let text = decode::read_scriptfile(file, &encodings)?;
    let tag = Scriptfile::standalone(file.to_path_buf()).source_tag();
    let document = zomb::parse_document(&text, &tag);

    println!("{}", to_json(&document)?);
    report(&document);

    Ok(())
}

fn to_json(document: &ParsedDocument) -> Result<String> {
    serde_json::to_string_pretty(&document.records).context("Failed to serialize records")
}

/// Diagnostics go to stderr so stdout stays valid JSON
fn report(document: &ParsedDocument) {
    for warning in &document.warnings {
        eprintln!("warning: {warning}");
    }
    if let Some(failure) = &document.failure {
        eprintln!("error: {failure}");
    }
    eprintln!(
        "{} records, {} warnings",
        document.records.len(),
        document.warnings.len()
    );
}
