//! Scan command handler
//!
//! Discovers scriptfiles, parses them in parallel, merges them in discovery
//! order and writes the requested exports.

use anyhow::{bail, Result};
use encoding_rs::Encoding;
use rayon::prelude::*;
use std::path::PathBuf;
use zomb::{Category, FinalizedStore, ParsedDocument, RecordStore};

use crate::cli::ExportFormat;
use crate::config::Config;
use crate::decode;
use crate::discovery::{self, Scriptfile};
use crate::export::{self, ExportPlan};

pub struct ScanOptions {
    pub file: Option<PathBuf>,
    pub workshop_dir: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub formats: Vec<ExportFormat>,
    pub split_guns_by_ammo: bool,
}

/// Totals reported at the end of a scan
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub documents: usize,
    pub unreadable: usize,
    pub warnings: usize,
    pub abandoned: usize,
}

/// Handle the scan command
pub fn handle(options: ScanOptions) -> Result<()> {
    if options.file.is_none() && options.workshop_dir.is_none() {
        bail!("Nothing to scan: pass --file or --workshop-dir");
    }

    let config = Config::load()?;
    let encodings = decode::resolve_encodings(&config.encodings)?;

    let mut sources = Vec::new();
    let mut mod_folders = None;

    if let Some(file) = options.file {
        sources.push(Scriptfile::standalone(file));
    }
    if let Some(dir) = &options.workshop_dir {
        let found = discovery::discover(dir, &config.blacklist)?;
        println!(
            "Found {} scriptfiles in {} mods ({} blacklisted)",
            found.scriptfiles.len(),
            found.mod_folders.len(),
            found.blacklisted
        );
        sources.extend(found.scriptfiles);
        mod_folders = Some(found.mod_folders);
    }

    let (store, summary) = scan(&sources, &encodings);

    let dir = config.output_dir(options.output);
    let plan = ExportPlan {
        dir: &dir,
        formats: &options.formats,
        split_guns_by_ammo: options.split_guns_by_ammo,
    };
    let mut written = export::write_all(&store, &plan)?;
    if let Some(mod_folders) = mod_folders {
        written.push(export::write_mod_folders(&mod_folders, &dir)?);
    }

    print_summary(&store, &summary);
    println!();
    println!("Wrote {} files to {}", written.len(), dir.display());

    Ok(())
}

/// Parse every source on the rayon pool, then merge in discovery order
pub fn scan(sources: &[Scriptfile], encodings: &[&'static Encoding]) -> (FinalizedStore, ScanSummary) {
    let parsed: Vec<Option<ParsedDocument>> = sources
        .par_iter()
        .map(|source| load(source, encodings))
        .collect();

    let mut store = RecordStore::new();
    let mut summary = ScanSummary::default();

    for document in parsed {
        let Some(document) = document else {
            summary.unreadable += 1;
            continue;
        };

        let report = store.merge(document);
        summary.documents += 1;
        summary.warnings += report.warnings.len();
        if report.failure.is_some() {
            summary.abandoned += 1;
        }
    }

    (store.finalize(), summary)
}

fn load(source: &Scriptfile, encodings: &[&'static Encoding]) -> Option<ParsedDocument> {
    let tag = source.source_tag();

    match decode::read_scriptfile(&source.path, encodings) {
        Ok(text) => Some(zomb::parse_document(&text, &tag)),
        Err(e) => {
            tracing::warn!(source = %tag, "Skipping unreadable scriptfile: {e:#}");
            None
        }
    }
}

fn print_summary(store: &FinalizedStore, summary: &ScanSummary) {
    println!();
    println!("Scanned {} scriptfiles", summary.documents);
    if summary.unreadable > 0 {
        println!("  {} could not be read", summary.unreadable);
    }
    if summary.abandoned > 0 {
        println!("  {} stopped early on unbalanced braces", summary.abandoned);
    }
    if summary.warnings > 0 {
        println!("  {} warnings (run with -v for details)", summary.warnings);
    }

    println!();
    for (category, count) in store.counts() {
        if category == Category::Skipped {
            println!("{:<12} {:>6} (not exported)", category.name(), count);
        } else {
            println!("{:<12} {:>6}", category.name(), count);
        }
    }

    let resolved = store.resolve_summary();
    println!(
        "Attachments linked to {} guns ({} unknown weapon ids)",
        resolved.linked, resolved.dangling
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn encodings() -> Vec<&'static Encoding> {
        decode::resolve_encodings(&["utf-8".into(), "windows-1252".into()]).unwrap()
    }

    fn source(dir: &std::path::Path, mod_name: &str, file: &str, contents: &[u8]) -> Scriptfile {
        let path = dir.join(format!("{mod_name}_{file}"));
        fs::write(&path, contents).unwrap();
        Scriptfile {
            path,
            mod_name: Some(mod_name.to_string()),
        }
    }

    #[test]
    fn test_later_mods_override_earlier() {
        let dir = tempdir().unwrap();
        let sources = vec![
            source(dir.path(), "Vanilla", "guns.txt", b"item Pistol { Type = Weapon, IsAimedFirearm = TRUE, Weight = 1 }"),
            source(dir.path(), "Parts", "parts.txt", b"item Scope { Type = WeaponPart, MountOn = Pistol }"),
            source(dir.path(), "Rebalance", "guns.txt", b"item Pistol { Type = Weapon, IsAimedFirearm = TRUE, Weight = 2 }"),
        ];

        let (store, summary) = scan(&sources, &encodings());

        assert_eq!(summary.documents, 3);
        let pistol = store.get(Category::Gun, "Pistol").unwrap();
        assert_eq!(pistol.get("Weight"), Some("2"));
        assert_eq!(pistol.get("FromMod"), Some("Rebalance: guns.txt"));
        assert_eq!(pistol.get("AttachmentsList"), Some("Scope"));
    }

    #[test]
    fn test_unreadable_files_are_counted_and_skipped() {
        let dir = tempdir().unwrap();
        let mut sources = vec![source(dir.path(), "Hats", "hats.txt", b"item Hat { Type = Clothing }")];
        sources.push(Scriptfile::standalone(dir.path().join("missing.txt")));

        let (store, summary) = scan(&sources, &encodings());

        assert_eq!(summary.documents, 1);
        assert_eq!(summary.unreadable, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_legacy_codepage_decoded() {
        let dir = tempdir().unwrap();
        let sources = vec![source(
            dir.path(),
            "French",
            "items.txt",
            b"item Beret { Type = Clothing, DisplayName = B\xE9ret }",
        )];

        let (store, _) = scan(&sources, &encodings());
        let beret = store.get(Category::Clothing, "Beret").unwrap();
        assert_eq!(beret.get("DisplayName"), Some("Béret"));
    }

    #[test]
    fn test_warnings_and_abandoned_documents_counted() {
        let dir = tempdir().unwrap();
        let sources = vec![
            source(dir.path(), "A", "dup.txt", b"item Hat { Type = Clothing, Weight = 1, Weight = 2 }"),
            source(dir.path(), "B", "broken.txt", b"item Cap { Type = Clothing } }"),
        ];

        let (store, summary) = scan(&sources, &encodings());

        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.abandoned, 1);
        assert_eq!(store.counts()[&Category::Clothing], 2);
    }

    #[test]
    fn test_handle_requires_a_source() {
        let options = ScanOptions {
            file: None,
            workshop_dir: None,
            output: None,
            formats: ExportFormat::ALL.to_vec(),
            split_guns_by_ammo: false,
        };
        assert!(handle(options).is_err());
    }
}
