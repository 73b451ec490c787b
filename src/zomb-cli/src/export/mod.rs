//! Exporters for a finalized record store
//!
//! Exporters only read the store; classification and attachment linking are
//! done by the time anything is written.

pub mod columns;
pub mod csv;
pub mod json;
pub mod wiki;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use zomb::FinalizedStore;

use crate::cli::ExportFormat;

pub const MOD_FOLDERS_FILE: &str = "scanned_mod_folders.txt";

/// What to write and where
#[derive(Debug, Clone)]
pub struct ExportPlan<'a> {
    pub dir: &'a Path,
    pub formats: &'a [ExportFormat],
    pub split_guns_by_ammo: bool,
}

/// Write every requested format, creating the output directory first
pub fn write_all(store: &FinalizedStore, plan: &ExportPlan<'_>) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(plan.dir)
        .with_context(|| format!("Failed to create output directory {}", plan.dir.display()))?;

    let mut written = Vec::new();

    if plan.formats.contains(&ExportFormat::Csv) {
        written.extend(csv::write_category_files(store, plan.dir)?);
        if plan.split_guns_by_ammo {
            written.extend(csv::write_guns_by_ammo(store, plan.dir)?);
        }
    }
    if plan.formats.contains(&ExportFormat::Wiki) {
        written.push(wiki::write(store, plan.dir)?);
    }
    if plan.formats.contains(&ExportFormat::Json) {
        written.push(json::write(store, plan.dir)?);
    }

    Ok(written)
}

/// Write one scanned mod folder name per line
pub fn write_mod_folders(mod_folders: &[String], dir: &Path) -> Result<PathBuf> {
    let path = dir.join(MOD_FOLDERS_FILE);
    fs::write(&path, mod_folders.join("\n"))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
