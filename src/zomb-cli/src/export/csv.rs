//! CSV spreadsheets, one per category

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use zomb::{known, Category, FinalizedStore, Record};

use super::columns;

/// Escape a string for CSV output (RFC 4180 quoting)
pub fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Write a header row and one row per record; absent attributes stay empty
pub fn write_table<'a, W: Write>(
    out: &mut W,
    columns: &[&str],
    records: impl IntoIterator<Item = &'a Record>,
) -> std::io::Result<()> {
    let header: Vec<_> = columns.iter().map(|c| escape_csv(c)).collect();
    writeln!(out, "{}", header.join(","))?;

    for record in records {
        let row: Vec<_> = columns
            .iter()
            .map(|c| escape_csv(record.get(c).unwrap_or_default()))
            .collect();
        writeln!(out, "{}", row.join(","))?;
    }

    Ok(())
}

/// Write `<Category>.csv` for every exported category, empty ones included
pub fn write_category_files(store: &FinalizedStore, dir: &Path) -> Result<Vec<PathBuf>> {
    Category::EXPORTED
        .into_iter()
        .map(|category| {
            let path = dir.join(format!("{category}.csv"));
            write_file(&path, columns::for_category(category), store.records(category))?;
            Ok(path)
        })
        .collect()
}

/// Write `Gun (<ammo>).csv` per ammo type, `Base.` prefix stripped
///
/// Guns without an `AmmoType` are left out.
pub fn write_guns_by_ammo(store: &FinalizedStore, dir: &Path) -> Result<Vec<PathBuf>> {
    let mut by_ammo: BTreeMap<&str, Vec<&Record>> = BTreeMap::new();
    for gun in store.records(Category::Gun) {
        if let Some(ammo) = gun.get(known::AMMO_TYPE) {
            by_ammo.entry(ammo_name(ammo)).or_default().push(gun);
        }
    }

    by_ammo
        .into_iter()
        .map(|(ammo, guns)| {
            let path = dir.join(format!("Gun ({}).csv", file_safe(ammo)));
            write_file(&path, columns::GUN, guns)?;
            Ok(path)
        })
        .collect()
}

fn ammo_name(ammo_type: &str) -> &str {
    let ammo = ammo_type.trim();
    ammo.strip_prefix("Base.").unwrap_or(ammo)
}

fn file_safe(name: &str) -> String {
    name.chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect()
}

fn write_file<'a>(
    path: &Path,
    columns: &[&str],
    records: impl IntoIterator<Item = &'a Record>,
) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    write_table(&mut out, columns, records)
        .and_then(|()| out.flush())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), "wrote spreadsheet");
    Ok(())
}
