//! `dump.json`: every record, keyed by category then id

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use zomb::{AttributeMap, FinalizedStore};

pub const FILE_NAME: &str = "dump.json";

/// `{category: {id: {attribute: value}}}`, all keys sorted
pub fn dump(store: &FinalizedStore) -> BTreeMap<&'static str, BTreeMap<&str, &AttributeMap>> {
    store
        .counts()
        .into_iter()
        .filter(|&(_, count)| count > 0)
        .map(|(category, _)| {
            let records = store
                .records(category)
                .map(|r| (r.id.as_str(), &r.attributes))
                .collect();
            (category.name(), records)
        })
        .collect()
}

/// Write [`FILE_NAME`] into `dir`, pretty-printed
pub fn write(store: &FinalizedStore, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(FILE_NAME);
    let file =
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut out, &dump(store))
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    writeln!(out)?;
    out.flush()?;

    tracing::info!(path = %path.display(), "wrote json dump");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zomb::RecordStore;

    #[test]
    fn test_dump_shape() {
        let mut store = RecordStore::new();
        store.ingest(
            "item Zed { Type = Clothing, Weight = 1 } item Apple { Type = Food } item Hat { Type = Clothing }",
            "Hats: hats.txt",
        );
        let store = store.finalize();

        let value = serde_json::to_value(dump(&store)).unwrap();
        assert_eq!(value["Clothing"]["Zed"]["Weight"], "1");
        assert_eq!(value["Clothing"]["Hat"]["FromMod"], "Hats: hats.txt");
        assert_eq!(value["Skipped"]["Apple"]["Type"], "Food");
        assert!(value.get("Gun").is_none());

        // Ids come out sorted regardless of discovery order
        let ids: Vec<_> = value["Clothing"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(ids, vec!["Hat", "Zed"]);
    }

    #[test]
    fn test_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = RecordStore::new().finalize();

        let path = write(&store, dir.path()).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "{}\n");
    }
}
