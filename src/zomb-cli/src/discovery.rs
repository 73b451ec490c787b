//! Scriptfile discovery in a Steam workshop tree
//!
//! Layout scanned, below `workshop/content/108600`:
//!
//! ```text
//! <workshop item>/mods/<mod>/media/scripts/*.txt
//! <workshop item>/mods/<mod>/media/scripts/<subdir>/*.txt
//! ```

use anyhow::{bail, Context, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Steam app id of Project Zomboid
pub const APP_ID: &str = "108600";

const SCRIPT_EXTENSION: &str = "txt";

/// A scriptfile and the mod it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scriptfile {
    pub path: PathBuf,
    pub mod_name: Option<String>,
}

impl Scriptfile {
    /// A file given directly on the command line
    pub fn standalone(path: PathBuf) -> Self {
        Self {
            path,
            mod_name: None,
        }
    }

    /// Provenance tag: `<mod>: <file name>`, or just the file name
    pub fn source_tag(&self) -> String {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());

        match &self.mod_name {
            Some(mod_name) => format!("{mod_name}: {file_name}"),
            None => file_name,
        }
    }
}

/// Everything found under a workshop directory
#[derive(Debug, Default)]
pub struct Discovery {
    pub scriptfiles: Vec<Scriptfile>,
    /// Mods with a `media/scripts` folder, in scan order
    pub mod_folders: Vec<String>,
    /// Files dropped because a path component is blacklisted
    pub blacklisted: usize,
}

/// Descend from `workshop` or `workshop/content` to the app's content dir
pub fn content_root(dir: &Path) -> PathBuf {
    let mut root = dir.to_path_buf();

    if root.file_name() == Some(OsStr::new("workshop")) {
        root.push("content");
    }
    if root.file_name() == Some(OsStr::new("content")) {
        root.push(APP_ID);
    }

    root
}

/// Check whether any component of `path` is on the blacklist
pub fn is_blacklisted(path: &Path, blacklist: &[String]) -> bool {
    path.components()
        .any(|c| blacklist.iter().any(|b| c.as_os_str() == OsStr::new(b)))
}

/// Find every mod scriptfile under a workshop directory
///
/// Workshop items and mods are visited in name order so output is stable
/// between runs.
pub fn discover(workshop_dir: &Path, blacklist: &[String]) -> Result<Discovery> {
    let root = content_root(workshop_dir);
    if !root.is_dir() {
        bail!("Workshop content directory not found: {}", root.display());
    }

    let mut discovery = Discovery::default();

    for item_dir in sorted_subdirs(&root)? {
        let mods_dir = item_dir.join("mods");
        if !mods_dir.is_dir() {
            tracing::debug!(item = %item_dir.display(), "workshop item has no mods folder");
            continue;
        }

        for mod_dir in sorted_subdirs(&mods_dir)? {
            let scripts_dir = mod_dir.join("media").join("scripts");
            if !scripts_dir.is_dir() {
                continue;
            }

            let mod_name = mod_dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            tracing::info!(mod_name = %mod_name, "found scripts folder");

            for path in scripts_in(&scripts_dir) {
                if is_blacklisted(&path, blacklist) {
                    tracing::debug!(path = %path.display(), "skipping blacklisted scriptfile");
                    discovery.blacklisted += 1;
                    continue;
                }
                discovery.scriptfiles.push(Scriptfile {
                    path,
                    mod_name: Some(mod_name.clone()),
                });
            }
            discovery.mod_folders.push(mod_name);
        }
    }

    Ok(discovery)
}

/// `.txt` files directly in `scripts_dir` or one directory below
fn scripts_in(scripts_dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(scripts_dir)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case(SCRIPT_EXTENSION))
        })
        .map(|e| e.into_path())
        .collect()
}

fn sorted_subdirs(path: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();

    for entry in std::fs::read_dir(path)
        .with_context(|| format!("Failed to list {}", path.display()))?
    {
        let subpath = entry?.path();
        if subpath.is_dir() {
            dirs.push(subpath);
        }
    }

    dirs.sort();
    Ok(dirs)
}
