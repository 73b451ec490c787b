//! Scriptfile decoding
//!
//! Mods ship scriptfiles in whatever codepage their author's editor used.
//! Each file is decoded strictly with every configured encoding in turn; the
//! first one that decodes without errors wins.

use anyhow::{bail, Context, Result};
use encoding_rs::Encoding;
use std::fs;
use std::path::Path;

/// Look up encoding labels (`utf-8`, `windows-1252`, `latin1`, ...)
pub fn resolve_encodings(labels: &[String]) -> Result<Vec<&'static Encoding>> {
    if labels.is_empty() {
        bail!("No encodings configured");
    }

    labels
        .iter()
        .map(|label| {
            Encoding::for_label(label.trim().as_bytes())
                .with_context(|| format!("Unknown encoding `{label}`"))
        })
        .collect()
}

/// Decode bytes with the first encoding that accepts them
///
/// A leading UTF-8 BOM is dropped. Returns `None` if no encoding fits.
pub fn decode(bytes: &[u8], encodings: &[&'static Encoding]) -> Option<(String, &'static Encoding)> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    encodings.iter().find_map(|&encoding| {
        match encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            Some(text) => Some((text.into_owned(), encoding)),
            None => {
                tracing::debug!(encoding = encoding.name(), "decode failed, trying next encoding");
                None
            }
        }
    })
}

/// Read and decode a scriptfile
pub fn read_scriptfile(path: &Path, encodings: &[&'static Encoding]) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

    match decode(&bytes, encodings) {
        Some((text, encoding)) => {
            tracing::trace!(path = %path.display(), encoding = encoding.name(), "decoded");
            Ok(text)
        }
        None => bail!(
            "Could not decode {} with any of: {}",
            path.display(),
            encodings.iter().map(|e| e.name()).collect::<Vec<_>>().join(", ")
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1250, WINDOWS_1252};

    fn defaults() -> Vec<&'static Encoding> {
        resolve_encodings(&["utf-8".into(), "windows-1252".into(), "windows-1250".into()]).unwrap()
    }

    #[test]
    fn test_resolve_labels() {
        assert_eq!(defaults(), vec![UTF_8, WINDOWS_1252, WINDOWS_1250]);
        // WHATWG maps latin1 onto windows-1252
        assert_eq!(resolve_encodings(&["latin1".into()]).unwrap(), vec![WINDOWS_1252]);
    }

    #[test]
    fn test_resolve_unknown_label() {
        let err = resolve_encodings(&["klingon".into()]).unwrap_err();
        assert!(err.to_string().contains("klingon"));
        assert!(resolve_encodings(&[]).is_err());
    }

    #[test]
    fn test_utf8_first() {
        let (text, encoding) = decode("DisplayName = Café".as_bytes(), &defaults()).unwrap();
        assert_eq!(text, "DisplayName = Café");
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn test_falls_back_to_windows_1252() {
        // 0xE9 is 'é' in windows-1252 and invalid on its own in UTF-8
        let (text, encoding) = decode(b"DisplayName = Caf\xE9", &defaults()).unwrap();
        assert_eq!(text, "DisplayName = Café");
        assert_eq!(encoding, WINDOWS_1252);
    }

    #[test]
    fn test_nothing_fits() {
        assert!(decode(b"\xFF\xFE", &[UTF_8]).is_none());
    }

    #[test]
    fn test_bom_dropped() {
        let (text, _) = decode(b"\xEF\xBB\xBFitem A {}", &defaults()).unwrap();
        assert_eq!(text, "item A {}");
    }

    #[test]
    fn test_read_scriptfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("items.txt");
        fs::write(&path, b"item Hat { DisplayName = Chapeau \xE0 plume }").unwrap();

        let text = read_scriptfile(&path, &defaults()).unwrap();
        assert!(text.contains("Chapeau à plume"));

        let err = read_scriptfile(&path, &[UTF_8]).unwrap_err();
        assert!(err.to_string().contains("Could not decode"));
    }
}
