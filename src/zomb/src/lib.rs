//! # zomb
//!
//! Parser for Project Zomboid scriptfiles - the curly-brace, comma-separated
//! item definition dialect shipped in `media/scripts/*.txt`.
//!
//! This library provides functionality to:
//! - Normalize raw scriptfile text (comments, separators, tabs)
//! - Extract `item <id> { ... }` blocks and their attribute payloads
//! - Classify items into guns, melee weapons, clothing, bags and attachments
//! - Aggregate records from many mods and link attachments to their guns
//!
//! ## Example
//!
//! ```
//! use zomb::{Category, RecordStore};
//!
//! let mut store = RecordStore::new();
//! let report = store.ingest(
//!     r#"
//!     module Base {
//!         item Ruger1022 { Type = Weapon, IsAimedFirearm = TRUE, DisplayName = Ruger 10/22, }
//!         item RedDot { Type = WeaponPart, MountOn = Ruger1022; M14, }
//!     }
//!     "#,
//!     "Vanilla: weapons.txt",
//! );
//! assert_eq!(report.added, 2);
//!
//! let store = store.finalize();
//! let gun = store.get(Category::Gun, "Ruger1022").unwrap();
//! assert_eq!(gun.get("AttachmentsList"), Some("RedDot"));
//! ```

pub mod attributes;
pub mod block;
pub mod classify;
pub mod document;
pub mod normalize;
pub mod record;
pub mod resolve;
pub mod store;

#[doc(inline)]
pub use attributes::{known, parse_attributes, AttributeMap, Duplicate, ParsedAttributes};
#[doc(inline)]
pub use block::{extract_blocks, Block, Extracted, Extraction, MalformedReason, NestedBlock};
#[doc(inline)]
pub use classify::{classify, classify_record};
#[doc(inline)]
pub use document::{parse_document, ParsedDocument, Warning};
#[doc(inline)]
pub use normalize::normalize;
#[doc(inline)]
pub use record::{Category, CategoryParseError, Record};
#[doc(inline)]
pub use resolve::{attachment_links, AttachmentLinks, ResolveSummary};
#[doc(inline)]
pub use store::{CategoryTable, FinalizedStore, IngestReport, RecordStore};

/// Characters of surrounding text captured on either side of a fault
pub const CONTEXT_RADIUS: usize = 40;

/// Errors that abandon the rest of a document
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unbalanced closing brace at offset {offset}: ...{context}...")]
    Structural { offset: usize, context: String },
}

impl Error {
    /// Build a structural error with a window of text around `offset`
    pub fn structural(text: &str, offset: usize) -> Self {
        Error::Structural {
            offset,
            context: context_window(text, offset),
        }
    }
}

/// Slice up to [`CONTEXT_RADIUS`] bytes either side of `offset`, snapped to char boundaries
fn context_window(text: &str, offset: usize) -> String {
    let offset = offset.min(text.len());

    let mut start = offset.saturating_sub(CONTEXT_RADIUS);
    while !text.is_char_boundary(start) {
        start -= 1;
    }

    let mut end = (offset + CONTEXT_RADIUS).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }

    text[start..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_window_clamps_to_text() {
        assert_eq!(context_window("abc}", 3), "abc}");
    }

    #[test]
    fn test_context_window_radius() {
        let text = format!("{}}}{}", "a".repeat(100), "b".repeat(100));
        let window = context_window(&text, 100);

        assert_eq!(window.len(), CONTEXT_RADIUS * 2);
        assert!(window.starts_with('a'));
        assert!(window.contains('}'));
    }

    #[test]
    fn test_context_window_multibyte() {
        // 'é' is two bytes; offsets landing inside it must snap outward
        let text = "é".repeat(60);
        let window = context_window(&text, 41);
        assert!(window.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_structural_display() {
        let err = Error::structural("x = 1 }", 6);
        let msg = err.to_string();
        assert!(msg.contains("offset 6"));
        assert!(msg.contains("x = 1 }"));
    }
}
