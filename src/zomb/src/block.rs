//! Block extraction from normalized scriptfile text
//!
//! A scriptfile is a sequence of brace-delimited blocks, usually wrapped in a
//! `module Base { ... }` block:
//!
//! ```text
//! module Base
//! {
//!     imports { Base }
//!
//!     item Axe
//!     {
//!         Type = Weapon,
//!         DisplayName = Axe,
//!     }
//! }
//! ```
//!
//! The extractor walks the text once, tracking brace depth, and recognizes an
//! `item` header wherever a statement can start (beginning of text, or after
//! `{`, `}` or `,`). Braces are depth-matched, so item blocks are found at any
//! nesting level. Sub-blocks nested inside an item body (`component X { ... }`)
//! are excised from the payload together with their header; only their
//! headers are kept, in [`Block::nested`].
//!
//! Everything else (module headers, imports, recipes) is skipped.

use crate::Error;

/// Keyword that opens an item definition
pub const ITEM_KEYWORD: &str = "item";

/// An item block sliced out of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Header text before the opening brace (e.g. `item Axe`)
    pub header: String,
    /// Item identifier from the header
    pub id: String,
    /// Attribute payload between the braces, nested sub-blocks excised
    pub body: String,
    /// Sub-blocks excised from the payload
    pub nested: Vec<NestedBlock>,
    /// Byte offset of the header in the normalized text
    pub offset: usize,
}

/// A sub-block cut out of an item body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedBlock {
    /// Header text before the sub-block's opening brace (e.g. `component FluidContainer`)
    pub header: String,
    /// Byte offset of the header in the normalized text
    pub offset: usize,
}

impl NestedBlock {
    /// An `item` header here means the enclosing item was never closed
    pub fn is_item(&self) -> bool {
        self.header.split_whitespace().next() == Some(ITEM_KEYWORD)
    }
}

/// Why a header could not be turned into a block
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    #[error("no identifier after keyword")]
    MissingIdentifier,
    #[error("no opening brace after header")]
    MissingOpenBrace,
    #[error("no closing brace before end of document")]
    MissingCloseBrace,
    #[error("item header inside another item's body")]
    NestedInItem,
}

/// One extraction event, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    Block(Block),
    Malformed {
        header: String,
        reason: MalformedReason,
        offset: usize,
    },
}

/// Result of extracting a whole document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Blocks and malformed headers in first-appearance order
    pub items: Vec<Extracted>,
    /// Set when extraction stopped at an unrecoverable fault
    pub failure: Option<Error>,
}

impl Extraction {
    /// Iterate over the well-formed blocks only
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.items.iter().filter_map(|item| match item {
            Extracted::Block(block) => Some(block),
            Extracted::Malformed { .. } => None,
        })
    }
}

/// Extract item blocks from normalized text
///
/// Extraction never aborts on a single bad header: a missing brace is
/// reported as [`Extracted::Malformed`] and scanning carries on. Only a
/// closing brace that matches nothing at document level stops extraction,
/// leaving everything found before it in place.
pub fn extract_blocks(text: &str) -> Extraction {
    let bytes = text.as_bytes();
    let mut extraction = Extraction::default();
    let mut depth = 0usize;
    let mut statement_start = true;
    let mut pos = 0usize;

    while pos < bytes.len() {
        match bytes[pos] {
            b'{' => {
                depth += 1;
                statement_start = true;
                pos += 1;
            }
            b'}' => {
                if depth == 0 {
                    extraction.failure = Some(Error::structural(text, pos));
                    break;
                }
                depth -= 1;
                statement_start = true;
                pos += 1;
            }
            b',' => {
                statement_start = true;
                pos += 1;
            }
            b if b.is_ascii_whitespace() => pos += 1,
            _ if statement_start && is_item_header(bytes, pos) => {
                let (item, resume) = read_block(text, pos);
                extraction.items.push(item);
                statement_start = resume.statement_start;
                pos = resume.pos;
            }
            _ => {
                statement_start = false;
                pos += 1;
            }
        }
    }

    extraction
}

/// Where to continue scanning after a header
struct Resume {
    pos: usize,
    statement_start: bool,
}

fn is_item_header(bytes: &[u8], pos: usize) -> bool {
    let end = pos + ITEM_KEYWORD.len();
    bytes[pos..].starts_with(ITEM_KEYWORD.as_bytes())
        && bytes.get(end).is_some_and(|b| b.is_ascii_whitespace())
}

fn read_block(text: &str, start: usize) -> (Extracted, Resume) {
    let bytes = text.as_bytes();
    let id_start = skip_whitespace(bytes, start + ITEM_KEYWORD.len());
    let id_end = bytes[id_start..]
        .iter()
        .position(|&b| b.is_ascii_whitespace() || matches!(b, b'{' | b'}' | b','))
        .map_or(bytes.len(), |n| id_start + n);

    let malformed = |header: &str, reason| Extracted::Malformed {
        header: header.trim().to_string(),
        reason,
        offset: start,
    };

    if id_start == id_end {
        let resume = Resume {
            pos: id_start,
            statement_start: false,
        };
        return (malformed(&text[start..id_start], MalformedReason::MissingIdentifier), resume);
    }

    let open = skip_whitespace(bytes, id_end);
    let header = text[start..open].trim();

    if bytes.get(open) != Some(&b'{') {
        let resume = Resume {
            pos: id_end,
            statement_start: false,
        };
        return (malformed(header, MalformedReason::MissingOpenBrace), resume);
    }

    let Some(close) = find_matching(bytes, open) else {
        // Resume inside the body so later headers are still found
        let resume = Resume {
            pos: open + 1,
            statement_start: true,
        };
        return (malformed(header, MalformedReason::MissingCloseBrace), resume);
    };

    let (body, nested) = flatten_body(text, open + 1, close);
    let block = Block {
        header: header.to_string(),
        id: text[id_start..id_end].trim().to_string(),
        body,
        nested,
        offset: start,
    };

    let resume = Resume {
        pos: close + 1,
        statement_start: true,
    };
    (Extracted::Block(block), resume)
}

/// Copy `text[from..to]`, cutting out nested `header { ... }` sub-blocks
fn flatten_body(text: &str, from: usize, to: usize) -> (String, Vec<NestedBlock>) {
    let bytes = text.as_bytes();
    let mut body = String::with_capacity(to - from);
    let mut nested = Vec::new();
    let mut copied = from;
    let mut segment = from;
    let mut pos = from;

    while pos < to {
        match bytes[pos] {
            b',' => {
                segment = pos + 1;
                pos += 1;
            }
            b'{' => {
                // Always matched: the enclosing block's braces balance
                let close = find_matching(bytes, pos).unwrap_or(to);
                let start = header_start(text, segment, pos);
                let header = text[start..pos].trim();
                tracing::debug!(header, "excising nested sub-block");
                nested.push(NestedBlock {
                    header: header.to_string(),
                    offset: skip_whitespace(bytes, start).min(pos),
                });

                body.push_str(&text[copied..start]);
                // Keeps the attributes on either side apart
                body.push(',');
                pos = (close + 1).min(to);
                copied = pos;
                segment = pos;
            }
            _ => pos += 1,
        }
    }

    body.push_str(&text[copied..to]);
    (body, nested)
}

/// Where a sub-block header begins within the segment `text[segment..open]`
///
/// A segment without `=`/`:` is all header. Otherwise the sub-block followed
/// an attribute with no comma in between: the value keeps its first word and
/// the header is at most the last two words (`keyword name`).
fn header_start(text: &str, segment: usize, open: usize) -> usize {
    let span = &text[segment..open];
    let Some(separator) = span.rfind(['=', ':']) else {
        return segment;
    };

    let value_start = segment + separator + 1;
    let value = &text[value_start..open];
    let words: Vec<usize> = value
        .char_indices()
        .filter(|&(i, c)| {
            !c.is_whitespace() && (i == 0 || value[..i].ends_with(char::is_whitespace))
        })
        .map(|(i, _)| i)
        .collect();

    match words.len().saturating_sub(1).min(2) {
        0 => open,
        keep => value_start + words[words.len() - keep],
    }
}

/// Index of the `}` matching the `{` at `open`
fn find_matching(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}
