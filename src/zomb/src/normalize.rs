//! Lexical normalization of raw scriptfile text
//!
//! Scriptfiles are hand-authored and carry a lot of visual noise: block
//! comments, dashed separator lines and tab indentation. Normalization
//! removes that noise before block extraction. No other whitespace is touched.

const COMMENT_OPEN: &str = "/*";
const COMMENT_CLOSE: &str = "*/";

/// Minimum run of dashes treated as a horizontal rule
pub const RULE_MIN_DASHES: usize = 5;

/// Normalize raw scriptfile text
///
/// Applied in order:
/// 1. `/* ... */` comments are removed, including multi-line ones
/// 2. runs of [`RULE_MIN_DASHES`] or more `-` are removed
/// 3. every tab becomes a single space
///
/// An unterminated `/*` removes everything up to the end of the document.
/// Callers get the truncated text and must live with the lost tail.
pub fn normalize(text: &str) -> String {
    let text = strip_comments(text);
    let text = strip_rules(&text);
    text.replace('\t', " ")
}

/// Remove block comments, each closing at the first following `*/`
pub fn strip_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find(COMMENT_OPEN) {
        out.push_str(&rest[..start]);

        let inner = &rest[start + COMMENT_OPEN.len()..];
        match inner.find(COMMENT_CLOSE) {
            Some(end) => rest = &inner[end + COMMENT_CLOSE.len()..],
            None => return out,
        }
    }

    out.push_str(rest);
    out
}

/// Remove horizontal rules (runs of [`RULE_MIN_DASHES`] or more dashes)
pub fn strip_rules(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut dashes = 0usize;

    for c in text.chars() {
        if c == '-' {
            dashes += 1;
            continue;
        }
        flush_dashes(&mut out, dashes);
        dashes = 0;
        out.push(c);
    }
    flush_dashes(&mut out, dashes);

    out
}

fn flush_dashes(out: &mut String, dashes: usize) {
    if dashes < RULE_MIN_DASHES {
        out.extend(std::iter::repeat('-').take(dashes));
    }
}
