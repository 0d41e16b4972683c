//! Attribute list decoding.
//!
//! Input is the raw text between a start tag's name and its closing `>`, already validated by
//! the start tag grammar. Pairs are `name[=value]` where the value is double-quoted,
//! single-quoted (both may contain backslash escapes) or bare. Anything that cannot start a
//! name is skipped.

use crate::types::Attributes;
use memchr::{memchr, memrchr};

/// Tag and attribute names: ASCII `[A-Za-z0-9_-]`.
pub(crate) fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Decode an attribute list into raw and quote-escaped maps.
pub(crate) fn decode_attributes(list: &str) -> (Attributes, Attributes) {
    let bytes = list.as_bytes();
    let len = bytes.len();
    let mut attrs = Attributes::new();
    let mut escaped = Attributes::new();
    let mut i = 0;

    while i < len {
        if !is_name_byte(bytes[i]) {
            i += 1;
            continue;
        }
        let name_start = i;
        while i < len && is_name_byte(bytes[i]) {
            i += 1;
        }
        let name = &list[name_start..i];
        let value = match decode_value(list, i) {
            Some((value, end)) => {
                i = end;
                Some(value)
            }
            None => None,
        };
        attrs.insert(name, value.map(str::to_string));
        escaped.insert(name, value.map(escape_double_quotes));
    }

    (attrs, escaped)
}

/// Parse `\s*=\s*VALUE` at `at`. Returns the unquoted value and the offset after it.
fn decode_value(list: &str, at: usize) -> Option<(&str, usize)> {
    let bytes = list.as_bytes();
    let len = bytes.len();
    let mut j = skip_whitespace(bytes, at);
    if j >= len || bytes[j] != b'=' {
        return None;
    }
    j = skip_whitespace(bytes, j + 1);
    if j >= len {
        return None;
    }

    let quote = bytes[j];
    if (quote == b'"' || quote == b'\'')
        && let Some(close) = find_closing_quote(bytes, j + 1, quote)
    {
        return Some((&list[j + 1..close], close + 1));
    }

    let start = j;
    while j < len && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
        j += 1;
    }
    (j > start).then(|| (&list[start..j], j))
}

/// Closing quote for a value starting at `start`, honoring `\x` escapes.
///
/// When every later quote is escaped, the last one still closes the value: a backslash may
/// stand for itself, so the longest candidate wins.
fn find_closing_quote(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut k = start;
    while k < bytes.len() {
        let rel = memchr(quote, &bytes[k..]).map(|rel| k + rel);
        let backslash = memchr(b'\\', &bytes[k..]).map(|rel| k + rel);
        match (rel, backslash) {
            (Some(q), Some(b)) if b < q => k = b + 2,
            (Some(q), _) => return Some(q),
            (None, _) => break,
        }
    }
    memrchr(quote, &bytes[start..]).map(|rel| start + rel)
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

/// Backslash-escape every `"` that is not already escaped.
pub(crate) fn escape_double_quotes(raw: &str) -> String {
    if memchr(b'"', raw.as_bytes()).is_none() {
        return raw.to_string();
    }
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev = None;
    for ch in raw.chars() {
        if ch == '"' && prev != Some('\\') {
            out.push('\\');
        }
        out.push(ch);
        prev = Some(ch);
    }
    out
}
