//! Per-kind token extraction.
//!
//! Every extractor is called with the live buffer after detection has picked its kind, and
//! reports one of three outcomes:
//! - `Matched`: a complete token sits at the front of the buffer.
//! - `NeedMoreInput`: the buffer ends before the grammar could decide; appending may help.
//! - `NoMatch`: a byte violates the grammar; appending cannot help.
//!
//! All slicing happens at ASCII structural bytes (`<`, `>`, quotes, whitespace, name
//! characters), so every cut stays on a UTF-8 boundary.

use crate::attrs::{decode_attributes, is_name_byte};
use crate::types::{Tag, Token, TokenKind};
use memchr::{memchr, memmem};

const COMMENT_OPEN_LEN: usize = "<!--".len();
const COMMENT_CLOSE: &[u8] = b"-->";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Extract<T> {
    Matched(T),
    NeedMoreInput,
    NoMatch,
}

pub(crate) fn extract(kind: TokenKind, buf: &str) -> Extract<Token> {
    match kind {
        TokenKind::Comment => comment(buf),
        TokenKind::EndTag => end_tag(buf),
        TokenKind::AtomicTag => atomic_tag(buf),
        TokenKind::StartTag => start_tag(buf),
        TokenKind::Chars => chars(buf),
    }
}

fn comment(buf: &str) -> Extract<Token> {
    debug_assert!(buf.starts_with("<!--"));
    let Some(rel) = memmem::find(&buf.as_bytes()[COMMENT_OPEN_LEN..], COMMENT_CLOSE) else {
        return Extract::NeedMoreInput;
    };
    let close = COMMENT_OPEN_LEN + rel;
    Extract::Matched(Token::Comment {
        text: buf[..close + COMMENT_CLOSE.len()].to_string(),
        content: buf[COMMENT_OPEN_LEN..close].to_string(),
    })
}

/// `</NAME[^>]*>`; anything after the name is discarded.
fn end_tag(buf: &str) -> Extract<Token> {
    let bytes = buf.as_bytes();
    debug_assert!(bytes.starts_with(b"</"));
    let name_start = 2;
    let mut i = name_start;
    while i < bytes.len() && is_name_byte(bytes[i]) {
        i += 1;
    }
    if i == bytes.len() {
        return Extract::NeedMoreInput;
    }
    if i == name_start {
        return Extract::NoMatch;
    }
    let Some(rel) = memchr(b'>', &bytes[i..]) else {
        return Extract::NeedMoreInput;
    };
    let len = i + rel + 1;
    Extract::Matched(Token::EndTag {
        text: buf[..len].to_string(),
        tag_name: buf[name_start..i].to_string(),
    })
}

fn atomic_tag(buf: &str) -> Extract<Token> {
    let (tag, open_len) = match parse_start_tag(buf) {
        Extract::Matched(parsed) => parsed,
        Extract::NeedMoreInput => return Extract::NeedMoreInput,
        Extract::NoMatch => return Extract::NoMatch,
    };
    let rest = &buf[open_len..];
    let Some((content_len, close_len)) = find_close_tag(rest, tag.tag_name.as_bytes()) else {
        return Extract::NeedMoreInput;
    };
    let len = open_len + content_len + close_len;
    Extract::Matched(Token::AtomicTag {
        text: buf[..len].to_string(),
        content: rest[..content_len].to_string(),
        tag,
    })
}

fn start_tag(buf: &str) -> Extract<Token> {
    match parse_start_tag(buf) {
        Extract::Matched((tag, len)) => Extract::Matched(Token::StartTag {
            text: buf[..len].to_string(),
            tag,
        }),
        Extract::NeedMoreInput => Extract::NeedMoreInput,
        Extract::NoMatch => Extract::NoMatch,
    }
}

fn chars(buf: &str) -> Extract<Token> {
    let len = memchr(b'<', buf.as_bytes()).unwrap_or(buf.len());
    debug_assert!(len > 0, "chars detection requires a leading non-`<` byte");
    Extract::Matched(Token::Chars {
        text: buf[..len].to_string(),
    })
}

/// Match `<NAME(\s+ATTR(\s*=\s*VALUE)?)*\s*(/?)>` and return the tag plus its byte length.
fn parse_start_tag(buf: &str) -> Extract<(Tag, usize)> {
    let bytes = buf.as_bytes();
    let len = bytes.len();
    debug_assert!(bytes.first() == Some(&b'<'));

    let name_start = 1;
    let mut i = name_start;
    while i < len && is_name_byte(bytes[i]) {
        i += 1;
    }
    if i == len {
        return Extract::NeedMoreInput;
    }
    if i == name_start {
        return Extract::NoMatch;
    }
    let name_end = i;

    // Attributes: each needs leading whitespace. `i` stays at the end of the last one.
    let mut j;
    loop {
        j = skip_whitespace(bytes, i);
        if j == len {
            return Extract::NeedMoreInput;
        }
        if j == i || !is_name_byte(bytes[j]) {
            break;
        }
        while j < len && is_name_byte(bytes[j]) {
            j += 1;
        }
        if j == len {
            return Extract::NeedMoreInput;
        }
        i = match scan_attribute_value(bytes, j) {
            Extract::Matched(end) => end,
            Extract::NoMatch => j,
            Extract::NeedMoreInput => return Extract::NeedMoreInput,
        };
    }
    let attrs_end = i;

    let mut self_closing = false;
    if bytes[j] == b'/' {
        self_closing = true;
        j += 1;
        if j == len {
            return Extract::NeedMoreInput;
        }
    }
    if bytes[j] != b'>' {
        return Extract::NoMatch;
    }

    let (attrs, escaped_attrs) = decode_attributes(&buf[name_end..attrs_end]);
    Extract::Matched((
        Tag {
            tag_name: buf[name_start..name_end].to_string(),
            attrs,
            escaped_attrs,
            self_closing,
        },
        j + 1,
    ))
}

/// Optional `\s*=\s*VALUE` after an attribute name ending at `at`.
///
/// `NoMatch` means the attribute has no value and scanning resumes at `at`.
fn scan_attribute_value(bytes: &[u8], at: usize) -> Extract<usize> {
    let len = bytes.len();
    let mut j = skip_whitespace(bytes, at);
    if j == len {
        return Extract::NeedMoreInput;
    }
    if bytes[j] != b'=' {
        return Extract::NoMatch;
    }
    j = skip_whitespace(bytes, j + 1);
    if j == len {
        return Extract::NeedMoreInput;
    }

    let first = bytes[j];
    if first == b'"' || first == b'\'' {
        // An unclosed quote may still be closed by a later append.
        let Some(rel) = memchr(first, &bytes[j + 1..]) else {
            return Extract::NeedMoreInput;
        };
        let after = j + 1 + rel + 1;
        if after == len {
            return Extract::NeedMoreInput;
        }
        let next = bytes[after];
        if next.is_ascii_whitespace() || next == b'/' || next == b'>' {
            return Extract::Matched(after);
        }
        // `"a"b`: the quoted form cannot continue, so the whole run is a bare value.
    }

    let start = j;
    while j < len && !bytes[j].is_ascii_whitespace() && bytes[j] != b'>' {
        j += 1;
    }
    if j == len {
        return Extract::NeedMoreInput;
    }
    if j == start {
        return Extract::NoMatch;
    }
    Extract::Matched(j)
}

/// Find `</NAME` (ASCII case-insensitive) followed by anything up to the next `>`.
///
/// Returns `(content_len, close_len)` relative to `rest`.
fn find_close_tag(rest: &str, name: &[u8]) -> Option<(usize, usize)> {
    let bytes = rest.as_bytes();
    let len = bytes.len();
    let n = name.len();
    let mut i = 0;
    while i < len {
        i += memchr(b'<', &bytes[i..])?;
        let name_at = i + 2;
        if name_at + n > len {
            return None;
        }
        if bytes[i + 1] == b'/' && bytes[name_at..name_at + n].eq_ignore_ascii_case(name) {
            let gt = name_at + n + memchr(b'>', &bytes[name_at + n..])?;
            return Some((i, gt + 1 - i));
        }
        i += 1;
    }
    None
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}
