//! Leading-syntax classification.
//!
//! Detection is coarse: it only looks at a short prefix of the buffer. The extractor for the
//! detected kind decides whether a complete token is actually there.

use crate::types::TokenKind;

const COMMENT_OPEN: &[u8] = b"<!--";
const ATOMIC_NAMES: [&[u8]; 2] = [b"script", b"style"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Detection {
    Kind(TokenKind),
    /// The buffer is a strict prefix of a higher-priority pattern.
    NeedMoreInput(TokenKind),
    Empty,
}

pub(crate) fn detect(buf: &str) -> Detection {
    let bytes = buf.as_bytes();
    if bytes.is_empty() {
        return Detection::Empty;
    }
    for kind in TokenKind::DETECTION_ORDER {
        let matched = match kind {
            TokenKind::Comment => {
                if bytes.len() > 1
                    && bytes.len() < COMMENT_OPEN.len()
                    && COMMENT_OPEN.starts_with(bytes)
                {
                    // `<!` or `<!-`: falling through to StartTag would misread a split comment.
                    return Detection::NeedMoreInput(TokenKind::Comment);
                }
                bytes.starts_with(COMMENT_OPEN)
            }
            TokenKind::EndTag => bytes.starts_with(b"</"),
            TokenKind::AtomicTag => is_atomic_open(bytes),
            TokenKind::StartTag => bytes[0] == b'<',
            TokenKind::Chars => bytes[0] != b'<',
        };
        if matched {
            return Detection::Kind(kind);
        }
    }
    // Chars and StartTag together cover every non-empty buffer.
    unreachable!("detection order must be exhaustive for non-empty input")
}

/// `<\s*(script|style)[\s>]`, case-insensitive.
fn is_atomic_open(bytes: &[u8]) -> bool {
    if bytes.first() != Some(&b'<') {
        return false;
    }
    let mut i = 1;
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    let rest = &bytes[i..];
    ATOMIC_NAMES.iter().any(|name| {
        rest.len() > name.len()
            && rest[..name.len()].eq_ignore_ascii_case(name)
            && (rest[name.len()] == b'>' || rest[name.len()].is_ascii_whitespace())
    })
}
