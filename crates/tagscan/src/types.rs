/// Token kinds in detection priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Comment,
    EndTag,
    AtomicTag,
    StartTag,
    Chars,
}

impl TokenKind {
    /// Detection tries kinds in exactly this order; the first match wins.
    pub const DETECTION_ORDER: [TokenKind; 5] = [
        TokenKind::Comment,
        TokenKind::EndTag,
        TokenKind::AtomicTag,
        TokenKind::StartTag,
        TokenKind::Chars,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            TokenKind::Comment => 0,
            TokenKind::EndTag => 1,
            TokenKind::AtomicTag => 2,
            TokenKind::StartTag => 3,
            TokenKind::Chars => 4,
        }
    }
}

/// Attribute name/value pairs in source order.
///
/// `None` means the attribute was present without a value (`<input disabled>`), which is
/// distinct from the attribute being absent (`get` returns `None` from the outer option).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, Option<String>)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite. A repeated name keeps its first position but takes the new value.
    pub fn insert(&mut self, name: &str, value: Option<String>) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k == name) {
            slot.1 = value;
        } else {
            self.entries.push((name.to_string(), value));
        }
    }

    pub fn get(&self, name: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_deref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Fields shared by start tags and atomic tags.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    pub tag_name: String,
    pub attrs: Attributes,
    /// Same keys as `attrs`, with double quotes backslash-escaped for re-embedding inside a
    /// double-quoted string literal.
    pub escaped_attrs: Attributes,
    pub self_closing: bool,
}

/// One lexical unit cut from the front of the scanner buffer.
///
/// `text` is always the exact consumed source slice, so `len()` is the byte count the
/// buffer advanced by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Comment {
        text: String,
        content: String,
    },
    EndTag {
        text: String,
        tag_name: String,
    },
    AtomicTag {
        text: String,
        tag: Tag,
        content: String,
    },
    StartTag {
        text: String,
        tag: Tag,
    },
    Chars {
        text: String,
    },
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::Comment { .. } => TokenKind::Comment,
            Token::EndTag { .. } => TokenKind::EndTag,
            Token::AtomicTag { .. } => TokenKind::AtomicTag,
            Token::StartTag { .. } => TokenKind::StartTag,
            Token::Chars { .. } => TokenKind::Chars,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Token::Comment { text, .. }
            | Token::EndTag { text, .. }
            | Token::AtomicTag { text, .. }
            | Token::StartTag { text, .. }
            | Token::Chars { text } => text,
        }
    }

    /// Consumed length in bytes. Never zero for a token produced by the scanner.
    pub fn len(&self) -> usize {
        self.text().len()
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }

    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Token::EndTag { tag_name, .. } => Some(tag_name),
            Token::AtomicTag { tag, .. } | Token::StartTag { tag, .. } => Some(&tag.tag_name),
            _ => None,
        }
    }

    pub fn tag(&self) -> Option<&Tag> {
        match self {
            Token::AtomicTag { tag, .. } | Token::StartTag { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Comment body or atomic element body.
    pub fn content(&self) -> Option<&str> {
        match self {
            Token::Comment { content, .. } | Token::AtomicTag { content, .. } => Some(content),
            _ => None,
        }
    }
}
