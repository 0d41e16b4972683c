use crate::{Tag, Token};
use std::fmt::Write;

pub(crate) fn token_snapshot(tokens: &[Token]) -> Vec<String> {
    tokens.iter().map(token_line).collect()
}

pub(crate) fn token_line(token: &Token) -> String {
    match token {
        Token::Comment { content, .. } => format!("Comment({content})"),
        Token::EndTag { tag_name, .. } => format!("EndTag({tag_name})"),
        Token::StartTag { tag, .. } => format!("StartTag({})", tag_body(tag)),
        Token::AtomicTag { tag, content, .. } => {
            format!("AtomicTag({})[{content}]", tag_body(tag))
        }
        Token::Chars { text } => format!("Chars({text})"),
    }
}

fn tag_body(tag: &Tag) -> String {
    let mut line = String::new();
    let _ = write!(&mut line, "{}", tag.tag_name);
    for (name, value) in tag.attrs.iter() {
        line.push(' ');
        line.push_str(name);
        if let Some(value) = value {
            line.push_str("=\"");
            line.push_str(value);
            line.push('"');
        }
    }
    if tag.self_closing {
        line.push_str(" /");
    }
    line
}

/// Merge adjacent `Chars` lines so runs split by chunk boundaries compare equal.
pub(crate) fn coalesce_chars(lines: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        if let Some(body) = line.strip_prefix("Chars(").and_then(|s| s.strip_suffix(')'))
            && let Some(last) = out.last_mut()
            && last.starts_with("Chars(")
        {
            last.pop();
            last.push_str(body);
            last.push(')');
            continue;
        }
        out.push(line);
    }
    out
}
