use tagscan::{Scanner, Tag, Token};

pub fn token_line(token: &Token) -> String {
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
    let mut line = tag.tag_name.clone();
    for (name, value) in tag.escaped_attrs.iter() {
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

/// Scan `chunks` in order, reading after every append. Returns snapshot lines and the
/// unconsumed remainder.
pub fn scan_chunks(chunks: &[&str]) -> (Vec<String>, String) {
    let mut scanner = Scanner::new();
    let mut lines = Vec::new();
    for chunk in chunks {
        scanner.append(chunk);
        lines.extend(scanner.tokens().map(|token| token_line(&token)));
    }
    (lines, scanner.pending().to_string())
}

/// Merge adjacent `Chars(..)` lines.
pub fn coalesce_chars(lines: Vec<String>) -> Vec<String> {
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
