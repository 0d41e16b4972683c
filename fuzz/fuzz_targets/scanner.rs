#![no_main]

use libfuzzer_sys::fuzz_target;
use tagscan::{ReadResult, Scanner};

// First byte picks the chunk size; the rest is lossily decoded markup.
fuzz_target!(|data: &[u8]| {
    let Some((&size, rest)) = data.split_first() else {
        return;
    };
    let input = String::from_utf8_lossy(rest);
    let chunk = usize::from(size % 16) + 1;

    let mut scanner = Scanner::new();
    let mut consumed = String::new();
    let mut start = 0usize;
    while start < input.len() {
        let mut end = (start + chunk).min(input.len());
        while !input.is_char_boundary(end) {
            end += 1;
        }
        scanner.append(&input[start..end]);
        start = end;
        loop {
            let before = scanner.pending().len();
            match scanner.try_read_token() {
                ReadResult::Token(token) => {
                    assert!(!token.is_empty(), "empty token");
                    assert_eq!(scanner.pending().len(), before - token.len());
                    consumed.push_str(token.text());
                }
                _ => break,
            }
        }
    }

    consumed.push_str(&scanner.unconsumed());
    assert_eq!(consumed, &*input);
});
