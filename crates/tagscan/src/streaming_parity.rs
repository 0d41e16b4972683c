//! Chunked appends must tokenize like the whole input.
//!
//! Tag and comment tokens are identical; `Chars` runs may split at append boundaries, so
//! snapshots are compared after merging adjacent runs. Set `TAGSCAN_STREAMING_SEEDS` to raise
//! the number of fuzzed chunk plans per case.

use crate::chunker::{ChunkPlan, build_chunk_plans};
use crate::test_utils::{coalesce_chars, token_snapshot};
use crate::{Scanner, Token};

const DEFAULT_SEEDS_CI: usize = 16;
const DEFAULT_SEEDS_LOCAL: usize = 64;
const BASE_SEED: u64 = 0x7461_6773_6361_6e00;

const CASES: &[&str] = &[
    "plain ascii",
    "café <b>crème</b> 😀",
    "<!-- note --><p class=\"a b\" data-x='1'>x</p>",
    "<script>if (a<b) { s = \"</p>\"; }</script>tail",
    "<style media=screen>a{}</STYLE >after",
    "a < b <!doctype html> </ x> <a b=>",
    "<img src=a.png alt=\"1 > 0\"/><br/><hr />",
    "é<script>😀</script>ö<!---->",
    "<a title=\"x\"y>q</a><input disabled value='it\\'s'>",
    "<!-- unterminated <b>",
    "<div id=1><script>unfinished",
];

#[test]
fn chunked_appends_match_whole_input() {
    let seeds = seed_count();
    for (case_idx, input) in CASES.iter().enumerate() {
        let (whole, whole_rest) = run_whole(input);
        let plans = build_chunk_plans(input, seeds, BASE_SEED ^ case_idx as u64);
        for plan in &plans {
            let (chunked, chunked_rest) = run_chunked(input, plan);
            assert_eq!(
                coalesce_chars(token_snapshot(&chunked)),
                coalesce_chars(token_snapshot(&whole)),
                "token mismatch for case={case_idx} plan={} boundaries={:?}",
                plan.label,
                plan.boundaries
            );
            assert_eq!(
                chunked_rest, whole_rest,
                "residual mismatch for case={case_idx} plan={}",
                plan.label
            );
        }
    }
}

#[test]
fn chunked_reads_consume_exactly_the_input() {
    for input in CASES {
        for plan in build_chunk_plans(input, 4, BASE_SEED) {
            let (tokens, rest) = run_chunked(input, &plan);
            let mut rebuilt: String = tokens.iter().map(Token::text).collect();
            rebuilt.push_str(&rest);
            assert_eq!(rebuilt, *input, "plan={}", plan.label);
        }
    }
}

fn run_whole(input: &str) -> (Vec<Token>, String) {
    let mut scanner = Scanner::with_text(input);
    let tokens: Vec<Token> = scanner.tokens().collect();
    (tokens, scanner.pending().to_string())
}

fn run_chunked(input: &str, plan: &ChunkPlan) -> (Vec<Token>, String) {
    let mut scanner = Scanner::new();
    let mut tokens = Vec::new();
    for chunk in plan.chunks(input) {
        scanner.append(chunk);
        tokens.extend(scanner.tokens());
    }
    (tokens, scanner.pending().to_string())
}

fn seed_count() -> usize {
    if let Ok(value) = std::env::var("TAGSCAN_STREAMING_SEEDS")
        && let Ok(parsed) = value.parse::<usize>()
        && parsed > 0
    {
        return parsed;
    }
    if std::env::var("CI").is_ok() {
        DEFAULT_SEEDS_CI
    } else {
        DEFAULT_SEEDS_LOCAL
    }
}
