//! Streaming markup scanner.
//!
//! Cuts comments, start/end tags, verbatim `script`/`style` elements and text runs off the
//! front of an in-memory buffer, one token per read, without building a tree. Input can be
//! appended between reads, and the buffer can be parked on a context stack while injected
//! content is scanned, then resumed.
//!
//! This is a best-effort, regular-grammar scanner, not an HTML5 tokenizer:
//! - No entity decoding; attribute values and text are reported raw.
//! - Tag and attribute names are ASCII `[A-Za-z0-9_-]` and keep their source case.
//! - `script` and `style` bodies are captured verbatim up to the first matching close tag.

pub mod perf_fixtures;

mod attrs;
mod buffer;
mod detect;
mod extract;
mod scanner;
mod trace;
mod types;

#[cfg(test)]
mod streaming_parity;
#[cfg(test)]
mod test_utils;

pub use crate::scanner::{
    Flow, Handlers, MalformedTagPolicy, ReadResult, ReadTokensOutcome, ScanStats, Scanner,
    ScannerConfig,
};
pub use crate::trace::{set_trace, trace_enabled};
pub use crate::types::{Attributes, Tag, Token, TokenKind};
