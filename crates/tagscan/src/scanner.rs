//! Token reader loop.
//!
//! The scanner owns the unconsumed text and nothing else: every read re-detects from the front
//! of the buffer, so more text can be appended between any two reads. A read either cuts one
//! complete token off the front or leaves the buffer untouched.
//!
//! Invariants:
//! - Progress: a returned token is never empty, so repeated reads over finite input terminate.
//! - Conservation: stacked snapshots plus the live buffer always equal all appended input
//!   minus the texts of the tokens returned so far, in order.

use crate::buffer::{Buffer, ContextStack};
use crate::detect::{Detection, detect};
use crate::extract::{Extract, extract};
use crate::trace::trace_enabled;
use crate::types::{Token, TokenKind};

const TRACE_TARGET: &str = "tagscan.scanner";
const TRACE_PREVIEW_CHARS: usize = 24;

/// What to do when a tag-like prefix fails the tag grammar outright.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MalformedTagPolicy {
    /// Emit the leading `<` as a one-byte `Chars` token and re-detect after it.
    #[default]
    LiteralChars,
    /// Report `ReadResult::Malformed` and leave the buffer untouched.
    Stall,
}

/// Configuration for the scanner.
#[derive(Clone, Debug, Default)]
pub struct ScannerConfig {
    pub malformed_tags: MalformedTagPolicy,
}

/// Outcome of a single read attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadResult {
    Token(Token),
    /// The detected kind needs more text before it can be cut; nothing was consumed.
    Incomplete(TokenKind),
    /// Only produced under `MalformedTagPolicy::Stall`; nothing was consumed.
    Malformed(TokenKind),
    /// The live buffer is empty.
    EndOfInput,
}

impl ReadResult {
    pub fn into_token(self) -> Option<Token> {
        match self {
            ReadResult::Token(token) => Some(token),
            _ => None,
        }
    }
}

/// Why `read_tokens` returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReadTokensOutcome {
    /// A handler returned `Flow::Stop`. The token it saw is already consumed.
    Stopped,
    Incomplete(TokenKind),
    Malformed(TokenKind),
    EndOfInput,
}

/// Handler verdict.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Continue,
    Stop,
}

impl From<()> for Flow {
    fn from(_: ()) -> Self {
        Flow::Continue
    }
}

/// `false` stops, anything else continues.
impl From<bool> for Flow {
    fn from(keep_going: bool) -> Self {
        if keep_going { Flow::Continue } else { Flow::Stop }
    }
}

type Handler<'h> = Box<dyn FnMut(&Token) -> Flow + 'h>;

/// Per-kind callbacks for `Scanner::read_tokens`. Kinds without a handler are consumed
/// silently.
#[derive(Default)]
pub struct Handlers<'h> {
    slots: [Option<Handler<'h>>; 5],
}

impl<'h> Handlers<'h> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`, replacing any previous one.
    ///
    /// Handlers may return `Flow`, `bool`, or `()`.
    pub fn on<F, R>(mut self, kind: TokenKind, mut handler: F) -> Self
    where
        F: FnMut(&Token) -> R + 'h,
        R: Into<Flow>,
    {
        self.slots[kind.index()] = Some(Box::new(move |token: &Token| -> Flow {
            handler(token).into()
        }));
        self
    }

    pub fn is_registered(&self, kind: TokenKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    fn dispatch(&mut self, token: &Token) -> Flow {
        match &mut self.slots[token.kind().index()] {
            Some(handler) => handler(token),
            None => Flow::Continue,
        }
    }
}

/// Scanner instrumentation counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub reads: u64,
    pub tokens_emitted: u64,
    pub bytes_consumed: u64,
    pub incomplete_reads: u64,
    pub malformed_recoveries: u64,
    pub pushes: u64,
    pub pops: u64,
}

/// Streaming markup scanner.
#[derive(Debug, Default)]
pub struct Scanner {
    config: ScannerConfig,
    buffer: Buffer,
    stack: ContextStack,
    stats: ScanStats,
}

impl Scanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self::with_config(ScannerConfig::default(), text)
    }

    pub fn with_config(config: ScannerConfig, text: impl Into<String>) -> Self {
        Self {
            config,
            buffer: Buffer::new(text.into()),
            stack: ContextStack::default(),
            stats: ScanStats::default(),
        }
    }

    /// Append text to the end of the live buffer.
    pub fn append(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    /// Read one token, consuming it from the buffer. `None` covers both end of input and a
    /// stall; use `try_read_token` to tell them apart.
    pub fn read_token(&mut self) -> Option<Token> {
        self.try_read_token().into_token()
    }

    pub fn try_read_token(&mut self) -> ReadResult {
        self.stats.reads = self.stats.reads.saturating_add(1);
        let buf = self.buffer.as_str();

        let kind = match detect(buf) {
            Detection::Empty => return ReadResult::EndOfInput,
            Detection::NeedMoreInput(kind) => {
                self.stats.incomplete_reads = self.stats.incomplete_reads.saturating_add(1);
                #[cfg(any(test, feature = "debug-stats"))]
                log::trace!(target: TRACE_TARGET, "partial {kind:?} prefix {buf:?}");
                return ReadResult::Incomplete(kind);
            }
            Detection::Kind(kind) => kind,
        };
        if trace_enabled() {
            log::trace!(target: TRACE_TARGET, "suspected {kind:?} at {:?}", preview(buf));
        }

        let token = match extract(kind, buf) {
            Extract::Matched(token) => token,
            Extract::NeedMoreInput => {
                self.stats.incomplete_reads = self.stats.incomplete_reads.saturating_add(1);
                #[cfg(any(test, feature = "debug-stats"))]
                log::trace!(
                    target: TRACE_TARGET,
                    "{kind:?} incomplete with {} bytes buffered",
                    buf.len()
                );
                return ReadResult::Incomplete(kind);
            }
            Extract::NoMatch => match self.config.malformed_tags {
                MalformedTagPolicy::LiteralChars => {
                    self.stats.malformed_recoveries =
                        self.stats.malformed_recoveries.saturating_add(1);
                    if trace_enabled() {
                        log::trace!(
                            target: TRACE_TARGET,
                            "malformed {kind:?}, emitting `<` as chars"
                        );
                    }
                    Token::Chars {
                        text: "<".to_string(),
                    }
                }
                MalformedTagPolicy::Stall => return ReadResult::Malformed(kind),
            },
        };
        if trace_enabled() {
            log::trace!(target: TRACE_TARGET, "parsed {:?} {token:?}", token.kind());
        }

        let len = token.len();
        debug_assert!(len > 0 && len <= buf.len(), "token length out of range: {len}");
        self.buffer.advance(len);
        self.stats.tokens_emitted = self.stats.tokens_emitted.saturating_add(1);
        self.stats.bytes_consumed = self.stats.bytes_consumed.saturating_add(len as u64);
        ReadResult::Token(token)
    }

    /// Read until input runs out, a read stalls, or a handler stops the loop.
    pub fn read_tokens(&mut self, handlers: &mut Handlers<'_>) -> ReadTokensOutcome {
        loop {
            match self.try_read_token() {
                ReadResult::Token(token) => {
                    if handlers.dispatch(&token) == Flow::Stop {
                        return ReadTokensOutcome::Stopped;
                    }
                }
                ReadResult::Incomplete(kind) => return ReadTokensOutcome::Incomplete(kind),
                ReadResult::Malformed(kind) => return ReadTokensOutcome::Malformed(kind),
                ReadResult::EndOfInput => return ReadTokensOutcome::EndOfInput,
            }
        }
    }

    /// Iterate tokens until the next read yields none.
    pub fn tokens(&mut self) -> impl Iterator<Item = Token> + '_ {
        std::iter::from_fn(move || self.read_token())
    }

    /// Park the live buffer on the context stack and continue from an empty buffer.
    pub fn push_state(&mut self) {
        self.stack.push(&mut self.buffer);
        self.stats.pushes = self.stats.pushes.saturating_add(1);
    }

    /// Restore the innermost parked buffer in front of whatever is still unread. Does nothing
    /// when the stack is empty.
    pub fn pop_state(&mut self) {
        if self.stack.pop(&mut self.buffer) {
            self.stats.pops = self.stats.pops.saturating_add(1);
        }
    }

    /// Live buffer contents.
    pub fn pending(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Everything not yet consumed: parked snapshots, outermost first, then the live buffer.
    pub fn unconsumed(&self) -> String {
        let mut out = String::new();
        for saved in self.stack.iter() {
            out.push_str(saved);
        }
        out.push_str(self.buffer.as_str());
        out
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }
}

fn preview(buf: &str) -> &str {
    match buf.char_indices().nth(TRACE_PREVIEW_CHARS) {
        Some((end, _)) => &buf[..end],
        None => buf,
    }
}
