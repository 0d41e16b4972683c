//! Unconsumed input and the context stack used to redirect it.
//!
//! Invariant: the stacked snapshots (outermost first) followed by the live buffer are exactly
//! the input that has not been consumed yet.

/// Live unconsumed text.
///
/// Consumed bytes are tracked with an offset and only dropped on compaction, so cutting many
/// small tokens off the front stays linear in the input size.
#[derive(Debug, Default)]
pub(crate) struct Buffer {
    text: String,
    start: usize,
}

impl Buffer {
    pub(crate) fn new(text: String) -> Self {
        Self { text, start: 0 }
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.text[self.start..]
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.start == self.text.len()
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.compact();
        self.text.push_str(text);
    }

    /// Drop `len` bytes from the front.
    pub(crate) fn advance(&mut self, len: usize) {
        let new_start = self.start + len;
        debug_assert!(new_start <= self.text.len(), "advance past end of buffer");
        debug_assert!(
            self.text.is_char_boundary(new_start),
            "advance must land on a UTF-8 boundary"
        );
        self.start = new_start;
        if self.start == self.text.len() {
            self.text.clear();
            self.start = 0;
        }
    }

    /// Move the remaining text out, leaving the buffer empty.
    pub(crate) fn take(&mut self) -> String {
        self.text.drain(..self.start);
        self.start = 0;
        std::mem::take(&mut self.text)
    }

    /// Put `saved` in front of whatever is still unread.
    pub(crate) fn prepend(&mut self, mut saved: String) {
        if saved.is_empty() {
            return;
        }
        saved.push_str(self.as_str());
        self.text = saved;
        self.start = 0;
    }

    fn compact(&mut self) {
        // Only shift once the dead prefix dominates, keeping appends amortized O(1).
        if self.start > 0 && self.start * 2 >= self.text.len() {
            self.text.drain(..self.start);
            self.start = 0;
        }
    }
}

/// Saved buffer snapshots, innermost last.
#[derive(Debug, Default)]
pub(crate) struct ContextStack {
    saved: Vec<String>,
}

impl ContextStack {
    /// Park the live buffer and start from an empty one.
    pub(crate) fn push(&mut self, buffer: &mut Buffer) {
        self.saved.push(buffer.take());
    }

    /// Restore the innermost snapshot ahead of any residual text. No-op on an empty stack.
    pub(crate) fn pop(&mut self, buffer: &mut Buffer) -> bool {
        match self.saved.pop() {
            Some(saved) => {
                buffer.prepend(saved);
                true
            }
            None => false,
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.saved.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.saved.iter().map(String::as_str)
    }
}
