//! Process-wide diagnostic toggle.
//!
//! When enabled, the scanner logs every detection and extraction attempt through
//! `log::trace!` under the `tagscan.scanner` target. Output depends on the logger the host
//! installs; this crate never installs one.

use std::sync::atomic::{AtomicBool, Ordering};

static TRACE: AtomicBool = AtomicBool::new(false);

pub fn set_trace(enabled: bool) {
    TRACE.store(enabled, Ordering::Relaxed);
}

pub fn trace_enabled() -> bool {
    TRACE.load(Ordering::Relaxed)
}
