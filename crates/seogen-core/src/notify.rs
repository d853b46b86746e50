//! User-facing notifications.
//!
//! The web dashboard renders these as transient toasts; the terminal
//! sink prints them to stderr as they arrive. Sinks are fire-and-forget:
//! `notify` returns immediately and never fails.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

/// Delay before a toast becomes visible (entry transition).
///
/// The toast timeline (enter/visible/exit) is fixed by the
/// implementation, not caller-configurable. The terminal sink renders
/// immediately; graphical front ends follow these durations.
pub const TOAST_ENTER_DELAY: Duration = Duration::from_millis(50);

/// How long a toast stays visible before it is hidden.
pub const TOAST_VISIBLE_FOR: Duration = Duration::from_millis(4000);

/// Delay between hiding a toast and removing it (exit transition).
pub const TOAST_EXIT_DELAY: Duration = Duration::from_millis(300);

/// Destination for transient user-facing messages.
pub trait NotificationSink: Send + Sync {
    /// Delivers one message. Non-blocking, no return value; concurrent
    /// messages are independent of each other.
    fn notify(&self, message: &str);
}

/// Terminal sink: one line per notification on stderr.
#[derive(Debug, Default)]
pub struct StderrSink;

impl StderrSink {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationSink for StderrSink {
    fn notify(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Wrapper that drops a message already delivered in this process.
///
/// Optional policy for the unbounded-toast problem; parity behavior is
/// no dedup, so callers opt in via config.
#[derive(Debug, Default)]
pub struct DedupSink<S> {
    inner: S,
    seen: Mutex<HashSet<String>>,
}

impl<S: NotificationSink> DedupSink<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            seen: Mutex::new(HashSet::new()),
        }
    }
}

impl<S: NotificationSink> NotificationSink for DedupSink<S> {
    fn notify(&self, message: &str) {
        let mut seen = self.seen.lock().expect("notification set poisoned");
        if !seen.insert(message.to_string()) {
            tracing::debug!("suppressed duplicate notification: {message}");
            return;
        }
        drop(seen);
        self.inner.notify(message);
    }
}

/// Recording sink for tests and embedding.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all messages delivered so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("message log poisoned").clone()
    }
}

impl NotificationSink for MemorySink {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .expect("message log poisoned")
            .push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        sink.notify("first");
        sink.notify("second");
        sink.notify("first");
        assert_eq!(sink.messages(), vec!["first", "second", "first"]);
    }

    #[test]
    fn test_dedup_sink_suppresses_repeats() {
        let sink = DedupSink::new(MemorySink::new());
        sink.notify("created");
        sink.notify("created");
        sink.notify("failed");
        assert_eq!(sink.inner.messages(), vec!["created", "failed"]);
    }

    #[test]
    fn test_toast_timeline_is_ordered() {
        assert!(TOAST_ENTER_DELAY < TOAST_VISIBLE_FOR);
        assert!(TOAST_EXIT_DELAY < TOAST_VISIBLE_FOR);
    }
}
