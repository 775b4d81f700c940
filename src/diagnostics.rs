//! Diagnostic sinks for clamped values
//!
//! Out-of-range option values are corrected rather than rejected. Each
//! correction is reported once to a [`DiagnosticSink`].

use crate::sync::MutexExt;
use std::sync::Mutex;

/// Receives warning-level messages about corrected option values
///
/// Implementations must not panic or block for long; they are called while a
/// store is being built.
pub trait DiagnosticSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards diagnostics to the `log` facade
#[derive(Debug, Clone, Default)]
pub struct LogSink {
    tag: Option<String>,
}

impl LogSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every message with a tag such as `[MyPlugin]`
    #[must_use]
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
        }
    }
}

impl DiagnosticSink for LogSink {
    fn warn(&self, message: &str) {
        match &self.tag {
            Some(tag) => log::warn!("{tag} {message}"),
            None => log::warn!("{message}"),
        }
    }
}

/// Collects diagnostics in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages received so far
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock_recovered().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock_recovered().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all collected messages
    pub fn clear(&self) {
        self.messages.lock_recovered().clear();
    }
}

impl DiagnosticSink for MemorySink {
    fn warn(&self, message: &str) {
        self.messages.lock_recovered().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_collects() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.warn("first");
        sink.warn("second");
        assert_eq!(sink.messages(), vec!["first", "second"]);

        sink.clear();
        assert_eq!(sink.len(), 0);
    }

    #[test]
    fn test_log_sink_never_panics() {
        LogSink::new().warn("plain");
        LogSink::tagged("[wc]").warn("tagged");
    }
}
