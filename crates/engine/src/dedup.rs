//! Duplicate-failure suppression — keeps the recipient from being flooded
//! while the same failure repeats every cycle.
//!
//! Only failure messages pass through here. A run of identical failures is
//! relayed once; any different failure text is relayed and becomes the new
//! reference. A successful cycle ends the run: the same failure text seen
//! again after a success is relayed again.
//!
//! State is in-memory only and resets on restart.

/// Remembers the last failure message that was relayed.
#[derive(Debug, Default)]
pub struct FailureDeduplicator {
    last: Option<String>,
}

impl FailureDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `message` differs from the last relayed failure, and
    /// records it. Returns `false` for a repeat.
    pub fn should_notify(&mut self, message: &str) -> bool {
        if self.last.as_deref() == Some(message) {
            tracing::debug!("Failure notification suppressed — same as previous");
            return false;
        }
        self.last = Some(message.to_string());
        true
    }

    /// Forget the last failure after a successful cycle.
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Text of the last relayed failure, if any.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }
}
