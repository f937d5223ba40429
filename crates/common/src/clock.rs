//! Wall-clock seam for the poll loop's cursor.

use crate::types::Cursor;

/// Source of "now" for the poll loop.
pub trait Clock: Send + Sync {
    fn now(&self) -> Cursor;
}

/// Production clock backed by `chrono::Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Cursor {
        Cursor::now()
    }
}
