use chrono::Utc;

/// Raw decoded body of a homework API response, kept opaque until validated.
pub type RawResponse = serde_json::Value;

/// Unix timestamp marking the start of the next fetch window (`from_date`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(i64);

impl Cursor {
    pub fn new(timestamp: i64) -> Self {
        Self(timestamp)
    }

    /// Cursor at the current wall-clock second.
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review statuses the API documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Parse the wire value, `None` for anything undocumented.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// One homework entry extracted from the `homeworks` array.
///
/// `status` is kept as the raw wire string; it is only interpreted when the
/// record is translated into a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub name: String,
    pub status: String,
}
