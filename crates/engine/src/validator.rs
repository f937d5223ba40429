//! Response validator — checks the shape of a homework API body and turns it
//! into notification messages plus the next cursor.
//!
//! Validation is fail-fast: the first bad record aborts the whole batch and
//! no partial list of messages is returned.

use serde_json::Value;

use review_common::error::PollError;
use review_common::types::{Cursor, RawResponse};

use crate::verdict;

/// Outcome of a successfully validated response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedResponse {
    /// One status-change sentence per homework, in API order.
    pub messages: Vec<String>,
    /// Server-reported `current_date`, the cursor for the next fetch.
    pub cursor: Cursor,
}

/// Validate a raw response body.
///
/// `homeworks` is checked before `current_date`; a JSON `null` counts as the
/// key being absent.
pub fn validate(raw: &RawResponse) -> Result<ValidatedResponse, PollError> {
    let Some(body) = raw.as_object() else {
        return Err(PollError::Unknown(format!(
            "Ответ API не является JSON-объектом: {raw}"
        )));
    };

    let homeworks = required(body.get("homeworks"), "homeworks")?;
    let current_date = required(body.get("current_date"), "current_date")?;

    let Some(homeworks) = homeworks.as_array() else {
        return Err(PollError::Unknown(format!(
            "Ключ homeworks не является списком: {homeworks}"
        )));
    };
    let Some(current_date) = current_date.as_i64() else {
        return Err(PollError::Unknown(format!(
            "Ключ current_date не является целым числом: {current_date}"
        )));
    };

    let messages = homeworks
        .iter()
        .map(verdict::translate)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        homeworks = messages.len(),
        current_date,
        "Validated homework API response"
    );

    Ok(ValidatedResponse {
        messages,
        cursor: Cursor::new(current_date),
    })
}

fn required<'a>(value: Option<&'a Value>, key: &'static str) -> Result<&'a Value, PollError> {
    value
        .filter(|v| !v.is_null())
        .ok_or(PollError::KeysAnswer(key))
}
