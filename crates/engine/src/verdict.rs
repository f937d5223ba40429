//! Status translator — turns one homework record into the sentence the
//! recipient receives.

use serde_json::Value;

use review_common::error::PollError;
use review_common::types::{HomeworkStatus, TaskRecord};

/// Fixed reviewer verdict for a documented status.
pub fn verdict(status: HomeworkStatus) -> &'static str {
    match status {
        HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
        HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
        HomeworkStatus::Rejected => "Работа проверена, в ней нашлись ошибки.",
    }
}

/// Extract a `TaskRecord` from one element of the `homeworks` array.
///
/// `status` is checked before `homework_name`. A JSON `null` counts as the
/// key being absent. Non-string values are kept in their JSON text form so
/// an odd status still surfaces verbatim in the error.
pub fn extract_record(raw: &Value) -> Result<TaskRecord, PollError> {
    let Some(fields) = raw.as_object() else {
        return Err(PollError::Unknown(format!(
            "Элемент списка homeworks не является объектом: {raw}"
        )));
    };

    let status = present(fields.get("status")).ok_or(PollError::KeysAnswer("status"))?;
    let name =
        present(fields.get("homework_name")).ok_or(PollError::KeysAnswer("homework_name"))?;

    Ok(TaskRecord {
        name: text_of(name),
        status: text_of(status),
    })
}

/// Render the status-change sentence for a record.
pub fn translate_record(record: &TaskRecord) -> Result<String, PollError> {
    let status = HomeworkStatus::from_wire(&record.status)
        .ok_or_else(|| PollError::StatusHomework(record.status.clone()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        record.name,
        verdict(status)
    ))
}

/// Extract and translate in one step.
pub fn translate(raw: &Value) -> Result<String, PollError> {
    translate_record(&extract_record(raw)?)
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
