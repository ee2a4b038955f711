//! Mapping between stored task documents and the [`Task`] aggregate.
//!
//! [`decode`] is the only place untyped store data enters the domain. It never
//! fails: missing or malformed fields are replaced with defaults and the
//! substitution is logged at `debug` level. [`encode`] is strict and always
//! writes the complete body, never the identifier.

use crate::contact::domain::ContactId;
use crate::task::{
    domain::{AssigneeRef, PersistedTaskData, Priority, SubTask, Task, TaskId, TaskType},
    ports::DocumentFields,
};
use chrono::{DateTime, SecondsFormat, Utc};
use mockable::Clock;
use serde_json::{Value, json};

/// Stored field holding the title.
pub const FIELD_TITLE: &str = "title";
/// Stored field holding the description.
pub const FIELD_DESCRIPTION: &str = "description";
/// Stored field holding the category.
pub const FIELD_CATEGORY: &str = "category";
/// Stored field holding the due date.
pub const FIELD_DUE_DATE: &str = "dueDate";
/// Stored field holding the priority; also the live query's sort key.
pub const FIELD_PRIORITY: &str = "priority";
/// Stored field holding the board column.
pub const FIELD_TASK_TYPE: &str = "taskType";
/// Stored field holding the subtask array.
pub const FIELD_SUB_TASKS: &str = "subTasks";
/// Stored field holding the assignee reference array.
pub const FIELD_ASSIGNED_TO: &str = "assignedTo";

/// Decodes a stored document body into a task.
#[must_use]
pub fn decode(id: TaskId, fields: &DocumentFields, clock: &impl Clock) -> Task {
    let due_date = decode_due_date(fields.get(FIELD_DUE_DATE)).unwrap_or_else(|| {
        note_default(&id, FIELD_DUE_DATE);
        clock.utc()
    });
    let priority = match fields.get(FIELD_PRIORITY) {
        Some(Value::String(raw)) if raw.is_empty() => None,
        Some(Value::String(raw)) => Priority::try_from(raw.as_str()).ok().or_else(|| {
            note_default(&id, FIELD_PRIORITY);
            None
        }),
        _ => {
            note_default(&id, FIELD_PRIORITY);
            None
        }
    };
    let task_type = fields
        .get(FIELD_TASK_TYPE)
        .and_then(Value::as_str)
        .and_then(|raw| TaskType::try_from(raw).ok())
        .unwrap_or_else(|| {
            note_default(&id, FIELD_TASK_TYPE);
            TaskType::default()
        });

    Task::from_persisted(PersistedTaskData {
        title: decode_text(&id, fields, FIELD_TITLE),
        description: decode_text(&id, fields, FIELD_DESCRIPTION),
        category: decode_text(&id, fields, FIELD_CATEGORY),
        due_date,
        priority,
        task_type,
        sub_tasks: decode_sub_tasks(&id, fields.get(FIELD_SUB_TASKS)),
        assigned_to: decode_assignees(&id, fields.get(FIELD_ASSIGNED_TO)),
        id,
    })
}

/// Encodes the complete task body. The identifier is never written.
#[must_use]
pub fn encode(task: &Task) -> DocumentFields {
    let mut fields = DocumentFields::new();
    fields.insert(FIELD_TITLE.to_owned(), json!(task.title()));
    fields.insert(FIELD_DESCRIPTION.to_owned(), json!(task.description()));
    fields.insert(FIELD_CATEGORY.to_owned(), json!(task.category()));
    fields.insert(
        FIELD_DUE_DATE.to_owned(),
        json!(
            task.due_date()
                .to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
    );
    fields.insert(
        FIELD_PRIORITY.to_owned(),
        json!(task.priority().map_or("", Priority::as_str)),
    );
    fields.insert(FIELD_TASK_TYPE.to_owned(), json!(task.task_type().as_str()));
    fields.extend(encode_sub_tasks(task.sub_tasks()));
    fields.insert(
        FIELD_ASSIGNED_TO.to_owned(),
        Value::Array(
            task.assigned_to()
                .iter()
                .map(|assignee| match assignee {
                    AssigneeRef::Contact(contact_id) => json!({ "contactId": contact_id.as_str() }),
                    AssigneeRef::Unreadable(entry) => entry.clone(),
                })
                .collect(),
        ),
    );
    fields
}

/// Encodes only the subtask array, for partial writes after a deletion.
#[must_use]
pub fn encode_sub_tasks(sub_tasks: &[SubTask]) -> DocumentFields {
    let mut fields = DocumentFields::new();
    fields.insert(
        FIELD_SUB_TASKS.to_owned(),
        Value::Array(
            sub_tasks
                .iter()
                .map(|sub_task| {
                    json!({ "text": sub_task.text(), "isChecked": sub_task.is_checked() })
                })
                .collect(),
        ),
    );
    fields
}

fn note_default(id: &TaskId, field: &'static str) {
    tracing::debug!(task_id = %id, field, "stored task field missing or malformed; default applied");
}

fn decode_text(id: &TaskId, fields: &DocumentFields, field: &'static str) -> String {
    match fields.get(field).and_then(Value::as_str) {
        Some(text) => text.to_owned(),
        None => {
            note_default(id, field);
            String::new()
        }
    }
}

/// Accepts RFC 3339 strings, epoch milliseconds and `{seconds, nanoseconds}`
/// timestamp objects.
fn decode_due_date(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(raw) => DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc)),
        Value::Number(millis) => DateTime::from_timestamp_millis(millis.as_i64()?),
        Value::Object(timestamp) => {
            let seconds = timestamp.get("seconds").and_then(Value::as_i64)?;
            let nanos = timestamp
                .get("nanoseconds")
                .and_then(Value::as_u64)
                .unwrap_or_default();
            DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
        }
        _ => None,
    }
}

fn decode_sub_tasks(id: &TaskId, value: Option<&Value>) -> Vec<SubTask> {
    let Some(Value::Array(entries)) = value else {
        note_default(id, FIELD_SUB_TASKS);
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| match entry {
            Value::Object(entry) => {
                let text = entry.get("text").and_then(Value::as_str).unwrap_or_default();
                let is_checked = entry
                    .get("isChecked")
                    .and_then(Value::as_bool)
                    .unwrap_or_default();
                SubTask::new(text).checked(is_checked)
            }
            Value::String(text) => {
                note_default(id, FIELD_SUB_TASKS);
                SubTask::new(text.as_str())
            }
            _ => {
                note_default(id, FIELD_SUB_TASKS);
                SubTask::new("")
            }
        })
        .collect()
}

/// Entries without a usable `contactId` are kept verbatim so a later whole
/// task write does not erase them.
fn decode_assignees(id: &TaskId, value: Option<&Value>) -> Vec<AssigneeRef> {
    let Some(Value::Array(entries)) = value else {
        note_default(id, FIELD_ASSIGNED_TO);
        return Vec::new();
    };
    entries
        .iter()
        .map(|entry| {
            entry
                .get("contactId")
                .and_then(Value::as_str)
                .and_then(|raw| ContactId::new(raw).ok())
                .map_or_else(
                    || {
                        note_default(id, FIELD_ASSIGNED_TO);
                        AssigneeRef::Unreadable(entry.clone())
                    },
                    AssigneeRef::new,
                )
        })
        .collect()
}
