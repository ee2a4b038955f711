//! Task aggregate root and its owned values.

use super::{ParsePriorityError, TaskDomainError, TaskId, TaskType};
use crate::contact::domain::ContactId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Task priority.
///
/// Variants are declared in severity order, so `Ord` compares by severity.
/// The store sorts the stored strings lexicographically, which happens to
/// agree for these three names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal.
    Medium,
    /// Needs attention first.
    Urgent,
}

impl Priority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::Urgent => "urgent",
        }
    }
}

impl TryFrom<&str> for Priority {
    type Error = ParsePriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "urgent" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(value.to_owned())),
        }
    }
}

/// Checklist entry owned by its parent task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    text: String,
    is_checked: bool,
}

impl SubTask {
    /// Creates an unchecked subtask.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_checked: false,
        }
    }

    /// Sets the checked flag.
    #[must_use]
    pub const fn checked(mut self, is_checked: bool) -> Self {
        self.is_checked = is_checked;
        self
    }

    /// Returns the subtask text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` when the subtask is done.
    #[must_use]
    pub const fn is_checked(&self) -> bool {
        self.is_checked
    }

    /// Sets the checked flag in place.
    pub const fn set_checked(&mut self, is_checked: bool) {
        self.is_checked = is_checked;
    }
}

/// Weak reference to a contact in the external directory.
///
/// The referenced contact may have been deleted; resolution happens at read
/// time against the current directory snapshot. Stored entries without a
/// usable contact id are carried as [`AssigneeRef::Unreadable`] so that
/// writing the task back leaves them in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeRef {
    /// Reference to a contact by id.
    Contact(ContactId),
    /// Stored entry that names no contact; never resolves.
    Unreadable(Value),
}

impl AssigneeRef {
    /// Creates a reference to the given contact.
    #[must_use]
    pub const fn new(contact_id: ContactId) -> Self {
        Self::Contact(contact_id)
    }

    /// Returns the referenced contact identifier, `None` for an unreadable
    /// entry.
    #[must_use]
    pub const fn contact_id(&self) -> Option<&ContactId> {
        match self {
            Self::Contact(contact_id) => Some(contact_id),
            Self::Unreadable(_) => None,
        }
    }
}

/// Checked versus total subtask counts for a task card.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubtaskProgress {
    /// Number of checked subtasks.
    pub done: usize,
    /// Number of subtasks.
    pub total: usize,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: Option<TaskId>,
    title: String,
    description: String,
    category: String,
    due_date: DateTime<Utc>,
    priority: Option<Priority>,
    task_type: TaskType,
    sub_tasks: Vec<SubTask>,
    assigned_to: Vec<AssigneeRef>,
}

/// Parameter object for reconstructing a task read from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Category label.
    pub category: String,
    /// Due date.
    pub due_date: DateTime<Utc>,
    /// Priority, `None` when unset.
    pub priority: Option<Priority>,
    /// Board column.
    pub task_type: TaskType,
    /// Ordered subtasks.
    pub sub_tasks: Vec<SubTask>,
    /// Assignee references in stored order.
    pub assigned_to: Vec<AssigneeRef>,
}

impl Task {
    /// Creates a new, not yet persisted task in the to-do column.
    #[must_use]
    pub fn new(title: impl Into<String>, due_date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: title.into(),
            description: String::new(),
            category: String::new(),
            due_date,
            priority: None,
            task_type: TaskType::ToDo,
            sub_tasks: Vec::new(),
            assigned_to: Vec::new(),
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: Some(data.id),
            title: data.title,
            description: data.description,
            category: data.category,
            due_date: data.due_date,
            priority: data.priority,
            task_type: data.task_type,
            sub_tasks: data.sub_tasks,
            assigned_to: data.assigned_to,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the board column.
    #[must_use]
    pub const fn with_task_type(mut self, task_type: TaskType) -> Self {
        self.task_type = task_type;
        self
    }

    /// Sets the subtasks.
    #[must_use]
    pub fn with_sub_tasks(mut self, sub_tasks: impl IntoIterator<Item = SubTask>) -> Self {
        self.sub_tasks = sub_tasks.into_iter().collect();
        self
    }

    /// Sets the assignee references.
    #[must_use]
    pub fn with_assignees(mut self, assigned_to: impl IntoIterator<Item = AssigneeRef>) -> Self {
        self.assigned_to = assigned_to.into_iter().collect();
        self
    }

    /// Returns the store identifier, `None` before first persistence.
    #[must_use]
    pub const fn id(&self) -> Option<&TaskId> {
        self.id.as_ref()
    }

    /// Returns the store identifier of a persisted task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Unpersisted`] when the task has no id.
    pub fn require_id(&self) -> Result<&TaskId, TaskDomainError> {
        self.id.as_ref().ok_or(TaskDomainError::Unpersisted)
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Returns the due date.
    #[must_use]
    pub const fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// Returns the priority, `None` when unset.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the board column.
    #[must_use]
    pub const fn task_type(&self) -> TaskType {
        self.task_type
    }

    /// Returns the subtasks in display order.
    #[must_use]
    pub fn sub_tasks(&self) -> &[SubTask] {
        &self.sub_tasks
    }

    /// Returns mutable access to the subtask list.
    pub const fn sub_tasks_mut(&mut self) -> &mut Vec<SubTask> {
        &mut self.sub_tasks
    }

    /// Returns the assignee references in stored order.
    #[must_use]
    pub fn assigned_to(&self) -> &[AssigneeRef] {
        &self.assigned_to
    }

    /// Replaces the title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Replaces the description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the category.
    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    /// Replaces the due date.
    pub const fn set_due_date(&mut self, due_date: DateTime<Utc>) {
        self.due_date = due_date;
    }

    /// Replaces the priority.
    pub const fn set_priority(&mut self, priority: Option<Priority>) {
        self.priority = priority;
    }

    /// Replaces the assignee references.
    pub fn set_assignees(&mut self, assigned_to: impl IntoIterator<Item = AssigneeRef>) {
        self.assigned_to = assigned_to.into_iter().collect();
    }

    /// Moves a persisted task into `target` and returns the previous column.
    ///
    /// Moving into the current column is accepted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::Unpersisted`] when the task has no id.
    pub fn move_to(&mut self, target: TaskType) -> Result<TaskType, TaskDomainError> {
        self.require_id()?;
        let previous = self.task_type;
        self.task_type = target;
        Ok(previous)
    }

    /// Flips the checked flag of the subtask at `index` and returns the new
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SubtaskIndexOutOfRange`] for a bad index.
    pub fn toggle_subtask(&mut self, index: usize) -> Result<bool, TaskDomainError> {
        let len = self.sub_tasks.len();
        let sub_task = self
            .sub_tasks
            .get_mut(index)
            .ok_or(TaskDomainError::SubtaskIndexOutOfRange { index, len })?;
        let is_checked = !sub_task.is_checked();
        sub_task.set_checked(is_checked);
        Ok(is_checked)
    }

    /// Removes and returns the subtask at `index`, keeping the order of the
    /// remaining entries.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::SubtaskIndexOutOfRange`] for a bad index.
    pub fn remove_subtask(&mut self, index: usize) -> Result<SubTask, TaskDomainError> {
        let len = self.sub_tasks.len();
        if index >= len {
            return Err(TaskDomainError::SubtaskIndexOutOfRange { index, len });
        }
        Ok(self.sub_tasks.remove(index))
    }

    /// Returns the checked subtasks in display order.
    pub fn completed_subtasks(&self) -> impl Iterator<Item = &SubTask> {
        self.sub_tasks.iter().filter(|sub_task| sub_task.is_checked())
    }

    /// Returns checked versus total subtask counts.
    #[must_use]
    pub fn subtask_progress(&self) -> SubtaskProgress {
        SubtaskProgress {
            done: self.completed_subtasks().count(),
            total: self.sub_tasks.len(),
        }
    }
}
