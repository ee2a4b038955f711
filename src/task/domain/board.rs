//! Board columns and the task lifecycle between them.

use super::ParseTaskTypeError;
use serde::{Deserialize, Serialize};

/// Board column a task currently sits in.
///
/// The transition relation is complete: a task may move from any column to
/// any other column, and moving into the current column is a legal write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskType {
    /// Not started.
    #[default]
    #[serde(rename = "toDo")]
    ToDo,
    /// Being worked on.
    #[serde(rename = "inProgress")]
    InProgress,
    /// Waiting for feedback.
    #[serde(rename = "feedback")]
    Feedback,
    /// Finished.
    #[serde(rename = "done")]
    Done,
}

impl TaskType {
    /// All columns in board order.
    pub const ALL: [Self; 4] = [Self::ToDo, Self::InProgress, Self::Feedback, Self::Done];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ToDo => "toDo",
            Self::InProgress => "inProgress",
            Self::Feedback => "feedback",
            Self::Done => "done",
        }
    }

    /// Returns the column heading shown on the board.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ToDo => "To do",
            Self::InProgress => "In progress",
            Self::Feedback => "Await feedback",
            Self::Done => "Done",
        }
    }

    /// Returns the columns a task in this column can be moved to, excluding
    /// the current one, in board order.
    #[must_use]
    pub fn other_columns(self) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|column| *column != self)
            .collect()
    }
}

impl TryFrom<&str> for TaskType {
    type Error = ParseTaskTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "toDo" => Ok(Self::ToDo),
            "inProgress" => Ok(Self::InProgress),
            "feedback" => Ok(Self::Feedback),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskTypeError(value.to_owned())),
        }
    }
}
