//! Task entity type - follow-ups and to-dos

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::entity::{Entity, Priority};
use crate::core::identity::{EntityId, EntityPrefix};
use crate::grid::{Row, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Open,
    #[serde(rename = "in_progress")]
    InProgress,
    Done,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A Task entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: EntityId,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Assignee (employee name)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,

    /// Record this task relates to (customer, proposal, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related: Option<EntityId>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: TaskStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub created: DateTime<Utc>,

    pub author: String,
}

impl Entity for Task {
    const PREFIX: EntityPrefix = EntityPrefix::Task;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn status(&self) -> &'static str {
        self.status.as_str()
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }

    fn author(&self) -> &str {
        &self.author
    }
}

impl Task {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(EntityPrefix::Task),
            title: title.into(),
            details: None,
            assignee: None,
            related: None,
            priority: Priority::default(),
            status: TaskStatus::default(),
            due: None,
            tags: Vec::new(),
            created: Utc::now(),
            author: author.into(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    /// Overdue: an open task past its due date
    pub fn is_overdue_as_of(&self, today: NaiveDate) -> bool {
        !self.is_done() && self.due.is_some_and(|d| d < today)
    }
}

impl Row for Task {
    fn field(&self, key: &str) -> Value {
        match key {
            "id" => Value::Text(self.id.to_string()),
            "title" => Value::from(self.title.as_str()),
            "assignee" => Value::from(self.assignee.clone()),
            "related" => Value::from(self.related.as_ref().map(|r| r.to_string())),
            "priority" => Value::from(self.priority.to_string()),
            "status" => Value::from(self.status.as_str()),
            "done" => Value::Bool(self.is_done()),
            "due" => super::date_value(self.due),
            "tags" => super::tags_value(&self.tags),
            "created" => Value::Date(self.created),
            "author" => Value::from(self.author.as_str()),
            _ => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new("Call Acme about renewal", "test");
        assert!(task.id.to_string().starts_with("TASK-"));
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.is_done());
    }

    #[test]
    fn test_overdue_logic() {
        let mut task = Task::new("Call Acme", "test");
        let today = NaiveDate::from_ymd_opt(2026, 6, 15).unwrap();

        assert!(!task.is_overdue_as_of(today));

        task.due = NaiveDate::from_ymd_opt(2026, 6, 1);
        assert!(task.is_overdue_as_of(today));

        task.status = TaskStatus::Done;
        assert!(!task.is_overdue_as_of(today));
    }

    #[test]
    fn test_done_exposed_as_boolean_field() {
        let mut task = Task::new("Call Acme", "test");
        assert_eq!(task.field("done"), Value::Bool(false));

        task.status = TaskStatus::Done;
        assert_eq!(task.field("done"), Value::Bool(true));
    }

    #[test]
    fn test_in_progress_serializes_with_underscore() {
        let mut task = Task::new("Call Acme", "test");
        task.status = TaskStatus::InProgress;

        let yaml = serde_yml::to_string(&task).unwrap();
        assert!(yaml.contains("in_progress"));
    }
}
