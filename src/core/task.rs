use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

use super::due_date;
use super::project::Project;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
#[value(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Done => "done",
        }
    }

    /// Label shown on task cards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in progress",
            Self::Done => "done",
        }
    }
}

/// Missing and `null` both decode as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

/// Project reference embedded in a task response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskProject {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<TaskProject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Task {
    pub fn new(id: i64, title: impl Into<String>, project_id: i64) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            project_id,
            project: None,
            tags: None,
            due_date: None,
            status: TaskStatus::Todo,
            created_at: None,
            updated_at: None,
        }
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.as_deref().unwrap_or(&[])
    }

    pub fn has_tag(&self, tag_id: i64) -> bool {
        self.tags().iter().any(|t| t.id == tag_id)
    }

    /// Calendar date the task is due on. Unparseable dates count as undated.
    pub fn due_on(&self) -> Option<NaiveDate> {
        self.due_date.as_deref().and_then(due_date::parse)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        due_date::is_overdue(self.due_date.as_deref(), today)
    }

    /// Name of the owning project: the embedded reference first, then the loaded projects.
    pub fn project_label(&self, projects: &[Project]) -> Option<String> {
        if let Some(project) = self.project.as_ref().filter(|p| !p.name.is_empty()) {
            return Some(project.name.clone());
        }
        projects
            .iter()
            .find(|p| p.id == self.project_id)
            .map(Project::display_name)
    }
}

/// Create payload. `tags` holds tag ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateTaskDto {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub project_id: i64,
    pub tags: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    pub status: TaskStatus,
}

impl CreateTaskDto {
    pub fn new(title: impl Into<String>, project_id: i64) -> Self {
        Self {
            title: title.into(),
            description: None,
            project_id,
            tags: Vec::new(),
            due_date: None,
            status: TaskStatus::Todo,
        }
    }

    /// The payload as transmitted: bare dates expanded to midnight.
    pub fn into_payload(mut self) -> Self {
        self.due_date = self.due_date.as_deref().map(due_date::expand_for_transmission);
        self
    }
}

/// Partial update. Fields left as `None` are omitted from the request body;
/// `Some(None)` on `description` or `due_date` sends `null` to clear it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateTaskDto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl UpdateTaskDto {
    pub fn into_payload(mut self) -> Self {
        self.due_date = self
            .due_date
            .map(|d| d.as_deref().map(due_date::expand_for_transmission));
        self
    }
}
