use serde::{Deserialize, Serialize};

/// A project as returned by the backend, which names it `title`, `name`, or both.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Canonical project. `title` is always resolved; see [`resolve_title`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProjectRecord")]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// `title`, else `name`, else `Project {id}`. Empty strings count as missing.
pub fn resolve_title(id: i64, title: Option<&str>, name: Option<&str>) -> String {
    title
        .filter(|t| !t.is_empty())
        .or(name.filter(|n| !n.is_empty()))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Project {}", id))
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        let title = resolve_title(record.id, record.title.as_deref(), record.name.as_deref());
        Self {
            id: record.id,
            title,
            name: record.name,
            description: record.description,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

impl Project {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            name: None,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Label used where a project is referenced from a task: `name` first, then `title`.
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| resolve_title(self.id, Some(&self.title), None))
    }
}

/// Create payload. Both `title` and `name` carry the same value for backend compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateProjectDto {
    pub title: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateProjectDto {
    pub title: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CreateProjectDto {
    /// The request body, or `None` when neither a name nor a title was given.
    pub fn into_payload(self) -> Option<ProjectPayload> {
        let project_name = self
            .name
            .filter(|n| !n.is_empty())
            .or(self.title.filter(|t| !t.is_empty()))?;
        Some(ProjectPayload {
            title: Some(project_name.clone()),
            name: Some(project_name),
            description: self.description,
        })
    }
}

impl UpdateProjectDto {
    /// Only provided fields are sent; a provided `name` wins over a provided `title`.
    pub fn into_payload(self) -> ProjectPayload {
        let project_name = self.name.or(self.title);
        ProjectPayload {
            title: project_name.clone(),
            name: project_name,
            description: self.description,
        }
    }
}
