//! Form validation for login, project, and task input. Failures stay here as
//! [`ValidationError`]s and never reach the network layer.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::due_date;
use super::project::{CreateProjectDto, Project};
use super::task::{CreateTaskDto, Task, TaskStatus, UpdateTaskDto};
use crate::error::ValidationError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$").unwrap());

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(self) -> Result<LoginCredentials, ValidationError> {
        let mut errors = ValidationError::default();
        if self.email.is_empty() {
            errors.push("email", "Email is required");
        } else if !EMAIL_RE.is_match(&self.email) {
            errors.push("email", "Invalid email address");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push("password", "Password must be at least 6 characters");
        }
        errors.into_result(|| LoginCredentials {
            email: self.email,
            password: self.password,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
}

impl ProjectForm {
    pub fn from_project(project: &Project) -> Self {
        let title = if project.title.is_empty() {
            project.name.clone().unwrap_or_default()
        } else {
            project.title.clone()
        };
        Self {
            title,
            description: project.description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(self) -> Result<CreateProjectDto, ValidationError> {
        let title = self.title.trim().to_string();
        let mut errors = ValidationError::default();
        if title.is_empty() {
            errors.push("title", "Project name is required");
        }
        errors.into_result(|| CreateProjectDto {
            title: Some(title.clone()),
            name: Some(title),
            description: Some(self.description).filter(|d| !d.is_empty()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub project_id: Option<i64>,
    /// `YYYY-MM-DD` or empty.
    pub due_date: String,
    pub status: Option<TaskStatus>,
    pub tags: Vec<i64>,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            project_id: None,
            due_date: String::new(),
            status: Some(TaskStatus::Todo),
            tags: Vec::new(),
        }
    }
}

impl TaskForm {
    pub fn validate(self) -> Result<CreateTaskDto, ValidationError> {
        let mut errors = ValidationError::default();
        if self.title.trim().is_empty() {
            errors.push("title", "Title is required");
        }
        let project_id = self.project_id.filter(|id| *id != 0);
        if project_id.is_none() {
            errors.push("project_id", "Project is required");
        }
        if self.status.is_none() {
            errors.push("status", "Status is required");
        }
        let due_date = Some(self.due_date.trim().to_string()).filter(|d| !d.is_empty());
        if let Some(d) = &due_date {
            if due_date::parse(d).is_none() {
                errors.push("due_date", "Invalid due date");
            }
        }
        errors.into_result(|| CreateTaskDto {
            title: self.title,
            description: Some(self.description).filter(|d| !d.is_empty()),
            project_id: project_id.unwrap_or_default(),
            tags: self.tags.into_iter().filter(|&id| id != 0).collect(),
            due_date,
            status: self.status.unwrap_or_default(),
        })
    }
}

/// Changes to an existing task. Only the fields that are set get validated and
/// sent; an empty description or due date clears it on the server.
#[derive(Debug, Clone, Default)]
pub struct TaskEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<i64>,
    pub due_date: Option<String>,
    pub status: Option<TaskStatus>,
    pub tags: Option<Vec<i64>>,
}

impl TaskEdit {
    /// Flip one tag on or off, starting from the task's current tags unless a
    /// replacement set was already given.
    pub fn toggle_tag(&mut self, task: &Task, tag_id: i64) {
        let tags = self
            .tags
            .get_or_insert_with(|| task.tags().iter().map(|t| t.id).collect());
        if let Some(pos) = tags.iter().position(|&id| id == tag_id) {
            tags.remove(pos);
        } else {
            tags.push(tag_id);
        }
    }

    pub fn validate(self) -> Result<UpdateTaskDto, ValidationError> {
        let mut errors = ValidationError::default();
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            errors.push("title", "Title is required");
        }
        if self.project_id == Some(0) {
            errors.push("project_id", "Project is required");
        }
        let due_date = self
            .due_date
            .map(|d| Some(d.trim().to_string()).filter(|d| !d.is_empty()));
        if let Some(Some(d)) = &due_date {
            if due_date::parse(d).is_none() {
                errors.push("due_date", "Invalid due date");
            }
        }
        errors.into_result(|| UpdateTaskDto {
            title: self.title,
            description: self.description.map(|d| Some(d).filter(|d| !d.is_empty())),
            project_id: self.project_id,
            tags: self
                .tags
                .map(|tags| tags.into_iter().filter(|&id| id != 0).collect()),
            due_date,
            status: self.status,
        })
    }
}
