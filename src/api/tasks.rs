use serde_json::Value;

use super::http::HttpClient;
use super::normalize;
use crate::core::task::{CreateTaskDto, Task, UpdateTaskDto};
use crate::error::Result;

const TASKS_PATH: &str = "/api/tasks";

#[derive(Clone)]
pub struct TasksApi {
    http: HttpClient,
}

impl TasksApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// All tasks. Transport and status failures propagate; an unknown envelope is empty.
    pub async fn get_all(&self) -> Result<Vec<Task>> {
        let response: Value = self.http.get(TASKS_PATH).await?;
        Ok(normalize::decode_list(response, "tasks"))
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Task> {
        let response: Value = self.http.get(&format!("{TASKS_PATH}/{id}")).await?;
        normalize::decode_entity(response, "task")
    }

    pub async fn create(&self, dto: CreateTaskDto) -> Result<Task> {
        let response: Value = self.http.post(TASKS_PATH, &dto.into_payload()).await?;
        let task: Task = normalize::decode_entity(response, "task")?;
        log::info!("Created task {} ({})", task.id, task.title);
        Ok(task)
    }

    pub async fn update(&self, id: i64, dto: UpdateTaskDto) -> Result<Task> {
        let response: Value = self
            .http
            .put(&format!("{TASKS_PATH}/{id}"), &dto.into_payload())
            .await?;
        let task: Task = normalize::decode_entity(response, "task")?;
        log::info!("Updated task {}", task.id);
        Ok(task)
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        let _: Value = self.http.delete(&format!("{TASKS_PATH}/{id}")).await?;
        log::info!("Deleted task {}", id);
        Ok(())
    }
}
