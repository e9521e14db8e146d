use serde_json::Value;

use super::http::HttpClient;
use super::normalize;
use crate::core::project::{CreateProjectDto, Project, UpdateProjectDto};
use crate::error::{Result, ValidationError};

const PROJECTS_PATH: &str = "/api/projects";

#[derive(Clone)]
pub struct ProjectsApi {
    http: HttpClient,
}

impl ProjectsApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// All projects. Failures are logged and yield an empty list.
    pub async fn get_all(&self) -> Vec<Project> {
        match self.http.get::<Value>(PROJECTS_PATH).await {
            Ok(response) => normalize::projects(response),
            Err(e) => {
                log::error!("Error fetching projects: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Project> {
        let response: Value = self.http.get(&format!("{PROJECTS_PATH}/{id}")).await?;
        normalize::project(response)
    }

    pub async fn create(&self, dto: CreateProjectDto) -> Result<Project> {
        let payload = dto
            .into_payload()
            .ok_or_else(|| ValidationError::single("name", "Project name is required"))?;
        let response: Value = self.http.post(PROJECTS_PATH, &payload).await?;
        let project = normalize::project(response)?;
        log::info!("Created project {} ({})", project.id, project.title);
        Ok(project)
    }

    pub async fn update(&self, id: i64, dto: UpdateProjectDto) -> Result<Project> {
        let response: Value = self
            .http
            .put(&format!("{PROJECTS_PATH}/{id}"), &dto.into_payload())
            .await?;
        let project = normalize::project(response)?;
        log::info!("Updated project {}", project.id);
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TokenStore;
    use crate::api::test_server::MockServer;
    use crate::error::Error;
    use serde_json::json;
    use std::sync::Arc;

    async fn api(responses: Vec<(u16, &'static str)>) -> (MockServer, ProjectsApi) {
        let server = MockServer::start(responses).await;
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set_token("t").unwrap();
        let api = ProjectsApi::new(HttpClient::new(&server.url, tokens).unwrap());
        (server, api)
    }

    #[tokio::test]
    async fn list_accepts_named_collection() {
        let (_server, api) =
            api(vec![(200, r#"{"projects": [{"id": 1, "name": "Ops"}, {"id": 2}]}"#)]).await;
        let projects = api.get_all().await;
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[0].title, "Ops");
        assert_eq!(projects[1].title, "Project 2");
    }

    #[tokio::test]
    async fn list_failure_degrades_to_empty() {
        let (_server, api) = api(vec![(500, r#"{"message": "boom"}"#)]).await;
        assert!(api.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn single_fetch_normalizes_title() {
        let (server, api) = api(vec![(200, r#"{"data": {"id": 5, "name": "Ops"}}"#)]).await;
        let project = api.get_by_id(5).await.unwrap();
        assert_eq!(project.title, "Ops");
        assert_eq!(server.requests()[0].path, "/api/projects/5");
    }

    #[tokio::test]
    async fn single_fetch_rejects_unknown_shape() {
        let (_server, api) = api(vec![(200, r#"{"unexpected": true}"#)]).await;
        let err = api.get_by_id(5).await.unwrap_err();
        assert!(matches!(err, Error::InvalidResponseShape { entity: "project" }));
    }

    #[tokio::test]
    async fn single_fetch_propagates_http_errors() {
        let (_server, api) = api(vec![(404, r#"{"message": "Not found"}"#)]).await;
        let err = api.get_by_id(5).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Http {
                status: reqwest::StatusCode::NOT_FOUND,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn create_sends_title_and_name() {
        let (server, api) =
            api(vec![(201, r#"{"data": {"id": 9, "name": "Launch", "title": "Launch"}}"#)]).await;
        let project = api
            .create(CreateProjectDto {
                name: Some("Launch".into()),
                description: Some("Q3".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(project.id, 9);
        let req = &server.requests()[0];
        assert_eq!(req.method, "POST");
        assert_eq!(
            req.json(),
            json!({"title": "Launch", "name": "Launch", "description": "Q3"})
        );
    }

    #[tokio::test]
    async fn create_without_name_never_hits_network() {
        let (server, api) = api(vec![]).await;
        let err = api.create(CreateProjectDto::default()).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), "Project name is required");
        assert!(server.requests().is_empty());
    }

    #[tokio::test]
    async fn update_sends_only_given_fields() {
        let (server, api) = api(vec![(200, r#"{"id": 3, "title": "Renamed"}"#)]).await;
        api.update(
            3,
            UpdateProjectDto {
                title: Some("Renamed".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let req = &server.requests()[0];
        assert_eq!(req.method, "PUT");
        assert_eq!(req.path, "/api/projects/3");
        assert_eq!(req.json(), json!({"title": "Renamed", "name": "Renamed"}));
    }
}
