pub mod auth;
pub mod http;
pub mod normalize;
pub mod projects;
pub mod tasks;
pub mod token;

#[cfg(test)]
pub(crate) mod test_server;

use std::sync::Arc;

pub use auth::{LoginResponse, Session};
pub use http::HttpClient;
pub use projects::ProjectsApi;
pub use tasks::TasksApi;
pub use token::{CookieFile, TokenStore};

use crate::config::AppConfig;
use crate::error::Result;

/// Everything a front end needs to talk to the service, sharing one token store.
#[derive(Clone)]
pub struct Client {
    pub http: HttpClient,
    pub projects: ProjectsApi,
    pub tasks: TasksApi,
}

impl Client {
    pub fn new(http: HttpClient) -> Self {
        Self {
            projects: ProjectsApi::new(http.clone()),
            tasks: TasksApi::new(http.clone()),
            http,
        }
    }

    /// Client backed by the cookie file in the configured data directory.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let tokens = TokenStore::new(CookieFile::new(config.cookie_path()), config.production);
        let http = HttpClient::new(&config.api_base_url, Arc::new(tokens))?;
        Ok(Self::new(http))
    }

    pub fn session(&self) -> Session {
        Session::new(self.http.clone())
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        self.http.tokens()
    }
}
