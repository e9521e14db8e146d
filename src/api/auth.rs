use serde::{Deserialize, Serialize};

use super::http::HttpClient;
use crate::core::form::LoginCredentials;
use crate::error::Result;

pub const LOGIN_PATH: &str = "/auth/login";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginData {
    pub user: User,
    pub token: String,
    #[serde(default)]
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<LoginData>,
}

pub async fn login(http: &HttpClient, credentials: &LoginCredentials) -> Result<LoginResponse> {
    http.post(LOGIN_PATH, credentials).await
}

/// Login and logout with the token store kept in step.
pub struct Session {
    http: HttpClient,
}

impl Session {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Log in and store the returned token. The token is only stored when the
    /// server reports success and actually sent one.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse> {
        let response = login(&self.http, credentials).await?;
        match response.data.as_ref().filter(|_| response.success) {
            Some(data) if !data.token.is_empty() => {
                self.http.tokens().set_token(&data.token)?;
                log::info!("Logged in as {}", data.user.email);
            }
            _ => log::warn!("Login did not return a token: {}", response.message),
        }
        Ok(response)
    }

    pub fn logout(&self) -> Result<()> {
        self.http.tokens().clear_token()?;
        log::info!("Logged out");
        Ok(())
    }
}
