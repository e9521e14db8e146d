use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use super::token::TokenStore;
use crate::error::{Error, Result};

const AUTH_ENDPOINTS: &[&str] = &["/auth/login", "/auth/register"];

/// Login and registration go out without a bearer token.
pub fn is_auth_endpoint(path: &str) -> bool {
    AUTH_ENDPOINTS.iter().any(|p| path.contains(p))
}

/// JSON client for the task service. Attaches the stored bearer token to every
/// non-auth request and forgets the token when the server answers 401.
#[derive(Clone)]
pub struct HttpClient {
    base_url: String,
    tokens: Arc<TokenStore>,
    http: Client,
}

impl HttpClient {
    pub fn new(base_url: &str, tokens: Arc<TokenStore>) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| Error::Config(format!("base URL {base_url:?}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let http = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url,
            tokens,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send(Method::DELETE, path, None::<&()>).await
    }

    async fn send<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if !is_auth_endpoint(path) {
            match self.tokens.token() {
                Some(token) => {
                    if crate::debug_logging() {
                        let preview: String = token.chars().take(20).collect();
                        log::debug!("Token added to request: {} {} {}...", method, path, preview);
                    }
                    request = request.bearer_auth(token);
                }
                None => {
                    if crate::debug_logging() {
                        log::warn!("No token found for request: {} {}", method, path);
                    }
                }
            }
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;

        if status == StatusCode::UNAUTHORIZED {
            log::info!("{} {} returned 401, clearing stored token", method, path);
            if let Err(e) = self.tokens.clear_token() {
                log::error!("Failed to clear token: {}", e);
            }
        }

        if !status.is_success() {
            return Err(Error::Http {
                status,
                message: error_message(status, &bytes),
            });
        }

        let value: Value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok(serde_json::from_value(value)?)
    }
}

/// The server's `message` field when it sent one, else the status reason.
fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::MockServer;
    use serde_json::json;

    fn client(server: &MockServer, tokens: Arc<TokenStore>) -> HttpClient {
        HttpClient::new(&server.url, tokens).unwrap()
    }

    #[test]
    fn auth_endpoints() {
        assert!(is_auth_endpoint("/auth/login"));
        assert!(is_auth_endpoint("/api/auth/register"));
        assert!(!is_auth_endpoint("/api/tasks"));
    }

    #[test]
    fn rejects_unusable_base_url() {
        let res = HttpClient::new("not a url", Arc::new(TokenStore::in_memory()));
        assert!(matches!(res, Err(Error::Config(_))));
    }

    #[tokio::test]
    async fn attaches_bearer_token() {
        let server = MockServer::start(vec![(200, r#"[]"#)]).await;
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set_token("secret").unwrap();

        let _: Value = client(&server, tokens).get("/api/tasks").await.unwrap();

        let req = &server.requests()[0];
        assert_eq!(req.method, "GET");
        assert_eq!(req.path, "/api/tasks");
        assert_eq!(req.header("authorization"), Some("Bearer secret"));
        assert_eq!(req.header("accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn login_goes_without_token() {
        let server = MockServer::start(vec![(200, r#"{"success": true}"#)]).await;
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set_token("stale").unwrap();

        let _: Value = client(&server, tokens)
            .post("/auth/login", &json!({"email": "a@b.co", "password": "secret"}))
            .await
            .unwrap();

        let req = &server.requests()[0];
        assert_eq!(req.header("authorization"), None);
        assert_eq!(req.json(), json!({"email": "a@b.co", "password": "secret"}));
    }

    #[tokio::test]
    async fn missing_token_still_sends() {
        let server = MockServer::start(vec![(200, r#"{"id": 1}"#)]).await;
        let value: Value = client(&server, Arc::new(TokenStore::in_memory()))
            .get("/api/projects/1")
            .await
            .unwrap();
        assert_eq!(value, json!({"id": 1}));
        assert_eq!(server.requests()[0].header("authorization"), None);
    }

    #[tokio::test]
    async fn unauthorized_clears_token_and_propagates() {
        let server = MockServer::start(vec![(401, r#"{"message": "Unauthenticated."}"#)]).await;
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set_token("expired").unwrap();

        let err = client(&server, tokens.clone())
            .get::<Value>("/api/tasks")
            .await
            .unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "HTTP 401 Unauthorized: Unauthenticated.");
        assert!(!tokens.is_authenticated());
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn other_failures_keep_token() {
        let server = MockServer::start(vec![(500, "oops")]).await;
        let tokens = Arc::new(TokenStore::in_memory());
        tokens.set_token("keep").unwrap();

        let err = client(&server, tokens.clone())
            .delete::<()>("/api/tasks/3")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Http {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                ..
            }
        ));
        assert_eq!(err.to_string(), "HTTP 500 Internal Server Error: Internal Server Error");
        assert!(tokens.is_authenticated());
    }

    #[tokio::test]
    async fn empty_body_decodes_as_unit() {
        let server = MockServer::start(vec![(204, "")]).await;
        client(&server, Arc::new(TokenStore::in_memory()))
            .delete::<()>("/api/tasks/3")
            .await
            .unwrap();
        assert_eq!(server.requests()[0].method, "DELETE");
    }
}
