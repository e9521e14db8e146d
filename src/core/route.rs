//! Which views may be entered with or without a stored token.

use reqwest::Url;

pub const LOGIN_ROUTE: &str = "/login";
pub const TASKS_ROUTE: &str = "/tasks";

const PUBLIC_ROUTES: &[&str] = &[LOGIN_ROUTE];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_ROUTES.contains(&path)
}

pub fn guard(path: &str, authenticated: bool) -> RouteDecision {
    if authenticated && path == LOGIN_ROUTE {
        return RouteDecision::Redirect(TASKS_ROUTE.to_string());
    }
    if !authenticated && !is_public(path) {
        if path == "/" {
            return RouteDecision::Redirect(LOGIN_ROUTE.to_string());
        }
        return RouteDecision::Redirect(login_redirect(path));
    }
    RouteDecision::Allow
}

/// `/login?redirect=<path>` with the path form-encoded.
fn login_redirect(path: &str) -> String {
    match Url::parse("http://localhost/login") {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("redirect", path);
            format!("{}?{}", url.path(), url.query().unwrap_or_default())
        }
        Err(_) => LOGIN_ROUTE.to_string(),
    }
}
