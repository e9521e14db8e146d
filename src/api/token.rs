use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;

pub const TOKEN_COOKIE_NAME: &str = "auth_token";
/// Reserved prefix some client versions put in front of the token.
pub const TOKEN_PREFIX: &str = "tm_";
pub const TOKEN_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// The persisted auth cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub name: String,
    pub value: String,
    pub path: String,
    pub expires: DateTime<Utc>,
    pub same_site: SameSite,
    pub secure: bool,
}

impl StoredCookie {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires <= now
    }
}

/// Where the auth cookie lives between runs.
pub trait CookieBackend: Send + Sync {
    fn load(&self) -> Result<Option<StoredCookie>>;
    fn save(&self, cookie: &StoredCookie) -> Result<()>;
    fn remove(&self) -> Result<()>;
}

/// Cookie persisted as JSON in the data directory.
pub struct CookieFile {
    path: PathBuf,
}

impl CookieFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Open for writing with owner-only permissions. The bearer token must not be
/// readable by other users.
#[cfg(unix)]
fn open_private(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation; tighten files left by older versions.
    file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    Ok(file)
}

#[cfg(not(unix))]
fn open_private(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}

impl CookieBackend for CookieFile {
    fn load(&self) -> Result<Option<StoredCookie>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str(&content) {
            Ok(cookie) => Ok(Some(cookie)),
            Err(e) => {
                log::warn!("Discarding unreadable cookie file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, cookie: &StoredCookie) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(cookie)?;
        open_private(&self.path)?.write_all(json.as_bytes())?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process cookie, gone when the process exits.
#[derive(Default)]
pub struct MemoryBackend {
    cookie: Mutex<Option<StoredCookie>>,
}

impl CookieBackend for MemoryBackend {
    fn load(&self) -> Result<Option<StoredCookie>> {
        Ok(self.cookie.lock().map(|c| c.clone()).unwrap_or_default())
    }

    fn save(&self, cookie: &StoredCookie) -> Result<()> {
        if let Ok(mut slot) = self.cookie.lock() {
            *slot = Some(cookie.clone());
        }
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if let Ok(mut slot) = self.cookie.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// Remove the reserved prefix so it is never stored twice.
pub fn strip_prefix(token: &str) -> &str {
    token.strip_prefix(TOKEN_PREFIX).unwrap_or(token)
}

/// Bearer token persistence. A set token expires a fixed seven days later;
/// reading it never extends that window.
pub struct TokenStore {
    backend: Box<dyn CookieBackend>,
    secure: bool,
}

impl TokenStore {
    pub fn new(backend: impl CookieBackend + 'static, secure: bool) -> Self {
        Self {
            backend: Box::new(backend),
            secure,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::default(), false)
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.set_token_at(token, Utc::now())
    }

    pub fn set_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<()> {
        let cookie = StoredCookie {
            name: TOKEN_COOKIE_NAME.to_string(),
            value: strip_prefix(token).to_string(),
            path: "/".to_string(),
            expires: now + Duration::days(TOKEN_LIFETIME_DAYS),
            same_site: SameSite::Lax,
            secure: self.secure,
        };
        self.backend.save(&cookie)
    }

    pub fn token(&self) -> Option<String> {
        self.token_at(Utc::now())
    }

    pub fn token_at(&self, now: DateTime<Utc>) -> Option<String> {
        let cookie = match self.backend.load() {
            Ok(cookie) => cookie?,
            Err(e) => {
                log::warn!("Failed to read auth cookie: {}", e);
                return None;
            }
        };
        if cookie.name != TOKEN_COOKIE_NAME || cookie.is_expired(now) || cookie.value.is_empty() {
            return None;
        }
        Some(cookie.value)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.backend.remove()
    }

    /// Presence only. Freshness and signature are the server's business.
    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// When the stored cookie expires, if one is stored.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.backend.load().ok().flatten().map(|c| c.expires)
    }
}
