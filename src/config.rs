use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "taskdeck";
const CONFIG_FILE: &str = "config.json";
const COOKIE_FILE: &str = "cookies.json";

pub const ENV_API_BASE_URL: &str = "TASKDECK_API_BASE_URL";
pub const ENV_MODE: &str = "TASKDECK_ENV";

fn default_api_base_url() -> String {
    "http://127.0.0.1:8000".into()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join(APP_DIR)
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Production mode marks the auth cookie as secure.
    pub production: bool,
    pub debug_logging: bool,
    pub data_directory: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            production: false,
            debug_logging: false,
            data_directory: default_data_dir(),
        }
    }
}

impl AppConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join(APP_DIR)
            .join(CONFIG_FILE)
    }

    /// Load the config file at `path`, then apply environment overrides.
    pub fn load(path: &Path) -> Self {
        let mut config = Self::from_file(path);
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// The config file alone, without environment overrides. Missing or malformed
    /// files give defaults.
    pub fn from_file(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path.display(), e);
                return Self::default();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("Ignoring malformed config {}: {}", path.display(), e);
            Self::default()
        })
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(ENV_API_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(mode) = var(ENV_MODE) {
            self.production = mode.eq_ignore_ascii_case("production");
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    pub fn cookie_path(&self) -> PathBuf {
        self.data_directory.join(COOKIE_FILE)
    }

    /// Ensure the data directory exists.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_directory)
    }
}
