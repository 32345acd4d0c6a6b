use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::TudooError;
use crate::models::{Session, User};

pub const HOME_ENV: &str = "TUDOO_HOME";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<StoredSession>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub user_id: String,
    pub email: String,
}

impl Config {
    pub fn session(&self) -> Session {
        match &self.session {
            Some(s) => Session::for_user(User {
                id: s.user_id.clone(),
                email: s.email.clone(),
            }),
            None => Session::anonymous(),
        }
    }

    pub fn set_user(&mut self, user: Option<&User>) {
        self.session = user.map(|u| StoredSession {
            user_id: u.id.clone(),
            email: u.email.clone(),
        });
    }
}

/// Data directory: `$TUDOO_HOME`, else `$HOME/.tudoo`.
pub fn data_home() -> Result<PathBuf, TudooError> {
    if let Some(dir) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(|home| PathBuf::from(home).join(".tudoo"))
        .ok_or_else(|| {
            TudooError::new(
                crate::error::ErrorCode::NotInitialized,
                format!("Cannot locate a data directory. Set {HOME_ENV}."),
            )
        })
}

pub fn db_path() -> Result<PathBuf, TudooError> {
    Ok(data_home()?.join("tudoo.db"))
}

pub fn config_path() -> Result<PathBuf, TudooError> {
    Ok(data_home()?.join("config.json"))
}

/// Read config.json. A missing or unreadable file yields the default config.
pub fn load() -> Config {
    let Ok(path) = config_path() else {
        return Config::default();
    };
    fs::read_to_string(&path)
        .ok()
        .and_then(|s| match serde_json::from_str(&s) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring malformed config");
                None
            }
        })
        .unwrap_or_default()
}

pub fn save(config: &Config) -> Result<(), TudooError> {
    let path = config_path()?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TudooError::gateway(e.to_string()))?;
    }
    let body = serde_json::to_string_pretty(config)
        .map_err(|e| TudooError::gateway(e.to_string()))?;
    fs::write(&path, body).map_err(|e| TudooError::gateway(e.to_string()))?;
    Ok(())
}
