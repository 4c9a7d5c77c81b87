use std::path::PathBuf;

use axum_extra::extract::cookie::Key;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::FlatshareError;

/// Environment variable naming an optional TOML settings file.
pub const SETTINGS_ENV: &str = "FLATSHARE_SETTINGS";

/// Prefix for per-field environment overrides, e.g. `FLATSHARE_DATABASE_URL`.
pub const ENV_PREFIX: &str = "FLATSHARE_";

/// Cookie keys need 512 bits of material.
pub const MIN_SECRET_LEN: usize = 64;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub debug: bool,
    pub loglevel: Option<String>,
    /// Empty means a random key per process; sessions then end on restart.
    pub secret_key: String,
    /// Default admin credentials. Carried for compatibility; no route reads them.
    pub username: String,
    pub password: String,
    /// Mark cookies `Secure`. Only enable behind TLS: browsers drop `Secure`
    /// cookies set over plain HTTP.
    pub secure_cookie: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:tmp/flatshare.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            debug: false,
            loglevel: None,
            secret_key: String::new(),
            username: "admin".to_string(),
            password: "admin".to_string(),
            secure_cookie: false,
        }
    }
}

impl Config {
    /// Layer defaults, the optional settings file and `FLATSHARE_*` variables.
    pub fn load() -> Result<Self, FlatshareError> {
        let settings = std::env::var_os(SETTINGS_ENV).map(PathBuf::from);
        Self::figment(settings).extract().map_err(Into::into)
    }

    pub fn figment(settings: Option<PathBuf>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = settings {
            figment = figment.merge(Toml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX))
    }

    pub fn log_filter(&self) -> String {
        match (&self.loglevel, self.debug) {
            (Some(level), _) => level.clone(),
            (None, true) => "debug".to_string(),
            (None, false) => "info".to_string(),
        }
    }

    pub fn cookie_key(&self) -> Result<Key, FlatshareError> {
        if self.secret_key.is_empty() {
            warn!("secret_key not configured; generating an ephemeral cookie key");
            return Ok(Key::generate());
        }
        if self.secret_key.len() < MIN_SECRET_LEN {
            return Err(FlatshareError::ConfigError(format!(
                "secret_key must be at least {MIN_SECRET_LEN} bytes"
            )));
        }
        Key::try_from(self.secret_key.as_bytes())
            .map_err(|e| FlatshareError::ConfigError(format!("invalid secret_key: {e}")))
    }
}
