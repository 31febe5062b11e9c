// Startup configuration, read from the process environment and an env file.
//
// Variables:
// - `HOST`              server host name (or full base URL with scheme)
// - `TOKEN`             moderator API token
// - `ANTENNA_ID`        antenna to sweep
// - `HTTP_TIMEOUT_SECS` optional per-request timeout, defaults to 30
// - `ENV_FILE`          optional path to the env file, defaults to `.env`

use std::path::Path;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_ENV_FILE: &str = ".env";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} environment variable")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },

    #[error("Failed to read env file {path}: {reason}")]
    EnvFile { path: String, reason: String },
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Base URL of the server, e.g. `https://social.example`.
    pub base_url: String,
    pub token: String,
    pub antenna_id: String,
    pub http_timeout: Duration,
}

impl BotConfig {
    /// Load the env file, then resolve every variable.
    ///
    /// Values already present in the process environment win over the file.
    /// The default `.env` is optional; an explicit `ENV_FILE` must exist.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var("ENV_FILE") {
            Ok(path) => load_env_file(Path::new(&path))?,
            Err(_) => {
                let path = Path::new(DEFAULT_ENV_FILE);
                if path.exists() {
                    load_env_file(path)?;
                } else {
                    tracing::debug!("No {} file found, using process environment", DEFAULT_ENV_FILE);
                }
            }
        }

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| -> Result<String, ConfigError> {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(key))
        };

        let host = required("HOST")?;
        let token = required("TOKEN")?;
        let antenna_id = required("ANTENNA_ID")?;

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::Invalid {
                        key: "HTTP_TIMEOUT_SECS",
                        reason: e.to_string(),
                    })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        key: "HTTP_TIMEOUT_SECS",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            base_url: base_url_for(&host),
            token,
            antenna_id,
            http_timeout,
        })
    }
}

/// Turn a `HOST` value into a base URL. Bare host names get `https://`.
fn base_url_for(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.starts_with("https://") || host.starts_with("http://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}

/// Export the variables in an env file into the process environment.
///
/// Variables that are already set are left untouched.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    dotenv::from_path(path).map_err(|e| ConfigError::EnvFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
