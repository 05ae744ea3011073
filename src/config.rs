// src/config.rs
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::error::ConfigError;
use crate::services::inference::{Credential, DEFAULT_INFERENCE_URL};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CONFIG_PATH: &str = "api_config.json";
pub const CREDENTIAL_KEY: &str = "HF_API_KEY";

/// Where the API key is read from. Only one source is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// JSON file with an `HF_API_KEY` field. Unreadable or invalid files are fatal.
    File(PathBuf),
    /// `HF_API_KEY` environment variable. Absence degrades the service.
    Env,
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub repo_dir: PathBuf,
    pub remote: String,
    pub branch: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub credential_source: CredentialSource,
    pub credential: Option<Credential>,
    pub inference_url: Url,
    pub request_timeout: Option<Duration>,
    pub static_dir: PathBuf,
    pub sync: SyncConfig,
}

#[derive(Deserialize)]
struct ApiConfigFile {
    #[serde(rename = "HF_API_KEY", default)]
    hf_api_key: Option<String>,
}

impl Config {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a key to its value if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = parse_or(&lookup, "BIND_HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED))?;
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        let inference_url = match lookup("HF_API_URL") {
            Some(raw) => Url::parse(&raw).map_err(|_| ConfigError::InvalidValue {
                key: "HF_API_URL",
                value: raw,
            })?,
            None => Url::parse(DEFAULT_INFERENCE_URL).map_err(|_| ConfigError::InvalidValue {
                key: "HF_API_URL",
                value: DEFAULT_INFERENCE_URL.to_string(),
            })?,
        };

        let request_timeout = match lookup("HF_TIMEOUT_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "HF_TIMEOUT_SECS",
                        value: raw,
                    });
                }
            },
            None => None,
        };

        let credential_source = match lookup("HF_CREDENTIAL_SOURCE").as_deref() {
            None | Some("file") => CredentialSource::File(
                lookup("HF_CONFIG_PATH")
                    .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
                    .into(),
            ),
            Some("env") => CredentialSource::Env,
            Some(other) => return Err(ConfigError::UnknownCredentialSource(other.to_string())),
        };

        let credential = match &credential_source {
            CredentialSource::File(path) => load_credential_file(path)?,
            CredentialSource::Env => lookup(CREDENTIAL_KEY).and_then(Credential::new),
        };
        if credential.is_none() {
            warn!(source = ?credential_source, "No HF_API_KEY configured, relay endpoints will be degraded");
        }

        Ok(Self {
            host,
            port,
            credential_source,
            credential,
            inference_url,
            request_timeout,
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "public".to_string()).into(),
            sync: SyncConfig {
                repo_dir: lookup("SYNC_REPO_DIR").unwrap_or_else(|| ".".to_string()).into(),
                remote: lookup("SYNC_REMOTE").unwrap_or_else(|| "origin".to_string()),
                branch: lookup("SYNC_BRANCH").unwrap_or_else(|| "main".to_string()),
            },
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}

/// Loads the key from a JSON config file. A missing or empty key is not an error.
pub fn load_credential_file(path: &Path) -> Result<Option<Credential>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::CredentialFile {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ApiConfigFile =
        serde_json::from_str(&content).map_err(|source| ConfigError::CredentialParse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parsed.hf_api_key.and_then(Credential::new))
}
