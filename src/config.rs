//! Client configuration.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::{info, warn};

/// Default API base, the backend's local development address.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api/v1";

/// Default location of the persisted key/value store.
pub const DEFAULT_STORAGE_PATH: &str = "healthrecords_storage.json";

/// Where the client talks to and where it keeps its session.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL, without a trailing slash.
    pub api_base: String,
    /// File backing the local session store.
    pub storage_path: PathBuf,
    /// Per-request timeout. `None` waits for as long as the server takes.
    pub timeout: Option<Duration>,
    /// Proxy URL for every request.
    pub proxy: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            timeout: None,
            proxy: None,
        }
    }
}

impl ClientConfig {
    /// Build a config rooted at `api_base`.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: normalize_base(&api_base.into()),
            ..Self::default()
        }
    }

    /// Read `HR_API_BASE`, `HR_STORAGE_PATH`, `HR_TIMEOUT_SECS` and `HR_PROXY`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_base = var("HR_API_BASE").unwrap_or_else(|| {
            info!("HR_API_BASE not set, using default: {DEFAULT_API_BASE}");
            DEFAULT_API_BASE.to_string()
        });
        let storage_path = var("HR_STORAGE_PATH").unwrap_or_else(|| {
            info!("HR_STORAGE_PATH not set, using default: {DEFAULT_STORAGE_PATH}");
            DEFAULT_STORAGE_PATH.to_string()
        });
        let timeout = var("HR_TIMEOUT_SECS")
            .and_then(|raw| parse_value::<u64>("HR_TIMEOUT_SECS", &raw))
            .filter(|&secs| {
                if secs == 0 {
                    warn!("HR_TIMEOUT_SECS=0 ignored, requests will not time out");
                }
                secs > 0
            })
            .map(Duration::from_secs);
        let proxy = var("HR_PROXY").map(|v| v.trim().to_string());

        Self {
            api_base: normalize_base(&api_base),
            storage_path: PathBuf::from(storage_path),
            timeout,
            proxy,
        }
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }
}

fn parse_value<T: FromStr>(key: &str, raw: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| warn!("Invalid {key} value {raw:?}: {e}"))
        .ok()
}

fn normalize_base(base: &str) -> String {
    base.trim().trim_end_matches('/').to_string()
}
