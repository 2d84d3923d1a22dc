use std::io::Read;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::poller::ChangeDetection;

/// Fastest allowed poll interval.
pub const MIN_POLL_INTERVAL_MS: u64 = 200;
/// Slowest allowed poll interval.
pub const MAX_POLL_INTERVAL_MS: u64 = 1000;
/// Shortest request timeout; zero would fail every request.
pub const MIN_REQUEST_TIMEOUT_SECS: u64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::server_url")]
    pub server_url: String,
    #[serde(default = "defaults::poll_interval")]
    pub poll_interval_ms: u64,
    #[serde(default = "defaults::request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub change_detection: ChangeDetection,
    /// Sent verbatim as the `Cookie` header, for servers that need a session.
    #[serde(default)]
    pub session_cookie: Option<String>,
}

pub mod defaults {
    pub fn server_url() -> String {
        "http://127.0.0.1:5000".to_owned()
    }

    pub const fn poll_interval() -> u64 {
        500
    }

    pub const fn request_timeout() -> u64 {
        8
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: defaults::server_url(),
            poll_interval_ms: defaults::poll_interval(),
            request_timeout_secs: defaults::request_timeout(),
            change_detection: ChangeDetection::default(),
            session_cookie: None,
        }
    }
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.poll_interval_ms
                .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(MIN_REQUEST_TIMEOUT_SECS))
    }
}

const DEFAULT_CONFIG_PATH: &str = "./Client.toml";

pub fn load() -> anyhow::Result<Config> {
    let mut file = std::fs::File::options()
        .read(true)
        .open(DEFAULT_CONFIG_PATH)?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    parse(&contents)
}

pub fn parse(contents: &str) -> anyhow::Result<Config> {
    let config = toml::from_str(contents)?;

    Ok(config)
}

/// Loads `Client.toml`, falling back to defaults when it is missing or broken.
pub fn load_or_default() -> Config {
    match load() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("error loading config: {e}");
            info!("using default config");
            Config::default()
        }
    }
}
