//! Settings of the shared HTTP client.
//!
//! There is no read timeout here: every call passes its own.

use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const ENV_USER_AGENT: &str = "REST_INVOKER_USER_AGENT";
pub const ENV_CONNECT_TIMEOUT_MS: &str = "REST_INVOKER_CONNECT_TIMEOUT_MS";
pub const ENV_POOL_MAX_IDLE: &str = "REST_INVOKER_POOL_MAX_IDLE";
pub const ENV_AUTH_TOKEN: &str = "REST_INVOKER_AUTH_TOKEN";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub user_agent: String,
    pub connect_timeout_ms: u64,
    pub pool_max_idle_per_host: usize,
    /// Sent as `Authorization: Bearer <token>` on every request.
    pub auth_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: "rest-invoker".to_string(),
            connect_timeout_ms: 5000,
            pool_max_idle_per_host: 10,
            auth_token: None,
        }
    }
}

impl Config {
    /// Loads a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Defaults overridden by the `REST_INVOKER_*` process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `REST_INVOKER_*` variables.
    pub fn from_env_with<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(agent) = lookup(ENV_USER_AGENT) {
            config.user_agent = agent;
        }
        if let Some(value) = lookup(ENV_CONNECT_TIMEOUT_MS) {
            config.connect_timeout_ms = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {:?}", ENV_CONNECT_TIMEOUT_MS, value))?;
        }
        if let Some(value) = lookup(ENV_POOL_MAX_IDLE) {
            config.pool_max_idle_per_host = value
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}: {:?}", ENV_POOL_MAX_IDLE, value))?;
        }
        if let Some(token) = lookup(ENV_AUTH_TOKEN).filter(|t| !t.is_empty()) {
            config.auth_token = Some(token);
        }

        Ok(config)
    }

    /// Builds the shared reqwest Client used by every call. Fails on a token that cannot be
    /// sent as a header value.
    pub fn build_client(&self) -> Result<Client> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &self.auth_token {
            let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
                .context("Auth token is not a valid header value")?;
            auth_value.set_sensitive(true);
            headers.insert(AUTHORIZATION, auth_value);
            debug!("Using auth token for outbound calls: {}", mask(token));
        }

        Client::builder()
            .user_agent(self.user_agent.as_str())
            .default_headers(headers)
            .connect_timeout(Duration::from_millis(self.connect_timeout_ms))
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .build()
            .context("Failed to build HTTP client")
    }
}

fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*********".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
