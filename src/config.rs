use std::{net::SocketAddr, time::Duration};

use anyhow::{bail, Context};
use axum::http::HeaderValue;
use axum_extra::extract::cookie::Key;

use crate::inference::huggingface::{DEFAULT_API_URL, DEFAULT_MODEL};

/// Shortest secret `Key::derive_from` accepts.
pub const MIN_SECRET_LEN: usize = 32;

const DEFAULT_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct ProviderConfig {
    pub api_url: String,
    pub model: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

impl ProviderConfig {
    pub fn endpoint(&self) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), self.model)
    }
}

pub struct Config {
    pub addr: SocketAddr,
    pub session_key: Key,
    pub cors_origin: HeaderValue,
    pub seed_demo_user: bool,
    pub provider: ProviderConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let secret = lookup("SESSION_SECRET").context("SESSION_SECRET not set")?;
        if secret.len() < MIN_SECRET_LEN {
            bail!("SESSION_SECRET must be at least {MIN_SECRET_LEN} bytes");
        }

        let addr = lookup("APP_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("APP_ADDR is not a valid socket address")?;

        let cors_origin = HeaderValue::from_str(
            &lookup("CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
        )
        .context("CORS_ORIGIN is not a valid header value")?;

        let seed_demo_user = match lookup("SEED_DEMO_USER") {
            Some(value) => parse_flag(&value).context("SEED_DEMO_USER must be true or false")?,
            None => true,
        };

        let timeout_secs = match lookup("PROVIDER_TIMEOUT_SECS") {
            Some(value) => value
                .parse::<u64>()
                .context("PROVIDER_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("PROVIDER_TIMEOUT_SECS must be greater than zero");
        }

        let provider = ProviderConfig {
            api_url: lookup("HF_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            model: lookup("HF_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            token: lookup("HUGGINGFACE_API_TOKEN").filter(|token| !token.trim().is_empty()),
            timeout: Duration::from_secs(timeout_secs),
        };

        Ok(Self {
            addr,
            session_key: Key::derive_from(secret.as_bytes()),
            cors_origin,
            seed_demo_user,
            provider,
        })
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
