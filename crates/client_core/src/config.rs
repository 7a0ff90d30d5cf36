use std::{fs, path::Path, time::Duration};

use serde::Deserialize;
use shared::domain::InvalidNumberPolicy;
use tracing::warn;

pub const CONFIG_FILE: &str = "order_desk.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub server_url: String,
    /// Sent as `Authorization` until a login response hands out a token.
    pub auth_token: String,
    pub invalid_numbers: InvalidNumberPolicy,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8080".into(),
            auth_token: "valid-token".into(),
            invalid_numbers: InvalidNumberPolicy::Reject,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    server_url: Option<String>,
    auth_token: Option<String>,
    invalid_numbers: Option<String>,
    request_timeout_seconds: Option<u64>,
}

pub fn parse_invalid_number_policy(raw: &str) -> Option<InvalidNumberPolicy> {
    match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
        "reject" => Some(InvalidNumberPolicy::Reject),
        "send_null" | "null" => Some(InvalidNumberPolicy::SendNull),
        _ => None,
    }
}

pub fn load_settings() -> ClientConfig {
    load_settings_from(Path::new(CONFIG_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the toml file at `path` if readable, then environment
/// overrides looked up through `env`. Values that fail to parse are skipped.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> ClientConfig {
    let mut settings = ClientConfig::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileConfig>(&raw) {
            Ok(file_cfg) => apply_file_config(&mut settings, file_cfg),
            Err(err) => warn!(path = %path.display(), "ignoring malformed config file: {err}"),
        }
    }

    if let Some(v) = env("ORDER_DESK_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = env("ORDER_DESK_AUTH_TOKEN") {
        settings.auth_token = v;
    }
    if let Some(v) = env("APP__AUTH_TOKEN") {
        settings.auth_token = v;
    }

    if let Some(v) = env("APP__INVALID_NUMBERS") {
        match parse_invalid_number_policy(&v) {
            Some(policy) => settings.invalid_numbers = policy,
            None => warn!(value = %v, "ignoring unknown APP__INVALID_NUMBERS"),
        }
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout = Duration::from_secs(parsed);
        }
    }

    settings
}

fn apply_file_config(settings: &mut ClientConfig, file_cfg: FileConfig) {
    if let Some(v) = file_cfg.server_url {
        settings.server_url = v;
    }
    if let Some(v) = file_cfg.auth_token {
        settings.auth_token = v;
    }
    if let Some(v) = file_cfg.invalid_numbers {
        match parse_invalid_number_policy(&v) {
            Some(policy) => settings.invalid_numbers = policy,
            None => warn!(value = %v, "ignoring unknown invalid_numbers setting"),
        }
    }
    if let Some(v) = file_cfg.request_timeout_seconds {
        settings.request_timeout = Duration::from_secs(v);
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
