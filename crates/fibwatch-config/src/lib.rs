//! Shared configuration for fibwatch front-ends.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `fibwatch_core::HubConfig`. Front-ends depend on
//! this crate; the core never reads config files.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fibwatch_core::{HubConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named hub profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    /// How often a front-end should trigger a refresh, in seconds.
    /// The engine itself never schedules anything.
    #[serde(default = "default_refresh")]
    pub refresh_secs: u64,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_refresh() -> u64 {
    30
}
fn default_timeout() -> u64 {
    30
}

/// A named hub profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Hub address (e.g. "192.168.1.100"); scheme optional.
    pub address: String,

    /// Basic-auth username.
    pub username: Option<String>,

    /// Password (plaintext — prefer keyring or env var).
    pub password: Option<String>,

    /// Environment variable name containing the password.
    pub password_env: Option<String>,

    /// Path to custom CA certificate (for https hubs).
    pub ca_cert: Option<PathBuf>,

    /// Skip TLS verification.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "fibwatch", "fibwatch").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("fibwatch");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("FIBWATCH_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a profile's credentials through the chain:
/// profile `password_env` → `FIBWATCH_PASSWORD` → system keyring →
/// plaintext field.
pub fn resolve_credentials(
    profile: &Profile,
    profile_name: &str,
) -> Result<(String, SecretString), ConfigError> {
    let username = profile
        .username
        .clone()
        .or_else(|| std::env::var("FIBWATCH_USERNAME").ok())
        .ok_or_else(|| ConfigError::NoCredentials {
            profile: profile_name.into(),
        })?;

    // 1. Profile's password_env → env var lookup
    if let Some(ref env_name) = profile.password_env {
        if let Ok(pw) = std::env::var(env_name) {
            return Ok((username, SecretString::from(pw)));
        }
    }

    // 2. Well-known env var
    if let Ok(pw) = std::env::var("FIBWATCH_PASSWORD") {
        return Ok((username, SecretString::from(pw)));
    }

    // 3. System keyring
    if let Ok(entry) = keyring::Entry::new("fibwatch", &format!("{profile_name}/password")) {
        if let Ok(pw) = entry.get_password() {
            return Ok((username, SecretString::from(pw)));
        }
    }

    // 4. Plaintext in config
    if let Some(ref pw) = profile.password {
        return Ok((username, SecretString::from(pw.clone())));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

// ── Translation to HubConfig ────────────────────────────────────────

/// Build a `HubConfig` from a profile.
pub fn profile_to_hub_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<HubConfig, ConfigError> {
    if profile.address.trim().is_empty() {
        return Err(ConfigError::Validation {
            field: "address".into(),
            reason: "must not be empty".into(),
        });
    }

    let (username, password) = resolve_credentials(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(false) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::DangerAcceptInvalid // local hubs speak plain http or self-signed https
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(default_timeout()));

    Ok(HubConfig {
        address: profile.address.clone(),
        username,
        password,
        tls,
        timeout,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn profile(address: &str) -> Profile {
        Profile {
            address: address.into(),
            username: Some("admin".into()),
            password: Some("hunter2".into()),
            password_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }

    #[test]
    fn plaintext_profile_resolves() {
        let cfg = profile_to_hub_config(&profile("192.168.1.100"), "home").unwrap();
        assert_eq!(cfg.address, "192.168.1.100");
        assert_eq!(cfg.username, "admin");
        assert_eq!(cfg.password.expose_secret(), "hunter2");
        assert_eq!(cfg.timeout, Duration::from_secs(30));
    }

    #[test]
    fn unset_password_env_falls_through_to_plaintext() {
        let mut p = profile("192.168.1.100");
        p.password_env = Some("FIBWATCH_TEST_UNSET_VARIABLE".into());

        let cfg = profile_to_hub_config(&p, "home").unwrap();
        assert_eq!(cfg.password.expose_secret(), "hunter2");
    }

    #[test]
    fn empty_address_is_rejected() {
        let err = profile_to_hub_config(&profile("  "), "home").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn missing_username_reports_no_credentials() {
        let mut p = profile("192.168.1.100");
        p.username = None;
        // Only hit when FIBWATCH_USERNAME is unset in the test env.
        if std::env::var("FIBWATCH_USERNAME").is_err() {
            let err = profile_to_hub_config(&p, "home").unwrap_err();
            assert!(matches!(err, ConfigError::NoCredentials { .. }));
        }
    }
}
