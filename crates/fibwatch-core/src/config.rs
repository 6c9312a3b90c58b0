// ── Runtime hub configuration ──
//
// Describes *how* to reach an HC2 hub. Carries credential data and
// connection tuning, but never touches disk. The outer layer (settings
// form, fibwatch-config) constructs a `HubConfig` and hands it into each
// operation -- there is no shared mutable session config, so concurrent
// refreshes against different hubs are possible.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::error::MonitorError;

/// TLS verification strategy.
#[derive(Debug, Clone, Default)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(std::path::PathBuf),
    /// Skip verification (self-signed certs). Default for local hubs.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single hub.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Hub address, scheme optional (e.g. `192.168.1.100`).
    pub address: String,
    /// Basic-auth username.
    pub username: String,
    /// Basic-auth password.
    pub password: SecretString,
    /// TLS verification strategy, relevant for `https://` addresses.
    pub tls: TlsVerification,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl HubConfig {
    /// Build a config with default connection tuning.
    pub fn new(
        address: impl Into<String>,
        username: impl Into<String>,
        password: SecretString,
    ) -> Self {
        Self {
            address: address.into(),
            username: username.into(),
            password,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Check that every credential field is populated.
    ///
    /// An incomplete config must never generate network traffic, so the
    /// monitor calls this before anything else in a cycle.
    pub fn validate(&self) -> Result<(), MonitorError> {
        if self.address.trim().is_empty() {
            return Err(MonitorError::ConfigurationMissing { field: "address" });
        }
        if self.username.trim().is_empty() {
            return Err(MonitorError::ConfigurationMissing { field: "username" });
        }
        if self.password.expose_secret().is_empty() {
            return Err(MonitorError::ConfigurationMissing { field: "password" });
        }
        Ok(())
    }
}
