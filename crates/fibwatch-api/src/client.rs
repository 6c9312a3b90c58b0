// Hub HTTP client
//
// Wraps `reqwest::Client` with HC2-specific URL construction, basic-auth
// request execution, and status-to-error mapping. The hub's read
// endpoints return plain JSON arrays (no envelope), so the request
// helper decodes straight into the wire models.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::models::{RawDevice, RawRoom};
use crate::transport::TransportConfig;

/// Raw HTTP client for the hub's REST API.
///
/// Every request carries an HTTP Basic-Authorization header built from
/// the configured credentials. The password lives behind a
/// `SecretString` and is never formatted into log output.
pub struct HubClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl HubClient {
    /// Create a new hub client from an address and credentials.
    ///
    /// `address` may omit the scheme; plain HTTP is assumed (the hub's
    /// factory default). An explicit `https://` address is honored and
    /// subject to the transport's TLS mode.
    pub fn new(
        address: &str,
        username: &str,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let base = if address.contains("://") {
            address.to_owned()
        } else {
            format!("http://{address}")
        };
        let base_url = Url::parse(&base)?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username: username.to_owned(),
            password,
        })
    }

    /// The hub base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL for an API path: `{base}/api/{path}`.
    fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helper ───────────────────────────────────────────────

    /// Send an authenticated GET and decode the JSON body.
    async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(Error::Unreachable)?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Authentication {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Protocol {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await.map_err(Error::Unreachable)?;
        serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body,
        })
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// List every device the hub manages.
    ///
    /// `GET /api/devices`
    pub async fn fetch_devices(&self) -> Result<Vec<RawDevice>, Error> {
        let url = self.api_url("devices");
        debug!("fetching devices");
        self.get(url).await
    }

    /// List every room configured on the hub.
    ///
    /// `GET /api/rooms`
    pub async fn fetch_rooms(&self) -> Result<Vec<RawRoom>, Error> {
        let url = self.api_url("rooms");
        debug!("fetching rooms");
        self.get(url).await
    }

    /// Lightweight connectivity probe against the hub's info endpoint.
    ///
    /// `GET /api/settings/info`. Only the status code matters; the body
    /// is discarded. Returns `false` on any failure instead of
    /// propagating -- the sole error-swallowing operation, since its
    /// entire purpose is a boolean health answer.
    pub async fn probe_connectivity(&self) -> bool {
        let url = self.api_url("settings/info");
        match self
            .http
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(error = %e, "connectivity probe failed");
                false
            }
        }
    }
}
