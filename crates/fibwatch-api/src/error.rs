use thiserror::Error;

/// Top-level error type for the `fibwatch-api` crate.
///
/// Covers every failure mode of the hub's REST surface. `fibwatch-core`
/// maps these into user-facing refresh-cycle outcomes; nothing here is
/// meant to be shown to an end user directly.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// The hub could not be reached (connection refused, DNS failure,
    /// request timeout).
    #[error("hub unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// The configured address does not parse as a URL.
    #[error("invalid hub address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Authentication ──────────────────────────────────────────────
    /// The hub rejected the credentials (HTTP 401/403).
    #[error("hub rejected credentials (HTTP {status})")]
    Authentication { status: u16 },

    // ── Protocol ────────────────────────────────────────────────────
    /// Any other non-success status from the hub.
    #[error("unexpected hub response (HTTP {status}): {message}")]
    Protocol { status: u16, message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("malformed hub response: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the hub rejected the credentials.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if this is a transient transport failure that the
    /// next refresh cycle may not hit again.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }
}
