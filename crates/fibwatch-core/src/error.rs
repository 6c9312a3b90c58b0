// ── Core error types ──
//
// User-facing errors from fibwatch-core. Consumers never see reqwest
// errors or JSON parse failures directly -- the
// `From<fibwatch_api::Error>` impl translates transport-layer failures
// into refresh-cycle outcomes.

use thiserror::Error;

/// Unified error type for the monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    // ── Configuration errors ─────────────────────────────────────────
    /// Credentials are missing or incomplete. Reported before any
    /// network call is attempted.
    #[error("hub configuration incomplete: {field} is empty")]
    ConfigurationMissing { field: &'static str },

    /// The configured address is present but does not parse.
    #[error("invalid hub address: {0}")]
    InvalidAddress(String),

    // ── Cycle errors ─────────────────────────────────────────────────
    /// A refresh cycle is already in flight; at most one runs at a time.
    #[error("a refresh is already in progress")]
    RefreshInFlight,

    /// Transport-level failure reaching the hub.
    #[error("hub unreachable: {reason}")]
    HubUnreachable { reason: String },

    /// The hub rejected the configured credentials.
    #[error("hub rejected credentials (HTTP {status})")]
    HubAuthRejected { status: u16 },

    /// Unexpected status or malformed body from the hub.
    #[error("hub protocol error: {message}")]
    HubProtocol { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<fibwatch_api::Error> for MonitorError {
    fn from(err: fibwatch_api::Error) -> Self {
        match err {
            fibwatch_api::Error::Unreachable(e) => Self::HubUnreachable {
                reason: e.to_string(),
            },
            fibwatch_api::Error::Tls(reason) => Self::HubUnreachable { reason },
            fibwatch_api::Error::InvalidUrl(e) => Self::InvalidAddress(e.to_string()),
            fibwatch_api::Error::Authentication { status } => Self::HubAuthRejected { status },
            fibwatch_api::Error::Protocol { status, message } => Self::HubProtocol {
                message: format!("HTTP {status}: {message}"),
            },
            // A body the hub can't serialize correctly is a protocol
            // failure from the caller's point of view.
            fibwatch_api::Error::Deserialization { message, .. } => {
                Self::HubProtocol { message }
            }
        }
    }
}
