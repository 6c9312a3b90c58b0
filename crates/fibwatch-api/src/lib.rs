// fibwatch-api: Async Rust client for the Fibaro HC2 REST API.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::HubClient;
pub use error::Error;
pub use models::{DeviceProperties, RawDevice, RawRoom};
pub use transport::{TlsMode, TransportConfig};
