//! # Alertmanager Stream
//!
//! A Rust client library for reading alerts and silences from
//! [Prometheus Alertmanager](https://prometheus.io/docs/alerting/latest/alertmanager/).
//!
//! ## Features
//!
//! - Fetch alerts (`GET /api/v2/alerts`) and silences (`GET /api/v2/silences`)
//! - Gzip response negotiation and transparent decompression
//! - Element-by-element decoding of the JSON array, failing on the first bad element
//! - Container fields (labels, annotations, matchers...) are never absent, only empty
//! - Builder and serde-deserializable options for configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use alertmanager_stream::{AlertmanagerClient, AlertState};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AlertmanagerClient::builder("http://localhost:9093")
//!         .request_timeout(Duration::from_secs(10))
//!         .build()?;
//!
//!     let alerts = client.fetch_alerts().await?;
//!     let firing = alerts
//!         .iter()
//!         .filter(|a| a.status.state == AlertState::Active)
//!         .count();
//!
//!     println!("{firing} of {} alerts are active", alerts.len());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod errors;
mod request;
mod response;
mod stream;
mod types;

pub use client::AlertmanagerClient;
pub use config::{
    AlertmanagerClientBuilder, ClientOptions, DEFAULT_ALERTS_PATH, DEFAULT_SILENCES_PATH,
};
pub use errors::{AlertmanagerError, Result};
pub use stream::ArrayDecoder;
pub use types::{
    Alert, AlertState, AlertStatus, Matcher, Receiver, Silence, SilenceState, SilenceStatus,
};
