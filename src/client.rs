use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{
    validate_base_url, AlertmanagerClientBuilder, ClientOptions, DEFAULT_ALERTS_PATH,
    DEFAULT_SILENCES_PATH,
};
use crate::errors::{AlertmanagerError, Result};
use crate::request::{build_request, endpoint_url};
use crate::response::ResponseBody;
use crate::stream::ArrayDecoder;
use crate::types::{Alert, Silence};

/// Client for reading alerts and silences from Alertmanager
///
/// Each call issues exactly one GET request and returns either the complete,
/// fully decoded collection or an error. Clones share the underlying
/// connection pool and can be used concurrently.
///
/// # Example
///
/// ```rust,no_run
/// use alertmanager_stream::AlertmanagerClient;
/// use url::Url;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AlertmanagerClient::new(Url::parse("http://localhost:9093")?)?;
///
///     for alert in client.fetch_alerts().await? {
///         println!("{} {}", alert.fingerprint, alert.status.state);
///     }
///
///     let active = client
///         .fetch_silences()
///         .await?
///         .into_iter()
///         .filter(|s| s.is_active())
///         .count();
///     println!("{active} active silences");
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AlertmanagerClient {
    client: ClientWithMiddleware,
    api_url: Url,
    alerts_url: Url,
    silences_url: Url,
    response_compression: bool,
}

impl AlertmanagerClient {
    /// Create a new Alertmanager client with default options
    ///
    /// # Arguments
    ///
    /// * `api_url` - Base URL of the Alertmanager instance (e.g., `http://localhost:9093`)
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not a usable `http`/`https` base or the
    /// HTTP client cannot be built.
    pub fn new(api_url: Url) -> Result<Self> {
        Self::builder(api_url.as_str()).build()
    }

    /// Start configuring a client for the given base URL
    pub fn builder(api_url: impl AsRef<str>) -> AlertmanagerClientBuilder {
        AlertmanagerClientBuilder::new(api_url.as_ref())
    }

    /// Create a new client with a custom reqwest middleware client
    ///
    /// This allows you to add custom middleware (retry, logging, etc.).
    /// Default endpoint paths and response compression are used.
    pub fn with_client(client: ClientWithMiddleware, api_url: Url) -> Result<Self> {
        let api_url = validate_base_url(api_url)?;
        let alerts_url = endpoint_url(&api_url, DEFAULT_ALERTS_PATH)?;
        let silences_url = endpoint_url(&api_url, DEFAULT_SILENCES_PATH)?;

        Ok(Self::from_parts(
            client,
            api_url,
            alerts_url,
            silences_url,
            ClientOptions::default().response_compression,
        ))
    }

    pub(crate) fn from_parts(
        client: ClientWithMiddleware,
        api_url: Url,
        alerts_url: Url,
        silences_url: Url,
        response_compression: bool,
    ) -> Self {
        Self {
            client,
            api_url,
            alerts_url,
            silences_url,
            response_compression,
        }
    }

    /// Fetch all alerts
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The HTTP request fails
    /// - Alertmanager returns a status other than 200
    /// - The gzip body cannot be decompressed
    /// - The body is not a JSON array of alerts
    #[instrument(
        name = "AlertmanagerClient::fetch_alerts",
        skip_all,
        fields(url = %self.alerts_url)
    )]
    pub async fn fetch_alerts(&self) -> Result<Vec<Alert>> {
        self.fetch(&self.alerts_url).await
    }

    /// Fetch all silences
    ///
    /// # Errors
    ///
    /// Same conditions as [`fetch_alerts`](Self::fetch_alerts).
    #[instrument(
        name = "AlertmanagerClient::fetch_silences",
        skip_all,
        fields(url = %self.silences_url)
    )]
    pub async fn fetch_silences(&self) -> Result<Vec<Silence>> {
        self.fetch(&self.silences_url).await
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &Url) -> Result<Vec<T>> {
        debug!(
            compression = self.response_compression,
            "Requesting collection from Alertmanager"
        );

        let response = build_request(&self.client, url.clone(), self.response_compression)
            .send()
            .await
            .map_err(AlertmanagerError::Request)?;

        let body = ResponseBody::read(response, url).await?;
        let items = ArrayDecoder::new(body.reader()).decode_all()?;

        debug!(count = items.len(), "Decoded response");
        Ok(items)
    }

    /// Get the base API URL
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Get the full URL of the alerts endpoint
    pub fn alerts_url(&self) -> &Url {
        &self.alerts_url
    }

    /// Get the full URL of the silences endpoint
    pub fn silences_url(&self) -> &Url {
        &self.silences_url
    }

    /// Whether gzip responses are requested
    pub fn response_compression(&self) -> bool {
        self.response_compression
    }
}
