use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use url::Url;

use crate::client::AlertmanagerClient;
use crate::errors::{AlertmanagerError, Result};
use crate::request::endpoint_url;

/// Default path of the alerts endpoint
pub const DEFAULT_ALERTS_PATH: &str = "/api/v2/alerts";

/// Default path of the silences endpoint
pub const DEFAULT_SILENCES_PATH: &str = "/api/v2/silences";

/// Client options with their defaults
///
/// Deserializable so it can be embedded in an application config file;
/// missing fields keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientOptions {
    /// Path of the alerts endpoint, relative to the base URL
    pub alerts_path: String,

    /// Path of the silences endpoint, relative to the base URL
    pub silences_path: String,

    /// Ask for gzip-compressed responses
    pub response_compression: bool,

    /// Overall request timeout, `None` leaves it to the HTTP client
    ///
    /// Read from config files as `request_timeout_secs`, a number of
    /// seconds (fractions allowed).
    #[serde(
        rename = "request_timeout_secs",
        deserialize_with = "deserialize_timeout_secs"
    )]
    pub request_timeout: Option<Duration>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            alerts_path: DEFAULT_ALERTS_PATH.to_string(),
            silences_path: DEFAULT_SILENCES_PATH.to_string(),
            response_compression: true,
            request_timeout: None,
        }
    }
}

fn deserialize_timeout_secs<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer)?
        .map(|secs| Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom))
        .transpose()
}

/// Builder for [`AlertmanagerClient`]
///
/// Every setting is optional and applied in call order, so a later call
/// overrides an earlier one.
///
/// # Example
///
/// ```rust,no_run
/// use alertmanager_stream::AlertmanagerClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), alertmanager_stream::AlertmanagerError> {
/// let client = AlertmanagerClient::builder("http://localhost:9093")
///     .response_compression(false)
///     .request_timeout(Duration::from_secs(10))
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[must_use]
pub struct AlertmanagerClientBuilder {
    api_url: String,
    options: ClientOptions,
    http_client: Option<ClientWithMiddleware>,
}

impl AlertmanagerClientBuilder {
    pub(crate) fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            options: ClientOptions::default(),
            http_client: None,
        }
    }

    /// Replace all options at once
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Set the alerts endpoint path (default `/api/v2/alerts`)
    pub fn alerts_path(mut self, path: impl Into<String>) -> Self {
        self.options.alerts_path = path.into();
        self
    }

    /// Set the silences endpoint path (default `/api/v2/silences`)
    pub fn silences_path(mut self, path: impl Into<String>) -> Self {
        self.options.silences_path = path.into();
        self
    }

    /// Ask for gzip (`true`, default) or identity (`false`) responses
    pub fn response_compression(mut self, enabled: bool) -> Self {
        self.options.response_compression = enabled;
        self
    }

    /// Set the overall request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.options.request_timeout = Some(timeout);
        self
    }

    /// Use a custom reqwest middleware client (retry, logging, etc.)
    ///
    /// The timeout then belongs to that client and must not be set here.
    pub fn http_client(mut self, client: ClientWithMiddleware) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Validate the configuration and build the client
    ///
    /// # Errors
    ///
    /// - [`AlertmanagerError::Configuration`] if the base URL is invalid, a path
    ///   is empty, the timeout is zero, or a timeout is combined with a custom
    ///   HTTP client
    /// - [`AlertmanagerError::BuildHttpClient`] if the HTTP client cannot be built
    pub fn build(self) -> Result<AlertmanagerClient> {
        let api_url = parse_base_url(&self.api_url)?;
        let options = self.options;

        if options.alerts_path.trim_matches('/').is_empty() {
            return Err(AlertmanagerError::Configuration(
                "alerts path must not be empty".to_string(),
            ));
        }
        if options.silences_path.trim_matches('/').is_empty() {
            return Err(AlertmanagerError::Configuration(
                "silences path must not be empty".to_string(),
            ));
        }

        let alerts_url = endpoint_url(&api_url, &options.alerts_path)?;
        let silences_url = endpoint_url(&api_url, &options.silences_path)?;

        let http = match (self.http_client, options.request_timeout) {
            (Some(_), Some(_)) => {
                return Err(AlertmanagerError::Configuration(
                    "request timeout cannot be combined with a custom HTTP client".to_string(),
                ));
            }
            (Some(client), None) => client,
            (None, timeout) => build_http_client(timeout)?,
        };

        Ok(AlertmanagerClient::from_parts(
            http,
            api_url,
            alerts_url,
            silences_url,
            options.response_compression,
        ))
    }
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|err| AlertmanagerError::Configuration(format!("invalid base URL {raw:?}: {err}")))?;
    validate_base_url(url)
}

pub(crate) fn validate_base_url(url: Url) -> Result<Url> {
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AlertmanagerError::Configuration(format!(
            "unsupported URL scheme {:?} in {url}",
            url.scheme()
        )));
    }
    if url.cannot_be_a_base() {
        return Err(AlertmanagerError::Configuration(format!(
            "{url} cannot be used as a base URL"
        )));
    }
    Ok(url)
}

fn build_http_client(timeout: Option<Duration>) -> Result<ClientWithMiddleware> {
    let mut builder = Client::builder();

    if let Some(timeout) = timeout {
        if timeout.is_zero() {
            return Err(AlertmanagerError::Configuration(
                "request timeout must be greater than zero".to_string(),
            ));
        }
        builder = builder.timeout(timeout);
    }

    let client = builder.build().map_err(AlertmanagerError::BuildHttpClient)?;

    Ok(ClientBuilder::new(client).build())
}
