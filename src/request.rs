use reqwest::header::{HeaderValue, ACCEPT_ENCODING};
use reqwest_middleware::{ClientWithMiddleware, RequestBuilder};
use url::Url;

use crate::errors::{AlertmanagerError, Result};

/// Join the base URL and an endpoint path with exactly one `/` between them
pub(crate) fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    let joined = format!(
        "{}/{}",
        base.as_str().trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    Url::parse(&joined).map_err(|err| {
        AlertmanagerError::Configuration(format!("cannot join {base} and {path:?}: {err}"))
    })
}

/// Build a GET request for `url`, negotiating gzip when `response_compression` is set
pub(crate) fn build_request(
    client: &ClientWithMiddleware,
    url: Url,
    response_compression: bool,
) -> RequestBuilder {
    let encoding = if response_compression {
        HeaderValue::from_static("gzip")
    } else {
        HeaderValue::from_static("identity")
    };

    client.get(url).header(ACCEPT_ENCODING, encoding)
}
