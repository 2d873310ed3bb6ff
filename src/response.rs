use bytes::Bytes;
use flate2::read::GzDecoder;
use reqwest::header::CONTENT_ENCODING;
use reqwest::{Response, StatusCode};
use std::io::Read;
use tracing::{debug, warn};
use url::Url;

use crate::errors::{AlertmanagerError, Result};

/// Longest error body kept in [`AlertmanagerError::UnexpectedStatus`]
const MAX_ERROR_MESSAGE_LEN: usize = 1024;

/// Encoding declared by the `Content-Encoding` response header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentEncoding {
    Gzip,
    Identity,
}

impl ContentEncoding {
    fn from_header(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("gzip") => Self::Gzip,
            _ => Self::Identity,
        }
    }
}

/// Fully received response body, still in its wire encoding
///
/// Taking the [`Response`] by value guarantees it is drained or dropped on
/// every path, which releases the pooled connection.
#[derive(Debug)]
pub(crate) struct ResponseBody {
    bytes: Bytes,
    encoding: ContentEncoding,
}

impl ResponseBody {
    /// Validate the status and receive the body
    ///
    /// `url` is the requested URL, reported in errors even if the
    /// transport followed redirects.
    ///
    /// # Errors
    ///
    /// - [`AlertmanagerError::UnexpectedStatus`] for any status other than 200
    /// - [`AlertmanagerError::Request`] if the body cannot be received
    pub(crate) async fn read(response: Response, url: &Url) -> Result<Self> {
        let status = response.status();

        if status != StatusCode::OK {
            let message = truncate_message(response.text().await.unwrap_or_default());
            warn!(url = %url, status = %status, "Unexpected response from Alertmanager");
            return Err(AlertmanagerError::UnexpectedStatus {
                url: url.clone(),
                status,
                message,
            });
        }

        let encoding = ContentEncoding::from_header(
            response
                .headers()
                .get(CONTENT_ENCODING)
                .and_then(|v| v.to_str().ok()),
        );

        let bytes = response
            .bytes()
            .await
            .map_err(|err| AlertmanagerError::Request(err.into()))?;

        debug!(
            url = %url,
            encoding = ?encoding,
            body_len = bytes.len(),
            "Received response body"
        );

        Ok(Self { bytes, encoding })
    }

    /// Byte stream over the decoded body
    ///
    /// Gzip bodies are inflated lazily as the stream is read, so a corrupt
    /// header or frame surfaces as an I/O error from `read`.
    pub(crate) fn reader(&self) -> Box<dyn Read + '_> {
        match self.encoding {
            ContentEncoding::Gzip => Box::new(GzDecoder::new(self.bytes.as_ref())),
            ContentEncoding::Identity => Box::new(self.bytes.as_ref()),
        }
    }

    #[cfg(test)]
    fn new(bytes: impl Into<Bytes>, encoding: ContentEncoding) -> Self {
        Self {
            bytes: bytes.into(),
            encoding,
        }
    }
}

fn truncate_message(mut message: String) -> String {
    if message.len() > MAX_ERROR_MESSAGE_LEN {
        let mut end = MAX_ERROR_MESSAGE_LEN;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        message.truncate(end);
    }
    message
}
