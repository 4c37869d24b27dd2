//! HttpLogSource: reqwest-backed `LogSource` for the dashboard log API.
//!
//! `GET {base}/api/v1/logs/{target}` returns the raw text of the target.
//! `GET {base}/api/v1/logs` returns a JSON array of target names.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use logtail_core::Target;
use reqwest::{Client, RequestBuilder, Url};

use crate::error::FetchError;
use crate::source::LogSource;

const LOGS_PATH: [&str; 3] = ["api", "v1", "logs"];

/// Error bodies longer than this are cut before they reach the display.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Clone)]
pub struct HttpLogSource {
    client: Client,
    base_url: Url,
    basic_auth: Option<(String, Option<String>)>,
    timeout: Option<Duration>,
}

impl fmt::Debug for HttpLogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpLogSource")
            .field("base_url", &self.base_url.as_str())
            .field(
                "user",
                &self.basic_auth.as_ref().map(|(user, _)| user.as_str()),
            )
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl HttpLogSource {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let client = Client::builder().build()?;
        Self::with_client(base_url, client)
    }

    /// Bind a preconfigured reqwest client (proxy, TLS roots, headers).
    pub fn with_client(base_url: &str, client: Client) -> Result<Self, FetchError> {
        let parsed = Url::parse(base_url).map_err(|e| FetchError::InvalidUrl {
            url: base_url.to_string(),
            detail: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl {
                url: base_url.to_string(),
                detail: "expected an http(s) base url".to_string(),
            });
        }

        tracing::debug!("log source bound to {parsed}");

        Ok(Self {
            client,
            base_url: parsed,
            basic_auth: None,
            timeout: None,
        })
    }

    #[must_use]
    pub fn with_basic_auth(mut self, user: impl Into<String>, password: Option<String>) -> Self {
        self.basic_auth = Some((user.into(), password));
        self
    }

    /// Bound each request. Unset by default: a hung read only delays its own attempt.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the listing endpoint, or of one target when given.
    pub fn logs_url(&self, target: Option<&Target>) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| FetchError::InvalidUrl {
                url: self.base_url.to_string(),
                detail: "cannot append path segments".to_string(),
            })?;
            segments.pop_if_empty().extend(LOGS_PATH);
            if let Some(target) = target {
                segments.push(target.as_str());
            }
        }
        Ok(url)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        let mut builder = self.client.get(url);
        if let Some((ref user, ref password)) = self.basic_auth {
            builder = builder.basic_auth(user, password.as_ref());
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        builder
    }

    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        let response = self.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let trimmed = body.trim();
            let body = if trimmed.is_empty() {
                status.canonical_reason().unwrap_or("error").to_string()
            } else {
                truncate_chars(trimmed, MAX_ERROR_BODY_CHARS)
            };
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl LogSource for HttpLogSource {
    async fn fetch(&self, target: &Target) -> Result<String, FetchError> {
        let url = self.logs_url(Some(target))?;
        tracing::trace!("GET {url}");
        self.get_text(url).await
    }

    async fn list_targets(&self) -> Result<Vec<String>, FetchError> {
        let url = self.logs_url(None)?;
        tracing::trace!("GET {url}");
        let body = self.get_text(url).await?;
        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}

fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}
