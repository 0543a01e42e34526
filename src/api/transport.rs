use std::fmt;
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::TransportError;

/// Fully assembled GET request handed to a [`Transport`].
#[derive(Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("url", &redact_password(&self.url))
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Status and raw body of whatever the server answered, success or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The seam between request construction and the network.
///
/// Implementations return `Ok` for every response the server sends, including
/// 4xx/5xx; `Err` is reserved for failures to complete the exchange at all.
pub trait Transport: Send + Sync {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).get(request)
    }
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).get(request)
    }
}

/// Blocking reqwest transport with HTTP Basic authentication.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(config.timeout(), config.user_agent())
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl Transport for HttpTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        // reqwest errors print the full URL, credentials included.
        let response = self
            .client
            .get(&request.url)
            .basic_auth(&request.username, Some(&request.password))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(|e| e.without_url())?;

        let status = response.status().as_u16();
        let body = response.text().map_err(|e| e.without_url())?;
        Ok(HttpResponse { status, body })
    }
}

/// Replace the `password` query value so URLs can be logged.
pub(crate) fn redact_password(url: &str) -> String {
    let (base, query) = match url.split_once('?') {
        Some(parts) => parts,
        None => return url.to_string(),
    };
    let query = query
        .split('&')
        .map(|pair| {
            if pair.starts_with("password=") {
                "password=***"
            } else {
                pair
            }
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{}?{}", base, query)
}
