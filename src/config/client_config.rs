use std::fmt;
use std::time::Duration;

use url::Url;

use crate::api::request::required;
use crate::error::{ReportError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.statcounter.com/stats";
pub const DEFAULT_API_VERSION: u32 = 3;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("statcounter-client/", env!("CARGO_PKG_VERSION"));

/// Connection settings for a [`ReportClient`](crate::ReportClient).
///
/// Built once, then read-only: overrides go through the consuming `with_*`
/// methods before the config is handed to the client.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    version: u32,
    username: String,
    password: String,
    timezone: Option<String>,
    timeout: Duration,
    user_agent: String,
}

impl ClientConfig {
    /// Defaults for everything but the credentials, which must be non-empty.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let password = password.into();
        required("username", &username)?;
        required("password", &password)?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_API_VERSION,
            username,
            password,
            timezone: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        })
    }

    /// Must be an absolute `http`/`https` URL; a trailing `/` is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let base_url = base_url.trim().trim_end_matches('/');
        check_base_url(base_url)?;
        self.base_url = base_url.to_string();
        Ok(self)
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Timezone sent with every request (e.g. `Europe/Dublin`). An empty
    /// string clears it.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        let timezone = timezone.into();
        self.timezone = if timezone.trim().is_empty() {
            None
        } else {
            Some(timezone)
        };
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// `{base}/{version}/{path}` without a query string.
    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.version, path)
    }
}

fn check_base_url(base_url: &str) -> Result<()> {
    let invalid = |reason: String| ReportError::Validation {
        field: "base_url",
        reason,
    };

    let url = Url::parse(base_url).map_err(|e| invalid(format!("`{}`: {}", base_url, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme `{}`", url.scheme())));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("must not carry a query or fragment".to_string()));
    }
    Ok(())
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timezone", &self.timezone)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
