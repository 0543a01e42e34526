use serde_json::{Map, Value};
use tracing::{debug, trace};

use super::endpoints::{keys, Device, Endpoint};
use super::request::{check_date_order, required, ReportRequest};
use super::transport::{redact_password, HttpRequest, HttpTransport, Transport};
use crate::config::ClientConfig;
use crate::error::{ReportError, Result};

/// Decoded body of a report call. Its shape is endpoint specific.
pub type ReportResponse = Map<String, Value>;

/// Typed access to the StatCounter reporting API.
///
/// Every method validates its arguments, builds one GET request and returns
/// the decoded JSON object unchanged. Calls are independent; the client holds
/// no mutable state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct ReportClient<T = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl ReportClient<HttpTransport> {
    /// Client with default base URL and API version and no timezone.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::with_config(ClientConfig::new(username, password)?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::from_config(&config).map_err(ReportError::Transport)?;
        Ok(Self { config, transport })
    }
}

impl<T: Transport> ReportClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The exact URL, credentials included, that `execute` would request.
    pub fn request_url(&self, request: &ReportRequest) -> String {
        let query = request.params().finish(
            self.config.username(),
            self.config.password(),
            self.config.timezone(),
        );
        format!(
            "{}?{}",
            self.config.endpoint_url(request.endpoint().path()),
            query
        )
    }

    /// Send a request and decode the reply into a JSON object.
    pub fn execute(&self, request: &ReportRequest) -> Result<ReportResponse> {
        let url = self.request_url(request);
        debug!(
            target: "statcounter::request",
            endpoint = %request.endpoint(),
            url = %redact_password(&url),
            "dispatching report request"
        );

        let http_request = HttpRequest {
            url,
            username: self.config.username().to_string(),
            password: self.config.password().to_string(),
        };
        let response = self
            .transport
            .get(&http_request)
            .map_err(ReportError::Transport)?;

        trace!(
            target: "statcounter::request",
            endpoint = %request.endpoint(),
            status = response.status,
            bytes = response.body.len(),
            "response received"
        );

        if !response.is_success() {
            return Err(ReportError::Remote {
                status: response.status,
                body: response.body,
            });
        }

        decode_object(&response.body)
    }

    /// Projects visible to the account.
    pub fn user_project_details(&self) -> Result<ReportResponse> {
        self.execute(&ReportRequest::new(Endpoint::UserProjects))
    }

    /// Register a new website. Parameters travel in the query string like
    /// every other call.
    #[doc(alias = "createStatCounterProject")]
    pub fn create_project(
        &self,
        website_url: &str,
        title: &str,
        timezone: &str,
    ) -> Result<ReportResponse> {
        let website_url = required(keys::URL, website_url)?;
        let title = required(keys::TITLE, title)?;
        let timezone = required(keys::TIME_ZONE, timezone)?;

        let request = ReportRequest::new(Endpoint::CreateProject).with(|q| {
            q.text(keys::URL, website_url)
                .text(keys::TITLE, title)
                .text(keys::TIME_ZONE, timezone)
        });
        self.execute(&request)
    }

    pub fn recent_keyword_activity(
        &self,
        project_id: &str,
        num_of_results: u32,
    ) -> Result<ReportResponse> {
        self.counted(Endpoint::RecentKeywordActivity, project_id, num_of_results)
    }

    /// `count_type` is passed through as given.
    pub fn popular_pages(
        &self,
        project_id: &str,
        num_of_results: u32,
        count_type: Option<&str>,
    ) -> Result<ReportResponse> {
        let request = ReportRequest::for_project(Endpoint::PopularPages, project_id)?.with(|q| {
            q.count(keys::NUM_OF_RESULTS, num_of_results)
                .param(keys::COUNT_TYPE, count_type)
        });
        self.execute(&request)
    }

    pub fn entry_pages(&self, project_id: &str, num_of_results: u32) -> Result<ReportResponse> {
        self.counted(Endpoint::EntryPages, project_id, num_of_results)
    }

    pub fn exit_pages(&self, project_id: &str, num_of_results: u32) -> Result<ReportResponse> {
        self.counted(Endpoint::ExitPages, project_id, num_of_results)
    }

    /// Referring sites; `external` restricts to (or excludes) outside referrers.
    pub fn came_from(
        &self,
        project_id: &str,
        num_of_results: u32,
        external: Option<bool>,
    ) -> Result<ReportResponse> {
        let request = ReportRequest::for_project(Endpoint::CameFrom, project_id)?.with(|q| {
            q.count(keys::NUM_OF_RESULTS, num_of_results)
                .flag(keys::EXTERNAL, external)
        });
        self.execute(&request)
    }

    pub fn browsers(&self, project_id: &str, device: Option<Device>) -> Result<ReportResponse> {
        self.by_device(Endpoint::Browsers, project_id, device)
    }

    pub fn operating_systems(
        &self,
        project_id: &str,
        device: Option<Device>,
    ) -> Result<ReportResponse> {
        self.by_device(Endpoint::OperatingSystems, project_id, device)
    }

    pub fn recent_pageload_activity(
        &self,
        project_id: &str,
        device: Option<Device>,
    ) -> Result<ReportResponse> {
        self.by_device(Endpoint::RecentPageloadActivity, project_id, device)
    }

    pub fn exit_link_activity(
        &self,
        project_id: &str,
        device: Option<Device>,
    ) -> Result<ReportResponse> {
        self.by_device(Endpoint::ExitLinkActivity, project_id, device)
    }

    pub fn download_link_activity(
        &self,
        project_id: &str,
        device: Option<Device>,
    ) -> Result<ReportResponse> {
        self.by_device(Endpoint::DownloadLinkActivity, project_id, device)
    }

    /// Summary for a single day.
    pub fn summary_stats_date(&self, project_id: &str, date: &str) -> Result<ReportResponse> {
        let request = ReportRequest::for_project(Endpoint::SummaryStats, project_id)?;
        let date = required(keys::DATE, date)?;
        self.execute(&request.with(|q| q.text(keys::DATE, date)))
    }

    /// Summary over an inclusive date range. ISO dates (`YYYY-MM-DD`) must be
    /// in order.
    pub fn summary_stats_date_range(
        &self,
        project_id: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<ReportResponse> {
        let request = ReportRequest::for_project(Endpoint::SummaryStats, project_id)?;
        let start_date = required(keys::START_DATE, start_date)?;
        let end_date = required(keys::END_DATE, end_date)?;
        check_date_order(start_date, end_date)?;

        self.execute(&request.with(|q| {
            q.text(keys::START_DATE, start_date)
                .text(keys::END_DATE, end_date)
        }))
    }

    pub fn recent_visitors(&self, project_id: &str, num_of_results: u32) -> Result<ReportResponse> {
        self.counted(Endpoint::RecentVisitors, project_id, num_of_results)
    }

    fn counted(
        &self,
        endpoint: Endpoint,
        project_id: &str,
        num_of_results: u32,
    ) -> Result<ReportResponse> {
        let request = ReportRequest::for_project(endpoint, project_id)?
            .with(|q| q.count(keys::NUM_OF_RESULTS, num_of_results));
        self.execute(&request)
    }

    fn by_device(
        &self,
        endpoint: Endpoint,
        project_id: &str,
        device: Option<Device>,
    ) -> Result<ReportResponse> {
        let request = ReportRequest::for_project(endpoint, project_id)?
            .with(|q| q.param(keys::DEVICE, device.map(|d| d.as_str())));
        self.execute(&request)
    }
}

fn decode_object(body: &str) -> Result<ReportResponse> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ReportError::Decode(e.to_string()))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(ReportError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_object() {
        let map = decode_object(r#"{"a": 1, "b": [true, null]}"#).unwrap();
        assert_eq!(map["a"], Value::from(1));
        assert_eq!(map["b"][0], Value::Bool(true));
    }

    #[test]
    fn test_decode_rejects_non_objects() {
        for body in ["not json", "", "[1,2]", "\"text\"", "42"] {
            let err = decode_object(body).unwrap_err();
            assert!(matches!(err, ReportError::Decode(_)), "body {:?}", body);
        }
        let err = decode_object("[1]").unwrap_err();
        assert!(err.to_string().contains("an array"));
    }

    #[test]
    fn test_new_uses_defaults() {
        let client = ReportClient::new("bob", "pw").unwrap();
        assert_eq!(client.config().username(), "bob");
        assert_eq!(client.config().password(), "pw");
        assert_eq!(client.config().version(), 3);
        assert_eq!(client.config().timezone(), None);
    }

    #[test]
    fn test_new_rejects_missing_credentials() {
        assert!(matches!(
            ReportClient::new("", "pw"),
            Err(ReportError::Validation { .. })
        ));
    }

    #[test]
    fn test_request_url_shape() {
        let config = ClientConfig::new("bob", "pw")
            .unwrap()
            .with_base_url("https://stats.example")
            .unwrap()
            .with_timezone("UTC");
        let client = ReportClient::with_config(config).unwrap();
        let request = ReportRequest::for_project(Endpoint::ExitPages, "42")
            .unwrap()
            .with(|q| q.count(keys::NUM_OF_RESULTS, 20));

        assert_eq!(
            client.request_url(&request),
            "https://stats.example/3/exit?projectId=42&numOfResults=20&username=bob&password=pw&timeZone=UTC"
        );
    }
}
