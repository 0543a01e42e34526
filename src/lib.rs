//! Blocking client for the StatCounter reporting API.
//!
//! ```no_run
//! use statcounter_client::{ClientConfig, Device, ReportClient};
//!
//! let config = ClientConfig::new("username", "password")?.with_timezone("Europe/Dublin");
//! let client = ReportClient::with_config(config)?;
//!
//! let pages = client.popular_pages("1234567", 10, Some("visits"))?;
//! let browsers = client.browsers("1234567", Some(Device::Mobile))?;
//! println!("{:?} {:?}", pages.get("popular_pages"), browsers);
//! # Ok::<(), statcounter_client::ReportError>(())
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod utils;

pub use api::client::{ReportClient, ReportResponse};
pub use api::endpoints::{Device, Endpoint};
pub use api::request::ReportRequest;
pub use api::transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
pub use config::ClientConfig;
pub use error::{ReportError, Result, TransportError};
