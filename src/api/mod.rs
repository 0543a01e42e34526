//! StatCounter reporting API client
//!
//! Request construction (`endpoints`, `query`, `request`), execution
//! (`transport`) and the typed report methods (`client`).

pub mod client;
pub mod endpoints;
pub mod query;
pub mod request;
pub mod transport;
