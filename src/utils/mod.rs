//! Utility functions and helpers
//!
//! Logging setup and platform paths used by the settings file.

pub mod app_paths;
pub mod logging;
