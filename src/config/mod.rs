//! Configuration module
//!
//! `ClientConfig` is the immutable value a client is built from; `config`
//! holds the optional TOML settings file that can produce one.

pub mod client_config;
pub mod config;

pub use client_config::ClientConfig;
