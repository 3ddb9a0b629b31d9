#![warn(rust_2018_idioms)]

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod forwarder;
pub mod handler;
pub mod healthcheck;
pub mod port;
pub mod relay_client;

#[cfg(test)]
pub(crate) mod test_support;

pub use forwarder::LogForwarder;
pub use healthcheck::{healthcheck, healthcheck_with_port};
