//! # sxm
//!
//! Library half of the `sxm` binary: the HTTP API, the CLI and content
//! loading. Exposed so the integration tests can drive the router directly.

pub mod api;
pub mod cli;
pub mod config;
