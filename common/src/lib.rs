//! Shared domain types for `fastping`.
//!
//! * [`network::target`]: turns raw target lines into hosts and networks.
//! * [`network::status`]: reachability status, filters and the status map.
//! * [`config`]: engine settings shared by the CLI and the core.
//! * [`error`]: the error taxonomy every layer reports through.

pub mod config;
pub mod error;
pub mod log;
pub mod network;
pub mod utils;

pub use error::{FastPingError, Result};
