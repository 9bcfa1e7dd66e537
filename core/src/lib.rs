//! # fastping core
//!
//! The probing pipeline, leaf first:
//! * [`command`]: one invocation per classified target.
//! * [`prober`]: bounded concurrent execution of invocations.
//! * [`aggregator`]: raw output to a status map.
//! * [`engine`]: the [`FastPing`] entry point tying the stages together.
//!
//! [`system`] locates and vets the `fping` executable.

pub mod aggregator;
pub mod command;
pub mod engine;
pub mod prober;
pub mod system;

pub use engine::{FastPing, PingReport, PingRequest};
