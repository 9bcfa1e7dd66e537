use std::path::PathBuf;
use std::time::Duration;

/// Name of the probing executable looked up on `PATH`.
pub const FPING_BINARY: &str = "fping";

/// Default number of probe invocations allowed to run at once.
pub const DEFAULT_POOL_SIZE: usize = 128;

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on concurrently running probe invocations.
    pub pool_size: usize,
    /// Kills a single invocation once it runs longer than this.
    ///
    /// `None` waits for every invocation to exit on its own.
    pub probe_timeout: Option<Duration>,
    /// Explicit path to the probing executable, bypassing the `PATH` lookup.
    pub executable: Option<PathBuf>,
    pub quiet: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            probe_timeout: None,
            executable: None,
            quiet: 0,
        }
    }
}

impl Config {
    /// Pool size as used by the prober, never below one worker.
    pub fn workers(&self) -> usize {
        self.pool_size.max(1)
    }
}
