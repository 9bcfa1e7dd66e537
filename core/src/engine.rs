//! # Ping Engine
//!
//! Runs the full pipeline for one request:
//! classify targets, build invocations, probe concurrently, aggregate.
//!
//! The engine keeps no results between calls; every [`FastPing::ping`] builds
//! its status map from scratch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use fastping_common::config::Config;
use fastping_common::network::status::{StatusFilter, StatusMap, filter_by_status};
use fastping_common::network::target;
use fastping_common::{FastPingError, Result, success};
use tracing::info;

use crate::aggregator;
use crate::command;
use crate::prober::fping::FpingRunner;
use crate::prober::{ConcurrentProber, ProbeRunner, ProgressCallback};
use crate::system;

/// Targets to probe, given inline or as a file, never both.
#[derive(Debug, Clone, Default)]
pub struct PingRequest {
    pub targets: Vec<String>,
    pub filename: Option<PathBuf>,
    /// One of `alive`, `dead` or `noip`; `None` returns the full map.
    pub status: Option<String>,
}

impl PingRequest {
    pub fn targets<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            filename: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Checks the input modes and the filter before anything runs.
    fn validate(&self) -> Result<Option<StatusFilter>> {
        match (self.targets.is_empty(), &self.filename) {
            (false, Some(_)) => {
                return Err(FastPingError::Usage(
                    "specify only one of targets or a target file".into(),
                ));
            }
            (true, None) => {
                return Err(FastPingError::Usage(
                    "specify either a list of targets or a target file".into(),
                ));
            }
            _ => {}
        }
        self.status.as_deref().map(str::parse::<StatusFilter>).transpose()
    }
}

/// What a ping call hands back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PingReport {
    /// No filter was requested.
    Full(StatusMap),
    /// Targets whose status matched the requested filter, in map order.
    Filtered {
        filter: StatusFilter,
        targets: Vec<String>,
    },
}

pub struct FastPing {
    cfg: Config,
    executable: PathBuf,
    runner: Arc<dyn ProbeRunner>,
    on_progress: Option<ProgressCallback>,
}

impl FastPing {
    /// Locates `fping` and fails fast unless it supports CSV output.
    pub fn new(cfg: Config) -> Result<Self> {
        let exe = system::verify_fping(cfg.executable.as_deref())?;
        info!("Using {} ({})", exe.path.display(), exe.version);
        let runner = Arc::new(FpingRunner::new(cfg.probe_timeout));
        Ok(Self::with_runner(cfg, exe.path, runner))
    }

    /// Builds an engine around an arbitrary runner without checking the executable.
    pub fn with_runner(cfg: Config, executable: PathBuf, runner: Arc<dyn ProbeRunner>) -> Self {
        Self {
            cfg,
            executable,
            runner,
            on_progress: None,
        }
    }

    pub fn on_progress(mut self, on_progress: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.on_progress = Some(Arc::new(on_progress));
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub async fn ping(&self, request: PingRequest) -> Result<PingReport> {
        let filter: Option<StatusFilter> = request.validate()?;
        let map: StatusMap = self.probe(&request).await?;

        Ok(match filter {
            None => PingReport::Full(map),
            Some(filter) => PingReport::Filtered {
                filter,
                targets: filter_by_status(&map, filter.status()),
            },
        })
    }

    /// Classifies, probes and aggregates without applying a filter.
    pub async fn status_map(&self, request: PingRequest) -> Result<StatusMap> {
        request.validate()?;
        self.probe(&request).await
    }

    async fn probe(&self, request: &PingRequest) -> Result<StatusMap> {
        let lines: Vec<String> = match &request.filename {
            Some(path) => target::read_targets_file(path)?,
            None => request.targets.clone(),
        };

        let targets = target::classify(&lines)?;
        let invocations = command::build_invocations(&self.executable, &targets);
        info!(
            "Probing {} hosts and {} networks",
            targets.hosts().len(),
            targets.networks().len()
        );

        let prober = ConcurrentProber::new(self.runner.clone(), self.cfg.workers())
            .with_progress(self.on_progress.clone());
        let outcomes = prober.run_all(invocations).await;

        let map = aggregator::aggregate(&outcomes)?;
        success!("{} targets reported back", map.len());
        Ok(map)
    }
}
