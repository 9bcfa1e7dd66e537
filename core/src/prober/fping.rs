//! Runs invocations as `fping` child processes.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{ProbeOutcome, ProbeRunner};
use crate::command::ProbeInvocation;

pub struct FpingRunner {
    timeout: Option<Duration>,
}

impl FpingRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ProbeRunner for FpingRunner {
    async fn run(&self, invocation: &ProbeInvocation) -> ProbeOutcome {
        let mut command = Command::new(&invocation.program);
        command
            .args(invocation.args())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, command.output()).await {
                Ok(output) => output,
                Err(_) => {
                    warn!("Probe for {} timed out after {limit:?}", invocation.target);
                    return ProbeOutcome::empty(&invocation.target);
                }
            },
            None => command.output().await,
        };

        match output {
            Ok(output) => {
                let success = output.status.success();
                if !success {
                    // fping exits non-zero whenever any target is unreachable
                    debug!(
                        "{invocation} exited with {}: {}",
                        output.status,
                        String::from_utf8_lossy(&output.stderr).trim()
                    );
                }
                ProbeOutcome::new(
                    &invocation.target,
                    String::from_utf8_lossy(&output.stdout),
                    success,
                )
            }
            Err(e) => {
                warn!("Failed to launch {invocation}: {e}");
                ProbeOutcome::empty(&invocation.target)
            }
        }
    }
}
