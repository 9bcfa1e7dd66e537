#![cfg(test)]
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fastping_common::config::Config;
use fastping_core::FastPing;
use fastping_core::command::ProbeInvocation;
use fastping_core::prober::{ProbeOutcome, ProbeRunner};

/// Answers each invocation with canned output and remembers what it ran.
///
/// Targets without a canned reply are reported unreachable, with a failing
/// exit status, the way fping does.
#[derive(Default)]
pub struct ScriptedRunner {
    replies: HashMap<String, String>,
    seen: Mutex<Vec<ProbeInvocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, target: &str, output: &str) -> Self {
        self.replies.insert(target.to_string(), output.to_string());
        self
    }

    pub fn invocations(&self) -> Vec<ProbeInvocation> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProbeRunner for ScriptedRunner {
    async fn run(&self, invocation: &ProbeInvocation) -> ProbeOutcome {
        self.seen.lock().unwrap().push(invocation.clone());
        match self.replies.get(&invocation.target) {
            Some(output) => ProbeOutcome::new(&invocation.target, output.as_str(), true),
            None => ProbeOutcome::new(
                &invocation.target,
                format!("{},unreachable\n", invocation.target),
                false,
            ),
        }
    }
}

pub fn engine(runner: Arc<ScriptedRunner>) -> FastPing {
    FastPing::with_runner(Config::default(), PathBuf::from("fping"), runner)
}
