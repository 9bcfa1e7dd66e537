#![cfg(test)]
use std::io::Write;
use std::sync::Arc;

use fastping_common::FastPingError;
use fastping_common::network::status::{Status, StatusFilter, StatusMap};
use fastping_core::aggregator;
use fastping_core::command::ProbeKind;
use fastping_core::{PingReport, PingRequest};

use crate::utils::{ScriptedRunner, engine};

fn sorted(map: &StatusMap) -> Vec<(String, Status)> {
    let mut entries: Vec<(String, Status)> = map.iter().map(|(t, s)| (t.to_string(), s)).collect();
    entries.sort();
    entries
}

fn mixed_runner() -> ScriptedRunner {
    ScriptedRunner::new()
        .reply("8.8.8.8", "8.8.8.8,alive\n")
        .reply("www.example.com", "www.example.com,alive\n")
        .reply("nowhere.invalid", "nowhere.invalid,unresolvable\n")
        .reply(
            "192.168.7.0/30",
            "192.168.7.1,alive\n192.168.7.2,unreachable\n",
        )
}

#[tokio::test]
async fn single_alive_address_yields_full_map() {
    let runner = Arc::new(ScriptedRunner::new().reply("8.8.8.8", "8.8.8.8,alive\n"));
    let report = engine(runner).ping(PingRequest::targets(["8.8.8.8"])).await.unwrap();

    let map = match report {
        PingReport::Full(map) => map,
        other => panic!("expected the full map, got {other:?}"),
    };
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("8.8.8.8"), Some(Status::Alive));
}

#[tokio::test]
async fn address_and_mask_build_one_network_invocation() {
    let runner = Arc::new(ScriptedRunner::new());
    engine(runner.clone())
        .ping(PingRequest::targets(["10.0.0.0 255.255.255.0"]))
        .await
        .unwrap();

    let invocations = runner.invocations();
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].kind, ProbeKind::Network);
    assert_eq!(invocations[0].target, "10.0.0.0/24");
    assert_eq!(invocations[0].args(), ["-ngV", "10.0.0.0/24"]);
}

#[tokio::test]
async fn prefix_outside_range_is_rejected() {
    let runner = Arc::new(ScriptedRunner::new());
    let result = engine(runner.clone())
        .ping(PingRequest::targets(["10.0.0.1/31"]))
        .await;

    assert!(matches!(result, Err(FastPingError::AddressRange { .. })));
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn targets_and_file_together_are_a_usage_error() {
    let runner = Arc::new(ScriptedRunner::new());
    let request = PingRequest {
        targets: vec!["8.8.8.8".into()],
        filename: Some("targets.txt".into()),
        status: None,
    };

    let result = engine(runner.clone()).ping(request).await;
    assert!(matches!(result, Err(FastPingError::Usage(_))));
    assert!(runner.invocations().is_empty());
}

#[tokio::test]
async fn status_filters_return_lists() {
    let runner = Arc::new(mixed_runner());
    let fp = engine(runner);
    let targets = ["8.8.8.8", "www.example.com nowhere.invalid", "192.168.7.0/30"];

    let bogus = fp.ping(PingRequest::targets(targets).with_status("bogus")).await;
    assert!(matches!(bogus, Err(FastPingError::Usage(_))));

    let expected = [
        (StatusFilter::Alive, vec!["8.8.8.8", "www.example.com", "192.168.7.1"]),
        (StatusFilter::Dead, vec!["192.168.7.2"]),
        (StatusFilter::NoIp, vec!["nowhere.invalid"]),
    ];
    for (filter, want) in expected {
        let report = fp
            .ping(PingRequest::targets(targets).with_status(filter.to_string()))
            .await
            .unwrap();
        assert_eq!(
            report,
            PingReport::Filtered {
                filter,
                targets: want.into_iter().map(String::from).collect(),
            }
        );
    }
}

#[tokio::test]
async fn views_partition_the_status_map() {
    let fp = engine(Arc::new(mixed_runner()));
    let map = fp
        .status_map(PingRequest::targets([
            "8.8.8.8",
            "www.example.com",
            "nowhere.invalid",
            "192.168.7.0/30",
            "10.9.9.9",
        ]))
        .await
        .unwrap();

    let (alive, dead, noip) = (map.alive(), map.unreachable(), map.unresolvable());
    assert_eq!(alive.len() + dead.len() + noip.len(), map.len());

    let mut union: Vec<String> = alive.into_iter().chain(dead).chain(noip).collect();
    union.sort();
    let mut keys: Vec<String> = map.iter().map(|(t, _)| t.to_string()).collect();
    keys.sort();
    assert_eq!(union, keys);
}

#[tokio::test]
async fn map_does_not_depend_on_target_order() {
    let targets = vec!["8.8.8.8", "www.example.com", "nowhere.invalid", "192.168.7.0/30"];
    let mut reversed = targets.clone();
    reversed.reverse();

    let forward = engine(Arc::new(mixed_runner()))
        .status_map(PingRequest::targets(targets))
        .await
        .unwrap();
    let backward = engine(Arc::new(mixed_runner()))
        .status_map(PingRequest::targets(reversed))
        .await
        .unwrap();

    assert_eq!(sorted(&forward), sorted(&backward));
}

#[tokio::test]
async fn rendered_map_round_trips() {
    let fp = engine(Arc::new(mixed_runner()));
    let map = fp
        .status_map(PingRequest::targets(["8.8.8.8", "nowhere.invalid", "192.168.7.0/30"]))
        .await
        .unwrap();

    let again = aggregator::parse_records(&map.to_string()).unwrap();
    assert_eq!(map, again);
}

#[tokio::test]
async fn failing_probe_output_is_kept() {
    // No canned reply: the runner reports the target unreachable with a failing status
    let fp = engine(Arc::new(ScriptedRunner::new()));
    let map = fp
        .status_map(PingRequest::targets(["10.1.2.3"]))
        .await
        .unwrap();
    assert_eq!(map.get("10.1.2.3"), Some(Status::Unreachable));
}

#[tokio::test]
async fn unknown_status_token_fails_the_call() {
    let runner = Arc::new(ScriptedRunner::new().reply("8.8.8.8", "8.8.8.8,maybe\n"));
    let result = engine(runner).ping(PingRequest::targets(["8.8.8.8"])).await;
    assert!(matches!(result, Err(FastPingError::OutputFormat { .. })));
}

#[tokio::test]
async fn targets_can_come_from_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "8.8.8.8\n\nnowhere.invalid\n").unwrap();

    let runner = Arc::new(mixed_runner());
    let report = engine(runner.clone())
        .ping(PingRequest::file(file.path()).with_status("noip"))
        .await
        .unwrap();

    assert_eq!(
        report,
        PingReport::Filtered {
            filter: StatusFilter::NoIp,
            targets: vec!["nowhere.invalid".to_string()],
        }
    );
    assert_eq!(runner.invocations().len(), 2);
}

#[tokio::test]
async fn missing_target_file_is_reported() {
    let runner = Arc::new(ScriptedRunner::new());
    let result = engine(runner)
        .ping(PingRequest::file("/nonexistent/fastping/targets"))
        .await;
    assert!(matches!(result, Err(FastPingError::Io(_))));
}
