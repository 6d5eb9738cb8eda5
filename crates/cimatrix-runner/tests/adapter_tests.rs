//! Adapter tests that stand in for `go` and `gotestsum` with small shell scripts.

#![cfg(unix)]

use cimatrix_core::ports::{BalanceRequest, PackageDiscovery, Partitioner};
use cimatrix_core::{BalanceMode, Error, Verbosity};
use cimatrix_runner::{DiscoveryConfig, GoDiscovery, GotestsumOracle, OracleConfig};

/// `sh -c <script> <name>`; arguments appended by the adapter become `$1..`.
fn script(body: &str, name: &str) -> Vec<String> {
    vec![
        "sh".to_string(),
        "-c".to_string(),
        body.to_string(),
        name.to_string(),
    ]
}

fn discovery(body: &str) -> GoDiscovery {
    GoDiscovery::new(DiscoveryConfig {
        command: script(body, "go"),
        build_tags: "all".to_string(),
    })
}

#[tokio::test]
async fn test_list_packages() {
    let dir = tempfile::tempdir().unwrap();
    let discovery = discovery("echo example.com/b; echo example.com/a");

    let packages = discovery
        .list_packages(dir.path().to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(
        packages.into_iter().collect::<Vec<_>>(),
        vec!["example.com/a", "example.com/b"]
    );
}

#[tokio::test]
async fn test_list_packages_passes_go_arguments() {
    let dir = tempfile::tempdir().unwrap();
    let discovery = discovery(r#"echo "$@""#);

    let args = discovery
        .list_packages(dir.path().to_str().unwrap())
        .await
        .unwrap();

    let expected: std::collections::BTreeSet<String> = ["list", "-tags", "all", "-find", "./..."]
        .into_iter()
        .map(String::from)
        .collect();
    assert_eq!(args, expected);
}

#[tokio::test]
async fn test_list_tests_stops_at_summary() {
    let dir = tempfile::tempdir().unwrap();
    let discovery = discovery(r#"printf 'TestA\nTestB\nok  \texample.com/x\t0.1s\n'"#);

    let tests = discovery
        .list_tests(dir.path().to_str().unwrap())
        .await
        .unwrap();

    assert_eq!(tests, vec!["TestA", "TestB"]);
}

#[tokio::test]
async fn test_discovery_failure_keeps_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().to_str().unwrap().to_string();
    let discovery = discovery("echo 'undefined: foo' >&2; exit 1");

    let err = discovery.list_packages(&target).await.unwrap_err();

    match err {
        Error::Discovery { target: t, message } => {
            assert_eq!(t, target);
            assert!(message.contains("undefined: foo"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn oracle(body: &str, timing_dir: &std::path::Path, timeout_seconds: Option<u64>) -> GotestsumOracle {
    GotestsumOracle::new(
        OracleConfig {
            command: script(body, "gotestsum"),
            timing_dir: timing_dir.to_path_buf(),
            timeout_seconds,
        },
        Verbosity::QUIET,
    )
}

#[tokio::test]
async fn test_oracle_reads_items_and_parses_groups() {
    let dir = tempfile::tempdir().unwrap();
    let timing_dir = dir.path().join("test-results");
    let oracle = oracle(
        r#"pkgs=$(tr '\n' ' '); printf '{"include":[{"id":0,"estimatedRuntime":"1m","packages":"%s","description":"%s"}]}' "$pkgs" "$*""#,
        &timing_dir,
        None,
    );

    let groups = oracle
        .balance(&BalanceRequest {
            items: vec!["example.com/a".to_string(), "example.com/b".to_string()],
            partitions: 2,
            mode: BalanceMode::Package,
        })
        .await
        .unwrap();

    assert!(timing_dir.is_dir());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].packages, vec!["example.com/a", "example.com/b"]);
    assert!(groups[0].description.starts_with("tool ci-matrix --partitions 2"));
    assert!(groups[0].description.ends_with("--debug"));
}

#[tokio::test]
async fn test_oracle_failure_and_garbage_output() {
    let dir = tempfile::tempdir().unwrap();
    let request = BalanceRequest {
        items: vec!["TestA".to_string()],
        partitions: 2,
        mode: BalanceMode::Test {
            package: "example.com/tests".to_string(),
        },
    };

    let failing = oracle("echo 'no timing files' >&2; exit 2", dir.path(), None);
    let err = failing.balance(&request).await.unwrap_err();
    assert!(matches!(err, Error::OracleInvocation(ref msg) if msg.contains("no timing files")));

    let garbage = oracle("cat >/dev/null; echo not-json", dir.path(), None);
    let err = garbage.balance(&request).await.unwrap_err();
    assert!(matches!(err, Error::OracleInvocation(_)));
}

#[test]
fn test_oracle_timeout_is_an_invocation_error() {
    let dir = tempfile::tempdir().unwrap();
    let hanging = oracle("sleep 5", dir.path(), Some(1));

    let err = tokio_test::block_on(hanging.balance(&BalanceRequest {
        items: vec![],
        partitions: 2,
        mode: BalanceMode::Package,
    }))
    .unwrap_err();

    assert!(matches!(err, Error::OracleInvocation(ref msg) if msg.contains("timed out")));
}

#[tokio::test]
async fn test_unusable_timing_dir_is_an_invocation_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("results");
    std::fs::write(&blocker, "not a directory").unwrap();
    let oracle = oracle(r#"echo '{"include":[]}'"#, &blocker.join("timings"), None);

    let err = oracle
        .balance(&BalanceRequest {
            items: vec!["example.com/a".to_string()],
            partitions: 2,
            mode: BalanceMode::Package,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, Error::OracleInvocation(ref msg) if msg.contains("timing directory")));
}
