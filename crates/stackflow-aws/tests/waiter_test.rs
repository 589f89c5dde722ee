//! Wait-bound behaviour against a stubbed `aws` executable
//!
//! The stub never reports a terminal status, so the waiter must give up
//! at its attempt bound instead of polling forever.

use stackflow_aws::{AwsCli, AwsError, StackDriver, WaitConfig, waiter};
use stackflow_core::{Environment, OperationResult, StackRequest};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::time::Duration;

const STUCK_AWS: &str = r#"#!/usr/bin/env bash
case "$*" in
    *delete-stack*)
        echo '{}'
        ;;
    *describe-stacks*)
        echo '{"Stacks":[{"StackName":"stuck-stack","StackStatus":"DELETE_IN_PROGRESS"}]}'
        ;;
    *)
        echo '{}'
        ;;
esac
"#;

/// Put a stub `aws` first on PATH; keep the TempDir alive for the test
fn install_stub() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let stub = dir.path().join("aws");
    fs::write(&stub, STUCK_AWS).unwrap();
    fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).unwrap();

    let path = format!(
        "{}:{}",
        dir.path().display(),
        std::env::var("PATH").unwrap_or_default()
    );
    // This is the only test in the binary, so nothing else reads the
    // environment concurrently.
    unsafe { std::env::set_var("PATH", path) };
    dir
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wait_gives_up_after_max_attempts() {
    let _stub = install_stub();

    let wait = WaitConfig {
        poll_interval: Duration::from_millis(5),
        max_attempts: 3,
    };

    let cli = AwsCli::new("us-east-1");
    let err = waiter::wait_for_terminal(&cli, "stuck-stack", &wait)
        .await
        .unwrap_err();
    assert!(matches!(err, AwsError::WaitTimeout { attempts: 3, .. }));

    // The driver surfaces the same exhaustion as a TimedOut outcome.
    let req = StackRequest::three_tier(Environment::Dev, Some("stuck-stack".to_string()), None);
    let driver = StackDriver::new(req.region.as_str()).with_wait_config(wait);
    assert_eq!(
        driver.teardown(&req).await.unwrap(),
        OperationResult::TimedOut
    );
}
