#![allow(deprecated)] // TODO: migrate cargo_bin to cargo_bin_cmd

mod common;

use common::TestProject;
use predicates::prelude::*;

const STACK_WITH_BUCKET: &str = r#"[
    {"OutputKey": "StaticWebsiteBucket", "OutputValue": "three-tier-app-dev-website"},
    {"OutputKey": "LoadBalancerURL", "OutputValue": "http://alb-dev.example.com"}
]"#;

const VERSIONED_LISTING: &str = r#"{
    "Versions": [
        {"Key": "index.html", "VersionId": "v1"},
        {"Key": "index.html", "VersionId": "v2"}
    ],
    "DeleteMarkers": [
        {"Key": "error.html", "VersionId": "m1"}
    ],
    "IsTruncated": false
}"#;

#[test]
fn test_cleanup_empties_bucket_before_deleting() {
    let project = TestProject::new();
    project.seed_stack("three-tier-app-dev", "CREATE_COMPLETE", STACK_WITH_BUCKET);
    project.seed_bucket_listing(VERSIONED_LISTING);

    project
        .cmd()
        .args(["cleanup", "--environment", "dev", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 3 objects"))
        .stdout(predicate::str::contains("deleted"));

    let log = project.aws_log();
    let listed = log.find("s3api list-object-versions").unwrap();
    let purged = log.find("s3api delete-objects").unwrap();
    let deleted = log.find("cloudformation delete-stack").unwrap();
    assert!(listed < purged);
    assert!(purged < deleted);
}

#[test]
fn test_cleanup_with_empty_bucket_succeeds() {
    let project = TestProject::new();
    project.seed_stack("three-tier-app-dev", "CREATE_COMPLETE", STACK_WITH_BUCKET);
    // No listing seeded: the stub reports an empty bucket.

    project
        .cmd()
        .args(["cleanup", "--environment", "dev", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 0 objects"));

    assert!(project.aws_log().contains("cloudformation delete-stack"));
}

#[test]
fn test_cleanup_of_absent_stack_is_noop() {
    let project = TestProject::new();

    project
        .cmd()
        .args(["cleanup", "--environment", "dev", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already absent"));

    assert!(!project.aws_log().contains("delete-stack"));
}

#[test]
fn test_cleanup_declined_exits_nonzero() {
    let project = TestProject::new();
    project.seed_stack("three-tier-app-dev", "CREATE_COMPLETE", STACK_WITH_BUCKET);

    project
        .cmd()
        .args(["cleanup", "--environment", "dev"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("Cleanup cancelled"));

    assert!(!project.aws_log().contains("delete-stack"));
}

#[test]
fn test_cleanup_waf_deletes_dashboard_first() {
    let project = TestProject::new();
    project.seed_stack(
        "waf-protection-dev",
        "CREATE_COMPLETE",
        r#"[{"OutputKey": "WebACLArn", "OutputValue": "arn:aws:wafv2:us-east-1:123456789012:regional/webacl/dev/abc"}]"#,
    );
    project.seed_stack("waf-dashboard-dev", "CREATE_COMPLETE", "[]");

    project
        .cmd()
        .args(["cleanup-waf", "--environment", "dev", "--force"])
        .assert()
        .success();

    let log = project.aws_log();
    let dashboard = log
        .find("cloudformation delete-stack --stack-name waf-dashboard-dev")
        .unwrap();
    let waf = log
        .find("cloudformation delete-stack --stack-name waf-protection-dev")
        .unwrap();
    assert!(dashboard < waf);
    // Associations checked before the WAF stack deletion was submitted.
    let assoc = log.find("wafv2 list-resources-for-web-acl").unwrap();
    assert!(assoc < waf);
}

#[test]
fn test_cleanup_waf_with_absent_dashboard() {
    let project = TestProject::new();
    project.seed_stack("waf-protection-dev", "CREATE_COMPLETE", "[]");

    project
        .cmd()
        .args(["cleanup-waf", "--environment", "dev", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already absent"));

    assert!(
        project
            .aws_log()
            .contains("cloudformation delete-stack --stack-name waf-protection-dev")
    );
}
