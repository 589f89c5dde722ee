use crate::preflight;
use crate::progress::WaitProgress;
use crate::utils;
use colored::Colorize;
use stackflow_aws::resolve::find_output;
use stackflow_aws::wafv2::{WEB_ACL_ARN_FALLBACK, WEB_ACL_ARN_KEY};
use stackflow_aws::{StackDriver, logs, s3, wafv2};
use stackflow_core::{Environment, OperationResult, StackRequest};

/// Output keys under which the WAF stack exports its log bucket
const LOG_BUCKET_OUTPUT_KEY: &str = "WAFLogsBucket";
const LOG_BUCKET_OUTPUT_FALLBACK: &str = "LogBucketName";

pub async fn handle(
    environment: Environment,
    stack_name: Option<String>,
    region: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    let waf_req = StackRequest::waf(environment, stack_name, region.clone());
    let dashboard_req = StackRequest::waf_dashboard(environment, region);
    let driver = StackDriver::new(&waf_req.region);

    println!("{}", "Tearing down WAF stacks".yellow().bold());
    println!(
        "Stacks: {} then {}  Region: {}",
        dashboard_req.stack_name.cyan(),
        waf_req.stack_name.cyan(),
        waf_req.region.cyan()
    );

    println!();
    preflight::check_access(&driver).await?;

    if !utils::confirm(
        &format!(
            "This will delete stacks '{}' and '{}'. Continue?",
            dashboard_req.stack_name, waf_req.stack_name
        ),
        force,
    ) {
        println!("Cleanup cancelled");
        std::process::exit(1);
    }

    // The dashboard imports values exported by the WAF stack, so it must be
    // gone before the WAF stack deletion is submitted.
    println!();
    println!("{}", "[Step 1/5] Deleting dashboard stack".yellow());
    let spinner = WaitProgress::new(&format!(
        "Waiting for {} to delete...",
        dashboard_req.stack_name
    ));
    let result = driver.teardown(&dashboard_req).await;
    spinner.finish_and_clear();

    match result? {
        OperationResult::Failed(reason) => {
            anyhow::bail!("Dashboard stack deletion failed: {}", reason);
        }
        OperationResult::TimedOut => {
            anyhow::bail!(
                "Timed out waiting for stack {} to delete",
                dashboard_req.stack_name
            );
        }
        outcome => {
            println!("  ✓ Stack {}: {}", dashboard_req.stack_name.cyan(), outcome);
        }
    }

    // Associations block web-ACL deletion the same way a non-empty bucket
    // blocks bucket deletion. A vanished ACL or resource is only a warning.
    println!();
    println!("{}", "[Step 2/5] Disassociating web ACL".yellow());
    let waf_outputs = driver
        .cli()
        .stack_outputs(&waf_req.stack_name)
        .await
        .unwrap_or_default();
    match find_output(&waf_outputs, WEB_ACL_ARN_KEY, WEB_ACL_ARN_FALLBACK) {
        Some(web_acl_arn) => match wafv2::disassociate_all(driver.cli(), &web_acl_arn).await {
            Ok(count) => println!("  ✓ Disassociated {} resources", count),
            Err(e) => println!("  ⚠ Disassociation pass failed ({}), continuing", e),
        },
        None => println!("  ⚠ Stack exports no web ACL, skipping"),
    }

    println!();
    println!("{}", "[Step 3/5] Emptying WAF log bucket".yellow());
    match find_output(&waf_outputs, LOG_BUCKET_OUTPUT_KEY, LOG_BUCKET_OUTPUT_FALLBACK) {
        Some(bucket) => {
            let deleted = s3::empty_bucket(driver.cli(), &bucket).await?;
            println!("  ✓ Removed {} objects from {}", deleted, bucket.cyan());
        }
        None => println!("  ⚠ Stack exports no log bucket, skipping"),
    }

    println!();
    println!("{}", "[Step 4/5] Deleting WAF stack".yellow());
    let spinner = WaitProgress::new(&format!("Waiting for {} to delete...", waf_req.stack_name));
    let result = driver.teardown(&waf_req).await;
    spinner.finish_and_clear();

    match result? {
        OperationResult::Failed(reason) => {
            anyhow::bail!("WAF stack deletion failed: {}", reason);
        }
        OperationResult::TimedOut => {
            anyhow::bail!("Timed out waiting for stack {} to delete", waf_req.stack_name);
        }
        outcome => {
            println!("  ✓ Stack {}: {}", waf_req.stack_name.cyan(), outcome);
        }
    }

    // Firehose and Lambda create their log groups lazily; stack deletion
    // leaves them behind.
    println!();
    println!("{}", "[Step 5/5] Removing leftover log groups".yellow());
    let mut removed = 0;
    for prefix in [
        format!("/aws/kinesisfirehose/aws-waf-logs-{}", waf_req.environment),
        format!("/aws/lambda/{}", waf_req.stack_name),
    ] {
        removed += logs::delete_log_groups_with_prefix(driver.cli(), &prefix).await;
    }
    println!("  ✓ Removed {} log groups", removed);

    println!();
    println!("{}", "Cleanup complete".green().bold());
    Ok(())
}
