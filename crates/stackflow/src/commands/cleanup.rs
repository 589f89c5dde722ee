use crate::preflight;
use crate::progress::WaitProgress;
use crate::utils;
use colored::Colorize;
use stackflow_aws::resolve::find_output;
use stackflow_aws::{StackDriver, logs, s3};
use stackflow_core::{Environment, OperationResult, StackRequest};

/// Output keys under which the three-tier stack exports its website bucket
const BUCKET_OUTPUT_KEY: &str = "StaticWebsiteBucket";
const BUCKET_OUTPUT_FALLBACK: &str = "StaticWebsiteBucketName";

pub async fn handle(
    environment: Environment,
    stack_name: Option<String>,
    region: Option<String>,
    force: bool,
) -> anyhow::Result<()> {
    let req = StackRequest::three_tier(environment, stack_name, region);
    let driver = StackDriver::new(&req.region);

    println!("{}", "Tearing down three-tier architecture stack".yellow().bold());
    println!(
        "Stack: {}  Environment: {}  Region: {}",
        req.stack_name.cyan(),
        req.environment.to_string().cyan(),
        req.region.cyan()
    );

    println!();
    preflight::check_access(&driver).await?;

    if !utils::confirm(
        &format!(
            "This will empty the website bucket and delete stack '{}'. Continue?",
            req.stack_name
        ),
        force,
    ) {
        println!("Cleanup cancelled");
        std::process::exit(1);
    }

    // The bucket must be drained before deletion is submitted;
    // CloudFormation refuses to delete a non-empty bucket.
    println!();
    println!("{}", "[Step 1/3] Emptying website bucket".yellow());
    match driver.cli().stack_outputs(&req.stack_name).await {
        Ok(outputs) => {
            match find_output(&outputs, BUCKET_OUTPUT_KEY, BUCKET_OUTPUT_FALLBACK) {
                Some(bucket) => {
                    let deleted = s3::empty_bucket(driver.cli(), &bucket).await?;
                    println!("  ✓ Removed {} objects from {}", deleted, bucket.cyan());
                }
                None => {
                    println!("  ⚠ Stack exports no website bucket, skipping");
                }
            }
        }
        Err(e) => {
            println!("  ⚠ Could not read stack outputs ({}), skipping", e);
        }
    }

    println!();
    println!("{}", "[Step 2/3] Deleting stack".yellow());
    let spinner = WaitProgress::new(&format!("Waiting for {} to delete...", req.stack_name));
    let result = driver.teardown(&req).await;
    spinner.finish_and_clear();

    match result? {
        OperationResult::Failed(reason) => {
            anyhow::bail!("Stack deletion failed: {}", reason);
        }
        OperationResult::TimedOut => {
            anyhow::bail!(
                "Timed out waiting for stack {} to delete; the remote operation may still be running",
                req.stack_name
            );
        }
        outcome => {
            println!("  ✓ Stack {}: {}", req.stack_name.cyan(), outcome);
        }
    }

    // Orphaned log groups survive stack deletion; failures here are
    // advisory and never change the exit code.
    println!();
    println!("{}", "[Step 3/3] Removing leftover log groups".yellow());
    let prefix = format!("/aws/lambda/{}", req.stack_name);
    let removed = logs::delete_log_groups_with_prefix(driver.cli(), &prefix).await;
    println!("  ✓ Removed {} log groups", removed);

    println!();
    println!("{}", "Cleanup complete".green().bold());
    Ok(())
}
