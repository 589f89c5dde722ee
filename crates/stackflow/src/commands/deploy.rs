use crate::preflight;
use crate::progress::WaitProgress;
use crate::report;
use colored::Colorize;
use stackflow_aws::StackDriver;
use stackflow_core::{Environment, OperationResult, StackRequest};

pub async fn handle(
    environment: Environment,
    stack_name: Option<String>,
    region: Option<String>,
) -> anyhow::Result<()> {
    let req = StackRequest::three_tier(environment, stack_name, region);
    let driver = StackDriver::new(&req.region);

    println!("{}", "Deploying three-tier architecture stack".blue().bold());
    println!(
        "Stack: {}  Environment: {}  Region: {}",
        req.stack_name.cyan(),
        req.environment.to_string().cyan(),
        req.region.cyan()
    );

    println!();
    println!("{}", "[Step 1/4] Preflight checks".blue());
    preflight::run(&driver, &req).await?;

    println!();
    println!("{}", "[Step 2/4] Validating template".blue());
    driver.cli().validate_template(&req.template_path).await?;
    println!("  ✓ Template accepted by CloudFormation");

    println!();
    println!("{}", "[Step 3/4] Applying stack".blue());
    let spinner = WaitProgress::new(&format!("Waiting for {}...", req.stack_name));
    let result = driver.apply(&req, &[]).await;
    spinner.finish_and_clear();

    match result? {
        OperationResult::Failed(reason) => {
            anyhow::bail!("Stack operation failed: {}", reason);
        }
        OperationResult::TimedOut => {
            anyhow::bail!(
                "Timed out waiting for stack {}; the remote operation may still be running",
                req.stack_name
            );
        }
        outcome => {
            println!("  ✓ Stack {}: {}", req.stack_name.cyan(), outcome);
        }
    }

    println!();
    println!("{}", "[Step 4/4] Stack outputs".blue());
    // The stack is already in a good state; output fetching is advisory.
    match driver.cli().stack_outputs(&req.stack_name).await {
        Ok(outputs) => report::print_outputs(&outputs),
        Err(e) => println!("  ⚠ Could not fetch outputs: {}", e),
    }

    Ok(())
}
