use crate::preflight;
use crate::progress::WaitProgress;
use crate::report;
use colored::Colorize;
use stackflow_aws::resolve::{LOAD_BALANCER_ARN_FALLBACK, LOAD_BALANCER_ARN_KEY};
use stackflow_aws::{StackDriver, resolve_output};
use stackflow_core::{Environment, OperationResult, Parameter, StackRequest};

pub async fn handle(
    environment: Environment,
    three_tier_stack: String,
    stack_name: Option<String>,
    region: Option<String>,
) -> anyhow::Result<()> {
    let req = StackRequest::waf(environment, stack_name, region);
    let driver = StackDriver::new(&req.region);

    println!("{}", "Deploying WAF protection stack".blue().bold());
    println!(
        "Stack: {}  Protecting: {}  Region: {}",
        req.stack_name.cyan(),
        three_tier_stack.cyan(),
        req.region.cyan()
    );

    println!();
    println!("{}", "[Step 1/4] Preflight checks".blue());
    preflight::run(&driver, &req).await?;

    // Resolve the upstream load balancer before anything is submitted, so
    // a missing upstream fails here and not mid-deployment.
    println!();
    println!("{}", "[Step 2/4] Resolving load balancer".blue());
    let lb_arn = resolve_output(
        driver.cli(),
        &three_tier_stack,
        LOAD_BALANCER_ARN_KEY,
        LOAD_BALANCER_ARN_FALLBACK,
    )
    .await?;
    println!("  ✓ Load balancer: {}", lb_arn.cyan());

    println!();
    println!("{}", "[Step 3/4] Applying stack".blue());
    driver.cli().validate_template(&req.template_path).await?;
    println!("  ✓ Template accepted by CloudFormation");

    let overrides = [Parameter::new(LOAD_BALANCER_ARN_KEY, lb_arn)];
    let spinner = WaitProgress::new(&format!("Waiting for {}...", req.stack_name));
    let result = driver.apply(&req, &overrides).await;
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
    match driver.cli().stack_outputs(&req.stack_name).await {
        Ok(outputs) => report::print_outputs(&outputs),
        Err(e) => println!("  ⚠ Could not fetch outputs: {}", e),
    }

    Ok(())
}
