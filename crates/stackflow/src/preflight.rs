//! Preflight checks
//!
//! Runs before anything touches AWS: tool, credentials, input files. Each
//! failure cause gets its own message. Nothing has been submitted at this
//! point, so there is nothing to roll back.

use colored::Colorize;
use stackflow_aws::StackDriver;
use stackflow_core::StackRequest;

/// Full preflight for deployments: aws CLI present, credentials valid,
/// template and parameter files on disk
pub async fn run(driver: &StackDriver, req: &StackRequest) -> anyhow::Result<()> {
    check_access(driver).await?;

    if !req.template_path.exists() {
        anyhow::bail!("Template file not found: {}", req.template_path.display());
    }
    println!("  ✓ Template: {}", req.template_path.display().to_string().cyan());

    if !req.parameters_path.exists() {
        anyhow::bail!(
            "Parameter file not found: {}",
            req.parameters_path.display()
        );
    }
    println!(
        "  ✓ Parameters: {}",
        req.parameters_path.display().to_string().cyan()
    );

    Ok(())
}

/// Tool and credential checks only
///
/// Teardown needs no local files; the stack record is the input.
pub async fn check_access(driver: &StackDriver) -> anyhow::Result<()> {
    let identity = driver.cli().check_auth().await?;
    println!(
        "  ✓ Authenticated as {} (account {})",
        identity.arn.cyan(),
        identity.account
    );
    Ok(())
}
