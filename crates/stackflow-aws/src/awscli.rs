//! aws CLI wrapper
//!
//! Wraps the `aws` CLI for CloudFormation operations. All commands run with
//! an explicit `--region` and `--output json`; responses are parsed into
//! typed structs.

use crate::error::{AwsError, Result};
use serde::{Deserialize, Serialize};
use stackflow_core::{Parameter, StackRequest, StackStatus, to_cli_args};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// aws CLI wrapper
pub struct AwsCli {
    region: String,
}

impl AwsCli {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Check that the aws CLI is installed and credentials resolve
    pub async fn check_auth(&self) -> Result<CallerIdentity> {
        // Check if aws exists
        let which = Command::new("which").arg("aws").output().await?;

        if !which.status.success() {
            return Err(AwsError::AwsCliNotFound);
        }

        // Resolving the caller identity is the cheapest proof of valid
        // credentials.
        let output = self
            .run_command(&["sts", "get-caller-identity"])
            .await
            .map_err(|e| AwsError::AuthenticationFailed(e.to_string()))?;

        let identity: CallerIdentity = serde_json::from_str(&output)?;
        Ok(identity)
    }

    /// Run an aws command and return stdout
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("aws");
        cmd.arg("--region").arg(&self.region);
        cmd.arg("--output").arg("json");
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: aws --region {} {}", self.region, args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AwsError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Validate a template against the CloudFormation service
    pub async fn validate_template(&self, template_path: &Path) -> Result<()> {
        let template_arg = format!("file://{}", template_path.display());
        self.run_command(&[
            "cloudformation",
            "validate-template",
            "--template-body",
            &template_arg,
        ])
        .await
        .map_err(|e| AwsError::TemplateInvalid(e.to_string()))?;
        Ok(())
    }

    /// Describe a stack, or None if it does not exist
    pub async fn describe_stack(&self, stack_name: &str) -> Result<Option<StackDescription>> {
        let result = self
            .run_command(&[
                "cloudformation",
                "describe-stacks",
                "--stack-name",
                stack_name,
            ])
            .await;

        match result {
            Ok(output) => {
                let response: DescribeStacksResponse = serde_json::from_str(&output)?;
                Ok(response.stacks.into_iter().next())
            }
            Err(AwsError::CommandFailed(stderr)) if is_stack_missing(&stderr) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Submit a create-stack operation
    pub async fn create_stack(&self, req: &StackRequest, params: &[Parameter]) -> Result<()> {
        let template_arg = format!("file://{}", req.template_path.display());
        let param_args = to_cli_args(params);
        let tag_args: Vec<String> = req
            .tags()
            .iter()
            .map(|(k, v)| format!("Key={},Value={}", k, v))
            .collect();

        let mut args = vec![
            "cloudformation",
            "create-stack",
            "--stack-name",
            &req.stack_name,
            "--template-body",
            &template_arg,
            // The templates declare IAM-affecting resources.
            "--capabilities",
            "CAPABILITY_IAM",
            "CAPABILITY_NAMED_IAM",
        ];
        if !param_args.is_empty() {
            args.push("--parameters");
            args.extend(param_args.iter().map(|s| s.as_str()));
        }
        args.push("--tags");
        args.extend(tag_args.iter().map(|s| s.as_str()));

        self.run_command(&args).await?;
        Ok(())
    }

    /// Submit an update-stack operation
    ///
    /// An empty changeset is rejected by the CLI; that rejection is a
    /// success from the operator's point of view.
    pub async fn update_stack(
        &self,
        req: &StackRequest,
        params: &[Parameter],
    ) -> Result<UpdateOutcome> {
        let template_arg = format!("file://{}", req.template_path.display());
        let param_args = to_cli_args(params);
        let tag_args: Vec<String> = req
            .tags()
            .iter()
            .map(|(k, v)| format!("Key={},Value={}", k, v))
            .collect();

        let mut args = vec![
            "cloudformation",
            "update-stack",
            "--stack-name",
            &req.stack_name,
            "--template-body",
            &template_arg,
            "--capabilities",
            "CAPABILITY_IAM",
            "CAPABILITY_NAMED_IAM",
        ];
        if !param_args.is_empty() {
            args.push("--parameters");
            args.extend(param_args.iter().map(|s| s.as_str()));
        }
        args.push("--tags");
        args.extend(tag_args.iter().map(|s| s.as_str()));

        match self.run_command(&args).await {
            Ok(_) => Ok(UpdateOutcome::Submitted),
            Err(AwsError::CommandFailed(stderr)) if is_no_update_error(&stderr) => {
                Ok(UpdateOutcome::NoChanges)
            }
            Err(e) => Err(e),
        }
    }

    /// Submit a delete-stack operation
    pub async fn delete_stack(&self, stack_name: &str) -> Result<()> {
        self.run_command(&["cloudformation", "delete-stack", "--stack-name", stack_name])
            .await?;
        Ok(())
    }

    /// Fetch the declared outputs of a stack
    pub async fn stack_outputs(&self, stack_name: &str) -> Result<Vec<StackOutputEntry>> {
        let description = self.describe_stack(stack_name).await?;
        Ok(description
            .and_then(|d| d.outputs)
            .unwrap_or_default())
    }

    /// Run an arbitrary aws subcommand (s3api, wafv2, logs)
    pub(crate) async fn run(&self, args: &[&str]) -> Result<String> {
        self.run_command(args).await
    }
}

/// CloudFormation rejects describe/delete of unknown stacks with a
/// ValidationError naming the stack
pub(crate) fn is_stack_missing(stderr: &str) -> bool {
    stderr.contains("does not exist")
}

fn is_no_update_error(stderr: &str) -> bool {
    stderr.contains("No updates are to be performed")
}

/// Outcome of submitting an update-stack operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Update accepted; poll for the terminal state
    Submitted,
    /// Empty changeset; nothing to wait for
    NoChanges,
}

/// Caller identity from `sts get-caller-identity`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerIdentity {
    #[serde(rename = "Account")]
    pub account: String,

    #[serde(rename = "Arn")]
    pub arn: String,

    #[serde(rename = "UserId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct DescribeStacksResponse {
    #[serde(rename = "Stacks")]
    stacks: Vec<StackDescription>,
}

/// Stack description from `describe-stacks`
#[derive(Debug, Clone, Deserialize)]
pub struct StackDescription {
    #[serde(rename = "StackName")]
    pub stack_name: String,

    #[serde(rename = "StackStatus")]
    pub stack_status: StackStatus,

    #[serde(rename = "StackStatusReason")]
    pub stack_status_reason: Option<String>,

    #[serde(rename = "Outputs")]
    pub outputs: Option<Vec<StackOutputEntry>>,
}

/// One declared stack output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackOutputEntry {
    #[serde(rename = "OutputKey")]
    pub key: String,

    #[serde(rename = "OutputValue")]
    pub value: String,
}
