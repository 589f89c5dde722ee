//! Stack lifecycle driver
//!
//! Create-or-update and teardown of a single stack. Failure reasons come
//! verbatim from CloudFormation; rollback of partially-applied changes is
//! owned by the service, never attempted locally.

use crate::awscli::{AwsCli, UpdateOutcome};
use crate::error::{AwsError, Result};
use crate::waiter::{self, WaitConfig};
use stackflow_core::{
    OperationResult, Parameter, StackRequest, StackStatus, load_parameters, merge_override,
};

/// Drives one stack through apply/teardown
pub struct StackDriver {
    cli: AwsCli,
    wait: WaitConfig,
}

impl StackDriver {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            cli: AwsCli::new(region),
            wait: WaitConfig::default(),
        }
    }

    pub fn with_wait_config(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    pub fn cli(&self) -> &AwsCli {
        &self.cli
    }

    /// Create or update the stack and block until a terminal state
    ///
    /// `overrides` are merged into the static parameter file (the WAF stack
    /// injects the resolved load-balancer ARN this way). A no-op update is
    /// success.
    pub async fn apply(
        &self,
        req: &StackRequest,
        overrides: &[Parameter],
    ) -> Result<OperationResult> {
        let mut params = load_parameters(&req.parameters_path)?;
        for over in overrides {
            merge_override(&mut params, &over.key, &over.value);
        }

        let exists = self.cli.describe_stack(&req.stack_name).await?.is_some();

        if exists {
            tracing::debug!("Stack {} exists, updating", req.stack_name);
            match self.cli.update_stack(req, &params).await? {
                UpdateOutcome::NoChanges => return Ok(OperationResult::NoOpChangeset),
                UpdateOutcome::Submitted => {}
            }
        } else {
            tracing::debug!("Stack {} not found, creating", req.stack_name);
            self.cli.create_stack(req, &params).await?;
        }

        let terminal = match waiter::wait_for_terminal(&self.cli, &req.stack_name, &self.wait).await
        {
            Ok(terminal) => terminal,
            Err(AwsError::WaitTimeout { .. }) => return Ok(OperationResult::TimedOut),
            Err(e) => return Err(e),
        };

        match terminal.status {
            StackStatus::CreateComplete => Ok(OperationResult::Created),
            StackStatus::UpdateComplete => Ok(OperationResult::Updated),
            status => Ok(OperationResult::Failed(failure_reason(
                &status,
                terminal.reason.as_deref(),
            ))),
        }
    }

    /// Delete the stack and block until it is gone
    ///
    /// Deleting an already-absent stack is a no-op success.
    pub async fn teardown(&self, req: &StackRequest) -> Result<OperationResult> {
        if self.cli.describe_stack(&req.stack_name).await?.is_none() {
            return Ok(OperationResult::AlreadyAbsent);
        }

        self.cli.delete_stack(&req.stack_name).await?;

        let terminal = match waiter::wait_for_terminal(&self.cli, &req.stack_name, &self.wait).await
        {
            Ok(terminal) => terminal,
            Err(AwsError::WaitTimeout { .. }) => return Ok(OperationResult::TimedOut),
            Err(e) => return Err(e),
        };

        match terminal.status {
            StackStatus::DeleteComplete => Ok(OperationResult::Deleted),
            status => Ok(OperationResult::Failed(failure_reason(
                &status,
                terminal.reason.as_deref(),
            ))),
        }
    }
}

fn failure_reason(status: &StackStatus, reason: Option<&str>) -> String {
    match reason {
        Some(reason) => format!("{}: {}", status, reason),
        None => status.to_string(),
    }
}
