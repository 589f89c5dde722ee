//! Terminal-state waiter
//!
//! Explicit poll loop over `describe-stacks`: query, inspect, sleep, repeat
//! until a terminal status or the attempt bound. The source deployment
//! scripts waited unbounded; a hung remote operation here surfaces as a
//! timeout instead of an indefinitely blocked invocation.

use crate::awscli::AwsCli;
use crate::error::{AwsError, Result};
use stackflow_core::StackStatus;
use std::time::Duration;
use tokio::time::sleep;

/// Poll cadence and bound for the terminal-state wait
#[derive(Debug, Clone)]
pub struct WaitConfig {
    pub poll_interval: Duration,
    pub max_attempts: u32,
}

impl WaitConfig {
    /// Upper bound on total wall-clock wait
    pub fn max_wait(&self) -> Duration {
        self.poll_interval * self.max_attempts
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        // 240 * 15s = 60 minutes, comfortably above the slowest observed
        // RDS cluster create.
        Self {
            poll_interval: Duration::from_secs(15),
            max_attempts: 240,
        }
    }
}

/// Final state of a watched stack operation
#[derive(Debug, Clone)]
pub struct TerminalState {
    pub status: StackStatus,
    pub reason: Option<String>,
}

/// Poll until the stack reaches a terminal status
///
/// A stack that disappears from `describe-stacks` mid-wait has finished
/// deleting; that is reported as `DELETE_COMPLETE`.
pub async fn wait_for_terminal(
    cli: &AwsCli,
    stack_name: &str,
    config: &WaitConfig,
) -> Result<TerminalState> {
    for attempt in 0..config.max_attempts {
        match cli.describe_stack(stack_name).await? {
            None => {
                return Ok(TerminalState {
                    status: StackStatus::DeleteComplete,
                    reason: None,
                });
            }
            Some(description) => {
                if description.stack_status.is_terminal() {
                    return Ok(TerminalState {
                        status: description.stack_status,
                        reason: description.stack_status_reason,
                    });
                }
                tracing::debug!(
                    "Stack {} is {} (attempt {}/{})",
                    stack_name,
                    description.stack_status,
                    attempt + 1,
                    config.max_attempts
                );
            }
        }

        if attempt + 1 < config.max_attempts {
            sleep(config.poll_interval).await;
        }
    }

    Err(AwsError::WaitTimeout {
        stack: stack_name.to_string(),
        attempts: config.max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bound() {
        let config = WaitConfig::default();
        assert_eq!(config.max_wait(), Duration::from_secs(3600));
    }

    #[test]
    fn test_max_wait_calculation() {
        let config = WaitConfig {
            poll_interval: Duration::from_secs(5),
            max_attempts: 12,
        };
        assert_eq!(config.max_wait(), Duration::from_secs(60));
    }
}
