//! Orphaned log-group cleanup
//!
//! Log groups created lazily by Lambda and Firehose survive stack deletion.
//! This pass is strictly best-effort: every failure is a warning and the
//! caller's exit code never changes because of it.

use crate::awscli::AwsCli;
use serde::Deserialize;

/// Delete all log groups matching a name prefix, best-effort
///
/// Returns the number deleted. Errors are logged, never returned; the
/// primary stack deletion has already succeeded by the time this runs.
pub async fn delete_log_groups_with_prefix(cli: &AwsCli, prefix: &str) -> usize {
    let output = match cli
        .run(&[
            "logs",
            "describe-log-groups",
            "--log-group-name-prefix",
            prefix,
        ])
        .await
    {
        Ok(output) => output,
        Err(e) => {
            tracing::warn!("Could not list log groups with prefix {}: {}", prefix, e);
            return 0;
        }
    };

    let groups: Vec<String> = match serde_json::from_str::<DescribeLogGroupsResponse>(&output) {
        Ok(response) => response
            .log_groups
            .into_iter()
            .map(|g| g.log_group_name)
            .collect(),
        Err(e) => {
            tracing::warn!("Could not parse log group listing: {}", e);
            return 0;
        }
    };

    let mut deleted = 0;
    for group in &groups {
        match cli
            .run(&["logs", "delete-log-group", "--log-group-name", group])
            .await
        {
            Ok(_) => {
                tracing::debug!("Deleted log group {}", group);
                deleted += 1;
            }
            Err(e) => {
                tracing::warn!("Could not delete log group {}: {}", group, e);
            }
        }
    }

    deleted
}

// The logs API answers in camelCase, unlike CloudFormation.
#[derive(Debug, Deserialize)]
struct DescribeLogGroupsResponse {
    #[serde(rename = "logGroups", default)]
    log_groups: Vec<LogGroup>,
}

#[derive(Debug, Deserialize)]
struct LogGroup {
    #[serde(rename = "logGroupName")]
    log_group_name: String,
}
