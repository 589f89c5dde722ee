//! Cross-stack output resolver
//!
//! A dependent stack (the WAF stack) consumes a value exported by its
//! upstream (the three-tier stack's load-balancer ARN). An absent upstream
//! or an absent output key is a configuration problem, not a transient
//! deployment failure, and gets its own error kind so the operator knows to
//! redeploy the upstream instead of retrying.

use crate::awscli::{AwsCli, StackOutputEntry};
use crate::error::{AwsError, Result};

/// Primary output key exporting the load-balancer identifier
pub const LOAD_BALANCER_ARN_KEY: &str = "LoadBalancerArn";

/// Older revisions of the three-tier template exported the ARN under this
/// name
pub const LOAD_BALANCER_ARN_FALLBACK: &str = "ApplicationLoadBalancerArn";

/// Resolve an output value from an upstream stack, trying a primary key and
/// one fallback alias
pub async fn resolve_output(
    cli: &AwsCli,
    upstream_stack: &str,
    primary: &str,
    fallback: &str,
) -> Result<String> {
    let description = cli
        .describe_stack(upstream_stack)
        .await?
        .ok_or_else(|| AwsError::UpstreamStackMissing(upstream_stack.to_string()))?;

    let outputs = description.outputs.unwrap_or_default();
    find_output(&outputs, primary, fallback).ok_or_else(|| AwsError::MissingCapability {
        stack: upstream_stack.to_string(),
        primary: primary.to_string(),
        fallback: fallback.to_string(),
    })
}

/// Locate an output by primary key, then fallback alias
pub fn find_output(
    outputs: &[StackOutputEntry],
    primary: &str,
    fallback: &str,
) -> Option<String> {
    outputs
        .iter()
        .find(|o| o.key == primary)
        .or_else(|| outputs.iter().find(|o| o.key == fallback))
        .map(|o| o.value.clone())
}
