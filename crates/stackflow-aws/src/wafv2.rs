//! WAF association cleanup
//!
//! CloudFormation enforces referential integrity: a web ACL still
//! associated with a resource blocks deletion of the WAF stack. Teardown
//! disassociates everything first. Associations that are already gone are
//! warnings, not failures.

use crate::awscli::AwsCli;
use crate::error::{AwsError, Result};
use serde::Deserialize;

/// Output keys under which the WAF stack exports its web ACL ARN
pub const WEB_ACL_ARN_KEY: &str = "WebACLArn";
pub const WEB_ACL_ARN_FALLBACK: &str = "WebAclArn";

/// List the resource ARNs currently associated with a web ACL
pub async fn list_associations(cli: &AwsCli, web_acl_arn: &str) -> Result<Vec<String>> {
    let output = match cli
        .run(&[
            "wafv2",
            "list-resources-for-web-acl",
            "--web-acl-arn",
            web_acl_arn,
        ])
        .await
    {
        Ok(output) => output,
        Err(AwsError::CommandFailed(stderr))
            if stderr.contains("WAFNonexistentItemException") =>
        {
            tracing::warn!("Web ACL {} no longer exists", web_acl_arn);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let response: ListResourcesResponse = serde_json::from_str(&output)?;
    Ok(response.resource_arns)
}

/// Disassociate every resource from a web ACL
///
/// Returns the number of successful disassociations; individual failures
/// (typically a resource deleted out from under us) are logged and skipped.
pub async fn disassociate_all(cli: &AwsCli, web_acl_arn: &str) -> Result<usize> {
    let resources = list_associations(cli, web_acl_arn).await?;
    let mut disassociated = 0;

    for resource_arn in &resources {
        match cli
            .run(&["wafv2", "disassociate-web-acl", "--resource-arn", resource_arn])
            .await
        {
            Ok(_) => {
                tracing::debug!("Disassociated {}", resource_arn);
                disassociated += 1;
            }
            Err(e) => {
                tracing::warn!("Could not disassociate {}: {}", resource_arn, e);
            }
        }
    }

    Ok(disassociated)
}

#[derive(Debug, Deserialize)]
struct ListResourcesResponse {
    #[serde(rename = "ResourceArns", default)]
    resource_arns: Vec<String>,
}
