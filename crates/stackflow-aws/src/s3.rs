//! S3 bucket draining
//!
//! CloudFormation refuses to delete a non-empty bucket, so teardown drains
//! the static-website bucket first: every object version and every delete
//! marker, paginated, deleted in batches of up to 1000 (the s3api
//! delete-objects limit).

use crate::awscli::AwsCli;
use crate::error::{AwsError, Result};
use serde::{Deserialize, Serialize};

/// delete-objects accepts at most 1000 keys per call
const DELETE_BATCH: usize = 1000;

/// Remove all object versions and delete markers from a bucket
///
/// Returns the number of entries deleted. A bucket that never existed or
/// was already deleted counts as empty.
pub async fn empty_bucket(cli: &AwsCli, bucket: &str) -> Result<usize> {
    let mut deleted = 0;
    let mut key_marker: Option<String> = None;
    let mut version_marker: Option<String> = None;

    loop {
        let mut args = vec![
            "s3api",
            "list-object-versions",
            "--bucket",
            bucket,
        ];
        if let Some(ref km) = key_marker {
            args.push("--key-marker");
            args.push(km);
        }
        if let Some(ref vm) = version_marker {
            args.push("--version-id-marker");
            args.push(vm);
        }

        let output = match cli.run(&args).await {
            Ok(output) => output,
            Err(AwsError::CommandFailed(stderr)) if stderr.contains("NoSuchBucket") => {
                tracing::warn!("Bucket {} does not exist, nothing to empty", bucket);
                return Ok(deleted);
            }
            Err(e) => return Err(e),
        };

        // An unversioned empty bucket returns no body at all.
        if output.trim().is_empty() {
            return Ok(deleted);
        }

        let listing: ListObjectVersionsResponse = serde_json::from_str(&output)?;
        let entries = listing.all_entries();

        if entries.is_empty() {
            return Ok(deleted);
        }

        for batch in entries.chunks(DELETE_BATCH) {
            let payload = serde_json::to_string(&DeleteRequest {
                objects: batch.to_vec(),
                quiet: true,
            })?;
            cli.run(&[
                "s3api",
                "delete-objects",
                "--bucket",
                bucket,
                "--delete",
                &payload,
            ])
            .await?;
            deleted += batch.len();
        }

        if !listing.is_truncated.unwrap_or(false) {
            return Ok(deleted);
        }
        key_marker = listing.next_key_marker;
        version_marker = listing.next_version_id_marker;
    }
}

#[derive(Debug, Deserialize)]
struct ListObjectVersionsResponse {
    #[serde(rename = "Versions")]
    versions: Option<Vec<ObjectIdentifier>>,

    #[serde(rename = "DeleteMarkers")]
    delete_markers: Option<Vec<ObjectIdentifier>>,

    #[serde(rename = "IsTruncated")]
    is_truncated: Option<bool>,

    #[serde(rename = "NextKeyMarker")]
    next_key_marker: Option<String>,

    #[serde(rename = "NextVersionIdMarker")]
    next_version_id_marker: Option<String>,
}

impl ListObjectVersionsResponse {
    /// Versions and delete markers, in one deletable list
    fn all_entries(&self) -> Vec<ObjectIdentifier> {
        self.versions
            .iter()
            .flatten()
            .chain(self.delete_markers.iter().flatten())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ObjectIdentifier {
    #[serde(rename = "Key")]
    key: String,

    // Unversioned buckets list entries without a VersionId; sending
    // "VersionId": null back to delete-objects is rejected.
    #[serde(rename = "VersionId", skip_serializing_if = "Option::is_none")]
    version_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct DeleteRequest {
    #[serde(rename = "Objects")]
    objects: Vec<ObjectIdentifier>,

    #[serde(rename = "Quiet")]
    quiet: bool,
}
