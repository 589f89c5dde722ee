//! AWS driver error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("aws CLI not found. Please install: https://aws.amazon.com/cli/")]
    AwsCliNotFound,

    #[error("AWS credentials invalid or expired: {0}")]
    AuthenticationFailed(String),

    #[error("aws command failed: {0}")]
    CommandFailed(String),

    #[error("Template validation failed: {0}")]
    TemplateInvalid(String),

    #[error("Upstream stack '{0}' does not exist; deploy it before this stack")]
    UpstreamStackMissing(String),

    #[error(
        "Stack '{stack}' has no '{primary}' output (also tried '{fallback}'); \
         redeploy it with a version of the template that exports the load balancer"
    )]
    MissingCapability {
        stack: String,
        primary: String,
        fallback: String,
    },

    #[error("Timed out waiting for stack '{stack}' after {attempts} status checks")]
    WaitTimeout { stack: String, attempts: u32 },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] stackflow_core::CoreError),
}

pub type Result<T> = std::result::Result<T, AwsError>;
