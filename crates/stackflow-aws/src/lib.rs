//! AWS CLI driver for Stackflow
//!
//! This crate drives CloudFormation stack lifecycles through the `aws`
//! executable, treated as a black-box command interface with JSON
//! responses.
//!
//! # Requirements
//!
//! - The `aws` CLI must be installed and on `PATH`
//! - Credentials are whatever the CLI resolves (env, profile, instance role)
//!
//! # Example
//!
//! ```ignore
//! use stackflow_aws::StackDriver;
//! use stackflow_core::{Environment, StackRequest};
//!
//! let req = StackRequest::three_tier(Environment::Dev, None, None);
//! let driver = StackDriver::new(&req.region);
//!
//! let identity = driver.cli().check_auth().await?;
//! println!("Deploying as {}", identity.arn);
//!
//! let result = driver.apply(&req, &[]).await?;
//! ```

pub mod awscli;
pub mod error;
pub mod lifecycle;
pub mod logs;
pub mod resolve;
pub mod s3;
pub mod waiter;
pub mod wafv2;

pub use awscli::{AwsCli, CallerIdentity, StackDescription, StackOutputEntry, UpdateOutcome};
pub use error::{AwsError, Result};
pub use lifecycle::StackDriver;
pub use resolve::resolve_output;
pub use waiter::{TerminalState, WaitConfig};
