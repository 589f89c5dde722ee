//! Core data model for Stackflow
//!
//! Process-local entities shared by the AWS driver and the CLI: the
//! deployment environment, the immutable stack request built once at
//! startup, CloudFormation parameter files, stack status classification
//! and tagged operation outcomes.
//!
//! Nothing in this crate talks to AWS; the only I/O is reading parameter
//! files from disk.

pub mod error;
pub mod params;
pub mod request;
pub mod result;
pub mod status;

// Re-exports
pub use error::{CoreError, Result};
pub use params::{Parameter, load_parameters, merge_override, to_cli_args};
pub use request::{Environment, StackRequest};
pub use result::OperationResult;
pub use status::StackStatus;
